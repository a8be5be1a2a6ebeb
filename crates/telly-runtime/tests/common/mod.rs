// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Instrumented fakes shared by the runtime integration tests.
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use telly_core::audio::{
    AudioDevice, AudioSettings, BeepSpec, DroneSpec, NoiseSpec, Sound, StreamInfo,
};
use telly_core::channel::{
    ChannelDescriptor, ChannelLoader, ChannelPlugin, ChannelRegistry, PluginContext,
    PluginFactory, PluginLoadError,
};
use telly_core::clock::FixedClock;
use telly_core::render::{RenderTarget, Surface, Viewport};
use telly_core::{AudioAccessor, AudioResourceOwner};
use telly_runtime::{ChannelRuntime, RuntimeConfig};

/// Everything observable, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Ev {
    Load(String),
    Create(String, u32),
    Init(String),
    Resize(String, u32, u32),
    Show(String),
    Hide(String),
    Update(String),
    Dt(f32),
    Render(String),
    AudioOn(String),
    AudioOff(String),
    Destroy(String),
    Opacity(f32),
    SoundStart(u32),
    SoundStop(u32),
    Beep(f32),
}

pub type Log = Rc<RefCell<Vec<Ev>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<Ev> {
    log.borrow().clone()
}

pub fn clear(log: &Log) {
    log.borrow_mut().clear();
}

pub fn count(log: &Log, pred: impl Fn(&Ev) -> bool) -> usize {
    log.borrow().iter().filter(|e| pred(e)).count()
}

pub fn position(log: &Log, wanted: &Ev) -> Option<usize> {
    log.borrow().iter().position(|e| e == wanted)
}

// --- Audio -----------------------------------------------------------------

struct FakeSound {
    n: u32,
    log: Log,
}

impl Sound for FakeSound {
    fn start(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Ev::SoundStart(self.n));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Ev::SoundStop(self.n));
        Ok(())
    }
}

pub struct FakeAudio {
    log: Log,
    made: u32,
}

impl AudioDevice for FakeAudio {
    fn acquire(&mut self) -> Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }

    fn stream_info(&self) -> Option<StreamInfo> {
        None
    }

    fn noise(&mut self, _spec: NoiseSpec) -> Result<Box<dyn Sound>> {
        self.made += 1;
        Ok(Box::new(FakeSound {
            n: self.made,
            log: self.log.clone(),
        }))
    }

    fn drone(&mut self, _spec: DroneSpec) -> Result<Box<dyn Sound>> {
        self.made += 1;
        Ok(Box::new(FakeSound {
            n: self.made,
            log: self.log.clone(),
        }))
    }

    fn beep(&mut self, spec: BeepSpec) -> Result<()> {
        self.log.borrow_mut().push(Ev::Beep(spec.freq));
        Ok(())
    }
}

// --- Render target ---------------------------------------------------------

pub struct FakeTarget {
    viewport: Viewport,
    screen: Surface,
    noise: Surface,
    opacity: f32,
    log: Log,
}

impl FakeTarget {
    pub fn new(log: Log, width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height, 1.0),
            screen: Surface::new(width, height),
            noise: Surface::new(width, height),
            opacity: 0.0,
            log,
        }
    }
}

impl RenderTarget for FakeTarget {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.screen.resize(viewport.width, viewport.height);
        self.noise.resize(viewport.width, viewport.height);
    }

    fn screen(&mut self) -> &mut Surface {
        &mut self.screen
    }

    fn noise_layer(&mut self) -> &mut Surface {
        &mut self.noise
    }

    fn set_noise_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.log.borrow_mut().push(Ev::Opacity(opacity));
    }

    fn noise_opacity(&self) -> f32 {
        self.opacity
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

// --- Channels --------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub init: bool,
    pub render_panics: bool,
    pub update: bool,
    pub factory: bool,
}

struct RecordingChannel {
    id: String,
    log: Log,
    audio: AudioAccessor,
    faults: Faults,
}

impl RecordingChannel {
    fn push(&self, ev: Ev) {
        self.log.borrow_mut().push(ev);
    }
}

impl ChannelPlugin for RecordingChannel {
    fn init(&mut self, _viewport: Viewport) -> Result<()> {
        self.push(Ev::Init(self.id.clone()));
        if self.faults.init {
            return Err(anyhow!("init refused"));
        }
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        self.push(Ev::Resize(self.id.clone(), viewport.width, viewport.height));
        Ok(())
    }

    fn on_show(&mut self) -> Result<()> {
        self.push(Ev::Show(self.id.clone()));
        Ok(())
    }

    fn on_hide(&mut self) -> Result<()> {
        self.push(Ev::Hide(self.id.clone()));
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<()> {
        self.push(Ev::Update(self.id.clone()));
        self.push(Ev::Dt(dt));
        if self.faults.update {
            return Err(anyhow!("update refused"));
        }
        Ok(())
    }

    fn render(&self, _surface: &mut Surface) -> Result<()> {
        self.push(Ev::Render(self.id.clone()));
        if self.faults.render_panics {
            panic!("render exploded");
        }
        Ok(())
    }

    fn on_audio_on(&mut self) -> Result<()> {
        self.push(Ev::AudioOn(self.id.clone()));
        let mut handle = self.audio.noise_source(NoiseSpec::default())?;
        handle.start()?;
        self.audio.set_current(handle);
        Ok(())
    }

    fn on_audio_off(&mut self) -> Result<()> {
        self.push(Ev::AudioOff(self.id.clone()));
        self.audio.stop_current();
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.push(Ev::Destroy(self.id.clone()));
        self.audio.stop_current();
        Ok(())
    }
}

/// Resolves every module to a [`RecordingChannel`], after `delay`.
pub struct FakeLoader {
    pub log: Log,
    pub delay: Duration,
    pub errors: HashMap<String, PluginLoadError>,
    pub faults: Rc<RefCell<HashMap<String, Faults>>>,
}

#[async_trait(?Send)]
impl ChannelLoader for FakeLoader {
    async fn load(&self, descriptor: &ChannelDescriptor) -> Result<PluginFactory, PluginLoadError> {
        self.log.borrow_mut().push(Ev::Load(descriptor.module.clone()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(err) = self.errors.get(&descriptor.module) {
            return Err(err.clone());
        }
        let id = descriptor.id.clone();
        let log = self.log.clone();
        let faults = self.faults.borrow().get(&id).copied().unwrap_or_default();
        Ok(PluginFactory::new(descriptor.module.clone(), move |ctx: PluginContext| {
            log.borrow_mut().push(Ev::Create(id.clone(), ctx.seed));
            if faults.factory {
                return Err(anyhow!("factory refused"));
            }
            Ok(Box::new(RecordingChannel {
                id: id.clone(),
                log: log.clone(),
                audio: ctx.audio,
                faults,
            }) as Box<dyn ChannelPlugin>)
        }))
    }
}

// --- Harness ---------------------------------------------------------------

pub const DAY: u64 = 20_000;

pub fn registry(n: usize) -> ChannelRegistry {
    let channels = (0..n)
        .map(|i| ChannelDescriptor::new(format!("ch{i}"), format!("Channel {i}"), format!("mod{i}")))
        .collect();
    ChannelRegistry::new(channels).unwrap()
}

pub struct Harness {
    pub log: Log,
    pub audio: AudioResourceOwner,
    pub faults: Rc<RefCell<HashMap<String, Faults>>>,
    pub runtime: ChannelRuntime,
}

pub struct Setup {
    pub channels: usize,
    pub config: RuntimeConfig,
    pub load_delay: Duration,
    pub missing: Vec<&'static str>,
    /// Modules that load with a specific error.
    pub load_errors: Vec<(&'static str, PluginLoadError)>,
    pub require_gesture: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            channels: 5,
            config: RuntimeConfig::default(),
            load_delay: Duration::from_millis(30),
            missing: Vec::new(),
            load_errors: Vec::new(),
            require_gesture: true,
        }
    }
}

impl Setup {
    pub fn build(self) -> Harness {
        let log = new_log();
        let audio = AudioResourceOwner::new(
            Box::new(FakeAudio {
                log: log.clone(),
                made: 0,
            }),
            AudioSettings {
                require_gesture: self.require_gesture,
                ..AudioSettings::default()
            },
        );
        let faults = Rc::new(RefCell::new(HashMap::new()));
        let mut errors: HashMap<String, PluginLoadError> = self
            .missing
            .iter()
            .map(|m| {
                let err = PluginLoadError::ModuleNotFound {
                    module: m.to_string(),
                };
                (m.to_string(), err)
            })
            .collect();
        errors.extend(self.load_errors.into_iter().map(|(m, e)| (m.to_string(), e)));
        let loader = FakeLoader {
            log: log.clone(),
            delay: self.load_delay,
            errors,
            faults: faults.clone(),
        };
        let runtime = ChannelRuntime::new(
            self.config,
            registry(self.channels),
            Box::new(loader),
            audio.clone(),
            Box::new(FakeTarget::new(log.clone(), 64, 48)),
            Box::new(FixedClock::on_day(DAY)),
        );
        Harness {
            log,
            audio,
            faults,
            runtime,
        }
    }
}

impl Harness {
    pub fn fail(&self, channel: &str, faults: Faults) {
        self.faults.borrow_mut().insert(channel.to_string(), faults);
    }
}

pub fn harness() -> Harness {
    Setup::default().build()
}
