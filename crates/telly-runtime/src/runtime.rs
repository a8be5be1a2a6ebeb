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

//! The channel runtime: the TV's state machine and frame loop.
//!
//! [`ChannelRuntime`] owns the channel registry, the loader, the audio owner,
//! the render target and the two one-shot timers. Everything that changes
//! its state goes through `&mut self`, so at most one operation, and in
//! particular at most one channel switch, is ever in flight. Commands that
//! arrive during a switch wait in the [`CommandBus`] until it completes.

use crate::command::RuntimeCommand;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::guard::{guarded, Hook, PluginFault};
use crate::osd::{channel_label, GuideEntry, OsdSnapshot, Overlays};
use crate::state::{parse_tune, Phase, RuntimeState, TuneError};
use crate::timer::OneShotTimer;
use crate::transition::TransitionController;
use std::ops::ControlFlow;
use std::time::Duration;
use telly_core::audio::{AudioError, BeepSpec, UserGesture, Waveform};
use telly_core::channel::{
    seed_for_channel, ChannelDescriptor, ChannelLoader, ChannelPlugin, ChannelRegistry,
    PluginContext,
};
use telly_core::clock::Clock;
use telly_core::event::CommandBus;
use telly_core::render::{RenderTarget, Rgba, Viewport};
use telly_core::AudioResourceOwner;
use tokio::time::{Instant, MissedTickBehavior};

/// Blip after every completed channel change.
const TUNE_CUE: BeepSpec = BeepSpec {
    freq: 620.0,
    duration: 0.05,
    gain: 0.05,
    waveform: Waveform::Sine,
};
/// Buzz for rejected input and failed switches.
const ERROR_CUE: BeepSpec = BeepSpec {
    freq: 180.0,
    duration: 0.08,
    gain: 0.06,
    waveform: Waveform::Square,
};
const SCAN_ON_CUE: BeepSpec = BeepSpec {
    freq: 880.0,
    duration: 0.06,
    gain: 0.04,
    waveform: Waveform::Square,
};
const SCAN_OFF_CUE: BeepSpec = BeepSpec {
    freq: 220.0,
    ..SCAN_ON_CUE
};
/// How long the dot lingers on a switched-off screen.
const STANDBY_GLOW: Duration = Duration::from_millis(900);

/// What a timer does when it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Advance one channel in scan mode.
    ScanStep,
    /// Drop an abandoned tune entry.
    ClearTune,
}

/// Counters kept over the runtime's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Switches that ended with a running channel.
    pub switches_completed: u32,
    /// Switches that ended channel-less.
    pub switches_failed: u32,
    /// Hook failures contained, across all channels.
    pub plugin_faults: u32,
    /// Frames ticked.
    pub frames: u64,
}

/// A read-only view of the running channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChannelInfo {
    /// Channel id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Registry index.
    pub index: usize,
    /// Seed the instance was built with.
    pub seed: u32,
    /// Hook failures of this instance so far.
    pub faults: u32,
}

struct ActiveChannel {
    descriptor: ChannelDescriptor,
    index: usize,
    seed: u32,
    instance: Box<dyn ChannelPlugin>,
    faults: u32,
}

/// Calls one hook on `active`, containing and counting a failure.
fn call_hook(
    active: &mut ActiveChannel,
    stats: &mut RuntimeStats,
    hook: Hook,
    call: impl FnOnce(&mut dyn ChannelPlugin) -> anyhow::Result<()>,
) -> bool {
    let instance = active.instance.as_mut();
    match guarded(&active.descriptor.id, hook, || call(instance)) {
        Ok(()) => true,
        Err(fault) => {
            note_fault(active, stats, &fault);
            false
        }
    }
}

fn note_fault(active: &mut ActiveChannel, stats: &mut RuntimeStats, fault: &PluginFault) {
    active.faults += 1;
    stats.plugin_faults += 1;
    // Frame hooks can fail every frame; only the first one is loud.
    if active.faults == 1 {
        log::error!("{fault}");
    } else {
        log::debug!("{fault}");
    }
}

/// The TV: power, tuning, scan mode and the hosted channel.
pub struct ChannelRuntime {
    config: RuntimeConfig,
    registry: ChannelRegistry,
    loader: Box<dyn ChannelLoader>,
    audio: AudioResourceOwner,
    target: Box<dyn RenderTarget>,
    clock: Box<dyn Clock>,
    barrier: TransitionController,
    state: RuntimeState,
    overlays: Overlays,
    active: Option<ActiveChannel>,
    transitioning: bool,
    scan_timer: OneShotTimer<TimerAction>,
    tune_timer: OneShotTimer<TimerAction>,
    last_frame: Option<Instant>,
    last_viewport: Viewport,
    last_seed: Option<u32>,
    powered_off_at: Option<Instant>,
    stats: RuntimeStats,
    shut_down: bool,
}

impl ChannelRuntime {
    /// Builds a powered-off runtime. Call [`boot`](Self::boot) to apply the
    /// configured boot state.
    pub fn new(
        config: RuntimeConfig,
        registry: ChannelRegistry,
        loader: Box<dyn ChannelLoader>,
        audio: AudioResourceOwner,
        target: Box<dyn RenderTarget>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let last_viewport = target.viewport();
        let barrier = TransitionController::new(config.frame_interval());
        let state = RuntimeState {
            audio_enabled: audio.is_enabled(),
            ..RuntimeState::default()
        };
        Self {
            config,
            registry,
            loader,
            audio,
            target,
            clock,
            barrier,
            state,
            overlays: Overlays::default(),
            active: None,
            transitioning: false,
            scan_timer: OneShotTimer::new("scan"),
            tune_timer: OneShotTimer::new("tune-idle"),
            last_frame: None,
            last_viewport,
            last_seed: None,
            powered_off_at: None,
            stats: RuntimeStats::default(),
            shut_down: false,
        }
    }

    /// Applies the boot configuration: scan flag, then power.
    pub async fn boot(&mut self) {
        log::info!(
            "Channel runtime booting with {} channels.",
            self.registry.len()
        );
        self.state.scanning = self.config.boot_scanning;
        if self.config.boot_powered {
            if let Err(e) = self.power_on().await {
                log::error!("Boot tune-in failed: {e}");
            }
        }
    }

    /// Dispatches one command. Returns `Break` when the loop should exit.
    pub async fn handle(&mut self, command: RuntimeCommand) -> ControlFlow<()> {
        log::debug!("Handling command '{command}'.");
        let user_input = command.is_user_input();
        let outcome = match command {
            RuntimeCommand::PowerToggle => self.toggle_power().await,
            RuntimeCommand::ChannelStep(delta) => self.channel_step(delta).await,
            RuntimeCommand::Digit(digit) => self.add_digit(digit),
            RuntimeCommand::ConfirmTune => self.confirm_tune().await,
            RuntimeCommand::BackspaceTune => self.backspace_tune(),
            RuntimeCommand::ToggleAudio => {
                // A failure is already logged and leaves audio off.
                let _ = self.toggle_audio(Some(UserGesture::from_input()));
                Ok(())
            }
            RuntimeCommand::ToggleScan => {
                self.toggle_scan();
                Ok(())
            }
            RuntimeCommand::ToggleInfo => {
                self.overlays.show_info = !self.overlays.show_info;
                Ok(())
            }
            RuntimeCommand::ToggleGuide => {
                if self.state.powered {
                    self.overlays.show_guide = !self.overlays.show_guide;
                }
                Ok(())
            }
            RuntimeCommand::ToggleHelp => {
                self.overlays.show_help = !self.overlays.show_help;
                Ok(())
            }
            RuntimeCommand::Resize(viewport) => {
                if viewport.is_empty() || viewport.is_oversized() {
                    log::warn!(
                        "Ignoring resize to {}x{}; sides must be 1..={}.",
                        viewport.width,
                        viewport.height,
                        Viewport::MAX_SIDE
                    );
                } else {
                    self.target.resize(viewport);
                }
                Ok(())
            }
            RuntimeCommand::Quit => return ControlFlow::Break(()),
        };
        if let Err(e) = outcome {
            log::debug!("Command '{command}' had no effect: {e}");
        }
        // Powering on flashes the banner too.
        if user_input && self.state.powered {
            self.overlays.flash_until = Some(Instant::now() + self.config.osd_flash());
        }
        ControlFlow::Continue(())
    }

    /// Turns the set on (tuning to the current channel) or off.
    pub async fn toggle_power(&mut self) -> Result<(), RuntimeError> {
        if self.state.powered {
            self.power_off();
            Ok(())
        } else {
            self.power_on().await
        }
    }

    async fn power_on(&mut self) -> Result<(), RuntimeError> {
        log::info!("Power on.");
        self.state.powered = true;
        self.powered_off_at = None;
        let barrier = self.config.boot_barrier();
        self.switch_with_barrier(self.state.current_index, barrier)
            .await
    }

    fn power_off(&mut self) {
        log::info!("Power off.");
        self.state.powered = false;
        self.scan_timer.disarm();
        self.tune_timer.disarm();
        self.state.tune_buffer.clear();
        self.teardown_active();
        self.overlays.show_guide = false;
        self.overlays.flash_until = None;
        self.powered_off_at = Some(Instant::now());
    }

    /// Steps up or down through the registry, wrapping at both ends.
    pub async fn channel_step(&mut self, delta: i8) -> Result<(), RuntimeError> {
        if !self.state.powered {
            return Err(RuntimeError::PoweredOff);
        }
        let len = self.registry.len() as i64;
        let next = (self.state.current_index as i64 + i64::from(delta)).rem_euclid(len);
        self.switch_to(next as usize).await
    }

    /// Appends a digit to the tune buffer and restarts the idle timer.
    pub fn add_digit(&mut self, digit: u8) -> Result<(), RuntimeError> {
        if !self.state.powered {
            return Err(RuntimeError::PoweredOff);
        }
        if !self.state.push_digit(digit, self.config.tune_max_digits) {
            log::debug!("Digit {digit} ignored; tune buffer is full.");
        }
        self.tune_timer
            .arm(self.config.tune_idle(), TimerAction::ClearTune);
        Ok(())
    }

    /// Removes the last digit and restarts the idle timer.
    pub fn backspace_tune(&mut self) -> Result<(), RuntimeError> {
        if !self.state.powered {
            return Err(RuntimeError::PoweredOff);
        }
        self.state.backspace();
        self.tune_timer
            .arm(self.config.tune_idle(), TimerAction::ClearTune);
        Ok(())
    }

    /// Tunes to the number in the buffer. The buffer is always cleared.
    ///
    /// A number that is not a channel only plays the error cue. An empty
    /// buffer does nothing.
    pub async fn confirm_tune(&mut self) -> Result<(), RuntimeError> {
        if !self.state.powered {
            return Err(RuntimeError::PoweredOff);
        }
        self.tune_timer.disarm();
        let buffer = std::mem::take(&mut self.state.tune_buffer);
        match parse_tune(&buffer, self.registry.len()) {
            Ok(index) => self.switch_to(index).await,
            Err(TuneError::Empty) => Ok(()),
            Err(e) => {
                log::info!("Rejected tune entry: {e}");
                self.audio.beep(ERROR_CUE);
                Ok(())
            }
        }
    }

    /// Flips scan mode. Returns the new flag.
    pub fn toggle_scan(&mut self) -> bool {
        self.state.scanning = !self.state.scanning;
        log::info!(
            "Scan mode {}.",
            if self.state.scanning { "on" } else { "off" }
        );
        self.audio.beep(if self.state.scanning {
            SCAN_ON_CUE
        } else {
            SCAN_OFF_CUE
        });
        self.arm_scan();
        self.state.scanning
    }

    /// Flips audio output and tells the running channel. Returns the new
    /// state.
    ///
    /// Only user input may pass a gesture; without one, enabling fails when
    /// the platform requires it and audio stays off.
    pub fn toggle_audio(&mut self, gesture: Option<UserGesture>) -> Result<bool, AudioError> {
        let result = self.audio.toggle(gesture);
        self.state.audio_enabled = self.audio.is_enabled();
        match &result {
            Ok(enabled) => log::info!("Audio {}.", if *enabled { "on" } else { "off" }),
            Err(e) => log::warn!("Could not enable audio: {e}"),
        }
        if result.is_ok() && self.state.powered && !self.transitioning {
            if let Some(active) = self.active.as_mut() {
                if self.state.audio_enabled {
                    call_hook(active, &mut self.stats, Hook::AudioOn, |p| p.on_audio_on());
                } else {
                    call_hook(active, &mut self.stats, Hook::AudioOff, |p| p.on_audio_off());
                }
            }
        }
        result
    }

    /// Switches to the channel at `index` (clamped into range).
    ///
    /// Runs the noise barrier, tears down the current channel, loads and
    /// starts the new one, then re-arms the scan clock. A failure leaves the
    /// set on with no channel, plays the error cue and is returned.
    pub async fn switch_to(&mut self, index: usize) -> Result<(), RuntimeError> {
        if !self.state.powered {
            return Err(RuntimeError::PoweredOff);
        }
        let barrier = self.config.barrier();
        self.switch_with_barrier(index, barrier).await
    }

    async fn switch_with_barrier(
        &mut self,
        index: usize,
        barrier: Duration,
    ) -> Result<(), RuntimeError> {
        let result = self.transition(index, barrier).await;
        match &result {
            Ok(()) => {
                self.stats.switches_completed += 1;
                self.audio.beep(TUNE_CUE);
            }
            Err(e) => {
                self.stats.switches_failed += 1;
                log::error!("Channel switch failed: {e}");
                self.audio.beep(ERROR_CUE);
            }
        }
        // Any switch, even a failed one, restarts the scan clock from now.
        self.arm_scan();
        result
    }

    async fn transition(&mut self, index: usize, barrier: Duration) -> Result<(), RuntimeError> {
        let index = index.min(self.registry.len().saturating_sub(1));
        let descriptor = self.registry.get(index)?.clone();
        let seed = seed_for_channel(&descriptor.id, index, self.clock.as_ref());
        log::info!(
            "Tuning to {} {descriptor} (seed {seed:#010x}).",
            channel_label(index)
        );

        self.transitioning = true;
        self.barrier
            .run_barrier(self.target.as_mut(), barrier)
            .await;
        self.teardown_active();
        self.state.current_index = index;
        self.last_seed = Some(seed);
        let outcome = self.install(descriptor, index, seed).await;
        self.transitioning = false;
        outcome
    }

    async fn install(
        &mut self,
        descriptor: ChannelDescriptor,
        index: usize,
        seed: u32,
    ) -> Result<(), RuntimeError> {
        let factory = self.loader.load(&descriptor).await?;
        let context = PluginContext {
            seed,
            audio: self.audio.accessor(),
        };
        let mut instance = guarded(&descriptor.id, Hook::Factory, || factory.create(context))?;

        let viewport = self.target.viewport();
        if let Err(fault) = guarded(&descriptor.id, Hook::Init, || instance.init(viewport)) {
            if let Err(e) = guarded(&descriptor.id, Hook::Destroy, || instance.destroy()) {
                log::warn!("{e}");
            }
            self.audio.stop_current();
            return Err(fault.into());
        }
        self.last_viewport = viewport;

        let mut active = ActiveChannel {
            descriptor,
            index,
            seed,
            instance,
            faults: 0,
        };
        call_hook(&mut active, &mut self.stats, Hook::Show, |p| p.on_show());
        if self.audio.is_enabled() {
            call_hook(&mut active, &mut self.stats, Hook::AudioOn, |p| p.on_audio_on());
        }
        log::info!("Now showing {}.", active.descriptor);
        self.active = Some(active);
        Ok(())
    }

    /// Tears down the running channel, then stops whatever sound is current
    /// whether or not the channel released it.
    fn teardown_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            log::debug!("Tearing down {}.", active.descriptor);
            call_hook(&mut active, &mut self.stats, Hook::Hide, |p| p.on_hide());
            call_hook(&mut active, &mut self.stats, Hook::Destroy, |p| p.destroy());
        }
        self.audio.stop_current();
    }

    fn arm_scan(&mut self) {
        if self.state.scanning && self.state.powered {
            self.scan_timer
                .arm(self.config.scan_period(), TimerAction::ScanStep);
        } else {
            self.scan_timer.disarm();
        }
    }

    async fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::ClearTune => {
                if !self.state.tune_buffer.is_empty() {
                    log::debug!("Tune entry '{}' timed out.", self.state.tune_buffer);
                    self.state.tune_buffer.clear();
                }
            }
            TimerAction::ScanStep => {
                if self.state.scanning && self.state.powered {
                    log::debug!("Scan step.");
                    // Failures are logged by the switch; scan keeps going.
                    let _ = self.channel_step(1).await;
                }
            }
        }
    }

    /// Runs one frame at `now`.
    ///
    /// Expires timers (a scan step switches channels before the frame is
    /// drawn), forwards viewport changes, then either drives the active
    /// channel or paints the standby screen, and presents.
    pub async fn tick(&mut self, now: Instant) {
        let dt = match self.last_frame.replace(now) {
            Some(prev) => now
                .saturating_duration_since(prev)
                .as_secs_f32()
                .min(self.config.max_frame_dt()),
            None => 0.0,
        };
        self.stats.frames += 1;

        if let Some(action) = self.tune_timer.poll(now) {
            self.fire(action).await;
        }
        if let Some(action) = self.scan_timer.poll(now) {
            self.fire(action).await;
        }
        if self.transitioning {
            return;
        }

        self.sync_viewport();
        if self.state.powered {
            self.drive_active(dt);
        } else {
            self.paint_standby(now);
        }
        if let Err(e) = self.target.present() {
            log::warn!("Failed to present frame: {e:#}");
        }
    }

    fn sync_viewport(&mut self) {
        let viewport = self.target.viewport();
        if viewport == self.last_viewport {
            return;
        }
        log::debug!(
            "Viewport changed to {}x{} @{}.",
            viewport.width,
            viewport.height,
            viewport.dpr
        );
        self.last_viewport = viewport;
        if let Some(active) = self.active.as_mut() {
            call_hook(active, &mut self.stats, Hook::Resize, |p| p.on_resize(viewport));
        }
    }

    fn drive_active(&mut self, dt: f32) {
        let Some(active) = self.active.as_mut() else {
            self.target.screen().clear(Rgba::BLACK);
            return;
        };
        // A failed update skips this frame's render.
        if !call_hook(active, &mut self.stats, Hook::Update, |p| p.update(dt)) {
            return;
        }
        let screen = self.target.screen();
        let instance = active.instance.as_ref();
        if let Err(fault) = guarded(&active.descriptor.id, Hook::Render, || instance.render(screen)) {
            note_fault(active, &mut self.stats, &fault);
        }
    }

    fn paint_standby(&mut self, now: Instant) {
        let screen = self.target.screen();
        screen.clear(Rgba::BLACK);
        let Some(off_at) = self.powered_off_at else {
            return;
        };
        let glow = 1.0 - now.saturating_duration_since(off_at).as_secs_f32() / STANDBY_GLOW.as_secs_f32();
        if glow <= 0.0 {
            return;
        }
        let (w, h) = (screen.width() as i32, screen.height() as i32);
        let size = (w.min(h) / 24).max(2);
        screen.fill_rect(
            (w - size) / 2,
            (h - size) / 2,
            size,
            size,
            Rgba::WHITE.with_alpha(glow),
        );
    }

    /// The cooperative main loop: commands from `bus` interleaved with frame
    /// ticks, until [`RuntimeCommand::Quit`] or the bus closes.
    pub async fn run(&mut self, bus: &CommandBus<RuntimeCommand>) {
        let mut frames = tokio::time::interval(self.config.frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        log::info!("Channel runtime running.");
        let mut banner = String::new();
        loop {
            tokio::select! {
                biased;
                command = bus.next() => match command {
                    Some(command) => {
                        if self.handle(command).await.is_break() {
                            let dropped = bus.drain().len();
                            if dropped > 0 {
                                log::info!("Quit with {dropped} command(s) still queued; dropping them.");
                            }
                            break;
                        }
                        let queued = bus.pending();
                        if queued > 0 {
                            log::debug!("{queued} command(s) queued.");
                        }
                    }
                    None => {
                        log::info!("Command bus closed.");
                        break;
                    }
                },
                now = frames.tick() => self.tick(now).await,
            }
            let current = self.osd(Instant::now()).to_string();
            if current != banner {
                log::info!("{current}");
                banner = current;
            }
        }
        self.shutdown();
    }

    /// Tears everything down and releases audio. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        log::info!("Channel runtime shutting down...");
        self.scan_timer.disarm();
        self.tune_timer.disarm();
        self.teardown_active();
        self.audio.disable();
        self.state.audio_enabled = false;
        let s = self.stats;
        log::info!(
            "Channel runtime stopped: {} switches ({} failed), {} contained faults, {} frames.",
            s.switches_completed + s.switches_failed,
            s.switches_failed,
            s.plugin_faults,
            s.frames
        );
    }

    /// The state record.
    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if !self.state.powered {
            Phase::Off
        } else if self.transitioning {
            Phase::Transitioning
        } else if !self.state.tune_buffer.is_empty() {
            Phase::Tuning
        } else {
            Phase::Idle
        }
    }

    /// The running channel, if any.
    pub fn active_channel(&self) -> Option<ActiveChannelInfo> {
        self.active.as_ref().map(|a| ActiveChannelInfo {
            id: a.descriptor.id.clone(),
            name: a.descriptor.display_name.clone(),
            index: a.index,
            seed: a.seed,
            faults: a.faults,
        })
    }

    /// The info banner at `now`.
    pub fn osd(&self, now: Instant) -> OsdSnapshot {
        let index = self.state.current_index;
        let label = channel_label(index);
        let (id, name) = match self.registry.get(index) {
            Ok(d) => (d.id.as_str(), d.display_name.clone()),
            Err(_) => ("", String::new()),
        };
        let status = if self.state.tune_buffer.is_empty() {
            format!("{label} {id}")
        } else {
            self.state.tune_buffer.clone()
        };
        OsdSnapshot {
            power: if self.state.powered { "ON" } else { "OFF" },
            channel: label,
            name,
            audio: if self.state.audio_enabled {
                "AUDIO: ON"
            } else {
                "AUDIO: OFF"
            },
            scan: if self.state.scanning {
                "SCAN: ON"
            } else {
                "SCAN: OFF"
            },
            status,
            seed: self.last_seed,
            visible: self.state.powered && self.overlays.info_visible(now),
        }
    }

    /// The channel guide.
    pub fn guide(&self) -> Vec<GuideEntry> {
        self.registry
            .all()
            .iter()
            .enumerate()
            .map(|(i, d)| GuideEntry {
                number: channel_label(i),
                name: d.display_name.clone(),
                id: d.id.clone(),
                active: self.state.powered && i == self.state.current_index,
            })
            .collect()
    }

    /// Overlay flags.
    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Lifetime counters.
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// When scan mode will next advance.
    pub fn scan_deadline(&self) -> Option<Instant> {
        self.scan_timer.deadline()
    }

    /// When the tune buffer will be dropped.
    pub fn tune_deadline(&self) -> Option<Instant> {
        self.tune_timer.deadline()
    }

    /// The audio owner.
    pub fn audio(&self) -> &AudioResourceOwner {
        &self.audio
    }

    /// The channel list.
    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// The configuration in use.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The render target.
    pub fn target(&self) -> &dyn RenderTarget {
        self.target.as_ref()
    }

    /// Mutable access to the render target.
    pub fn target_mut(&mut self) -> &mut dyn RenderTarget {
        self.target.as_mut()
    }
}

impl Drop for ChannelRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
