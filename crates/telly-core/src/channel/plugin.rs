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

//! The lifecycle contract every channel implements.

use crate::audio::AudioAccessor;
use crate::render::{Surface, Viewport};
use anyhow::Result;
use std::fmt;
use std::rc::Rc;

/// Everything a channel receives at construction.
#[derive(Clone, Debug)]
pub struct PluginContext {
    /// Seed derived for this channel, index and day.
    pub seed: u32,
    /// The channel's only route to audio output.
    pub audio: AudioAccessor,
}

/// A generative audio/visual program hosted by the runtime.
///
/// The runtime guarantees that at most one instance receives calls at a
/// time, that `init` comes before any `update`/`render`, and that `destroy`
/// is the last call an instance ever receives. Every hook may fail; failures
/// are contained by the runtime and never stop the frame loop.
///
/// `update` and `render` run once per frame and must return promptly.
pub trait ChannelPlugin {
    /// Allocates state sized to the viewport.
    fn init(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }

    /// Called only when the viewport actually changes size.
    fn on_resize(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }

    /// The channel became visible (after `init`).
    fn on_show(&mut self) -> Result<()> {
        Ok(())
    }

    /// The channel is about to be torn down.
    fn on_hide(&mut self) -> Result<()> {
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    fn update(&mut self, dt: f32) -> Result<()>;

    /// Paints the current frame.
    ///
    /// Takes `&self`: rendering cannot change what `update` observes. Render
    /// caches that need mutation must use interior mutability.
    fn render(&self, surface: &mut Surface) -> Result<()>;

    /// Audio was enabled (or the channel started with audio on).
    /// Must be idempotent.
    fn on_audio_on(&mut self) -> Result<()> {
        Ok(())
    }

    /// Audio was disabled. Must be idempotent.
    fn on_audio_off(&mut self) -> Result<()> {
        Ok(())
    }

    /// Releases every resource, including the current sound. Safe to call
    /// even if `on_audio_on` never ran.
    fn destroy(&mut self) -> Result<()> {
        Ok(())
    }
}

type BuildFn = dyn Fn(PluginContext) -> Result<Box<dyn ChannelPlugin>>;

/// A named constructor for one kind of channel.
///
/// Construction must be pure: no sound may start and nothing shared may be
/// touched until `init`.
#[derive(Clone)]
pub struct PluginFactory {
    name: String,
    build: Rc<BuildFn>,
}

impl PluginFactory {
    /// Wraps a constructor.
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(PluginContext) -> Result<Box<dyn ChannelPlugin>> + 'static,
    {
        Self {
            name: name.into(),
            build: Rc::new(build),
        }
    }

    /// Name of the module that exported this factory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructs a new instance.
    pub fn create(&self, context: PluginContext) -> Result<Box<dyn ChannelPlugin>> {
        (self.build)(context)
    }
}

impl fmt::Debug for PluginFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
