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

//! The one looping sound a channel may own.

use anyhow::Result;
use telly_core::audio::{AudioAccessor, AudioError, SoundHandle, SoundId};

/// Tracks whether this channel registered a sound with the audio owner.
///
/// `start` and `stop` are both idempotent, which is what the `on_audio_on`
/// and `on_audio_off` hooks require.
#[derive(Debug)]
pub struct Ambience {
    audio: AudioAccessor,
    playing: Option<SoundId>,
}

impl Ambience {
    pub fn new(audio: AudioAccessor) -> Self {
        Self {
            audio,
            playing: None,
        }
    }

    /// Builds, starts and registers a sound unless one is already playing or
    /// audio is off.
    pub fn start_with<F>(&mut self, make: F) -> Result<()>
    where
        F: FnOnce(&AudioAccessor) -> Result<SoundHandle, AudioError>,
    {
        if self.playing.is_some() || !self.audio.enabled() {
            return Ok(());
        }
        let mut handle = make(&self.audio)?;
        handle.start()?;
        self.playing = Some(handle.id());
        self.audio.set_current(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.playing.take().is_some() {
            self.audio.stop_current();
        }
    }
}
