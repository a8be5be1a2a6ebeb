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

//! Sound handles produced by an [`AudioDevice`](super::AudioDevice).

use std::fmt;

/// Identifies one sound handle for the lifetime of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundId(pub u64);

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sound#{}", self.0)
    }
}

/// A backend sound that can be started and stopped.
pub trait Sound {
    /// Begins playback.
    fn start(&mut self) -> anyhow::Result<()>;

    /// Ends playback. Called at most once per sound by [`SoundHandle`].
    fn stop(&mut self) -> anyhow::Result<()>;
}

/// A move-only handle to a playing (or startable) sound.
///
/// Dropping a handle that was never stopped stops it, so a sound cannot
/// outlive every reference to it.
pub struct SoundHandle {
    id: SoundId,
    sound: Box<dyn Sound>,
    stopped: bool,
}

impl SoundHandle {
    /// Wraps a backend sound.
    pub fn new(id: SoundId, sound: Box<dyn Sound>) -> Self {
        Self {
            id,
            sound,
            stopped: false,
        }
    }

    /// This handle's id.
    pub fn id(&self) -> SoundId {
        self.id
    }

    /// Starts playback.
    pub fn start(&mut self) -> anyhow::Result<()> {
        self.sound.start()
    }

    /// Stops playback and consumes the handle.
    pub fn stop(mut self) -> anyhow::Result<()> {
        self.stop_once()
    }

    fn stop_once(&mut self) -> anyhow::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        self.sound.stop()
    }
}

impl fmt::Debug for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundHandle")
            .field("id", &self.id)
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl Drop for SoundHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop_once() {
            log::warn!("Failed to stop {} on drop: {e}", self.id);
        }
    }
}
