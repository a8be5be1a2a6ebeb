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

//! Audio contracts and the single-owner audio gate.

pub mod device;
mod owner;
mod sound;

pub use device::{
    AudioDevice, BeepSpec, DroneSpec, NoiseColor, NoiseSpec, StreamInfo, Waveform,
};
pub use owner::{AudioAccessor, AudioResourceOwner, AudioSettings, UserGesture};
pub use sound::{Sound, SoundHandle, SoundId};

/// Why audio could not be made available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// The platform requires a user gesture before output may start.
    #[error("audio unavailable: a user gesture is required")]
    GestureRequired,
    /// The backend failed to open, resume or create a sound.
    #[error("audio unavailable: {0}")]
    Device(String),
}
