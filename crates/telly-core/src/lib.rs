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

//! # Telly Core
//!
//! Foundational crate containing the contracts shared by the channel runtime,
//! its backends and the channels themselves: the seeded PRNG, seed
//! derivation, the audio gate, the render surface and the channel lifecycle.

#![warn(missing_docs)]

pub mod audio;
pub mod channel;
pub mod clock;
pub mod event;
pub mod prng;
pub mod render;

pub use audio::{AudioAccessor, AudioResourceOwner};
pub use channel::{ChannelDescriptor, ChannelPlugin, ChannelRegistry, PluginContext};
pub use clock::{Clock, FixedClock, SystemClock};
pub use prng::Mulberry32;
pub use render::{Rgba, Surface, Viewport};
