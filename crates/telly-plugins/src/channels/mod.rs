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

//! The built-in channels.
//!
//! Each channel is built only from its [`PluginContext`]: the seed drives
//! every random choice and the audio accessor is its only way to make sound.

mod ambience;
mod colorbars;
mod lava;
mod orbits;
pub mod paint;

use anyhow::Result;
use telly_core::{ChannelPlugin, PluginContext};

pub use colorbars::ColorBars;
pub use lava::Lava;
pub use orbits::Orbits;

pub(crate) fn colorbars(context: PluginContext) -> Result<Box<dyn ChannelPlugin>> {
    Ok(Box::new(ColorBars::new(context)))
}

pub(crate) fn lava(context: PluginContext) -> Result<Box<dyn ChannelPlugin>> {
    Ok(Box::new(Lava::new(context)))
}

pub(crate) fn orbits(context: PluginContext) -> Result<Box<dyn ChannelPlugin>> {
    Ok(Box::new(Orbits::new(context)))
}
