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

//! # Telly Runtime
//!
//! The orchestrator of the set: power, numeric tuning, scan mode, the noise
//! barrier between channels and the lifecycle of the one hosted channel.
//!
//! The runtime is single-threaded and cooperative. It only suspends inside a
//! channel switch (the barrier and the module load) and everything else runs
//! to completion between frames.

#![warn(missing_docs)]

pub mod command;
pub mod config;
mod error;
pub mod guard;
pub mod osd;
mod runtime;
pub mod state;
pub mod timer;
pub mod transition;

pub use command::RuntimeCommand;
pub use config::{ConfigError, RuntimeConfig};
pub use error::RuntimeError;
pub use guard::{Hook, PluginFault};
pub use osd::{GuideEntry, OsdSnapshot};
pub use runtime::{ActiveChannelInfo, ChannelRuntime, RuntimeStats, TimerAction};
pub use state::{Phase, RuntimeState, TuneError};
pub use transition::TransitionController;
