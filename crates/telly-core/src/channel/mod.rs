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

//! Channel contracts: descriptors, the registry, the plugin lifecycle and
//! the loader that resolves one to the other.

mod loader;
mod plugin;
mod registry;
pub mod seed;

pub use loader::{ChannelLoader, PluginLoadError};
pub use plugin::{ChannelPlugin, PluginContext, PluginFactory};
pub use registry::{ChannelDescriptor, ChannelRegistry, RegistryError};
pub use seed::{derive_seed, seed_for_channel};
