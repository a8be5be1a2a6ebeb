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

//! The default channel line-up.

use telly_core::channel::{ChannelDescriptor, ChannelRegistry, RegistryError};

/// Descriptors for the built-in channels, in tuning order.
pub fn catalog() -> Vec<ChannelDescriptor> {
    vec![
        ChannelDescriptor::new("testcard", "Test Card", "colorbars"),
        ChannelDescriptor::new("lava", "Lava Lamp", "lava"),
        ChannelDescriptor::new("orbits", "Orbital Desktoy", "orbits"),
    ]
}

/// A registry over [`catalog`].
pub fn default_registry() -> Result<ChannelRegistry, RegistryError> {
    ChannelRegistry::new(catalog())
}
