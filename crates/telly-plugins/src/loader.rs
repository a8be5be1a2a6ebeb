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

//! A compiled-in dispatch table from module keys to channel factories.

use crate::channels;
use async_trait::async_trait;
use std::collections::HashMap;
use telly_core::channel::{ChannelDescriptor, ChannelLoader, PluginFactory, PluginLoadError};

/// Resolves module keys against channels linked into the binary.
#[derive(Debug, Clone, Default)]
pub struct BuiltinLoader {
    factories: HashMap<String, PluginFactory>,
}

impl BuiltinLoader {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every built-in channel.
    pub fn with_builtins() -> Self {
        let mut loader = Self::new();
        loader.register(PluginFactory::new("colorbars", channels::colorbars));
        loader.register(PluginFactory::new("lava", channels::lava));
        loader.register(PluginFactory::new("orbits", channels::orbits));
        loader
    }

    /// Adds or replaces the factory registered under its name.
    pub fn register(&mut self, factory: PluginFactory) {
        let name = factory.name().to_string();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::warn!("Replacing channel module '{name}'.");
        }
    }

    /// Registered module keys, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait(?Send)]
impl ChannelLoader for BuiltinLoader {
    async fn load(&self, descriptor: &ChannelDescriptor) -> Result<PluginFactory, PluginLoadError> {
        log::trace!("Resolving module '{}' for '{}'.", descriptor.module, descriptor.id);
        self.factories
            .get(&descriptor.module)
            .cloned()
            .ok_or_else(|| PluginLoadError::ModuleNotFound {
                module: descriptor.module.clone(),
            })
    }
}
