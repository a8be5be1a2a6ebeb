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

//! Defines the `ChannelLoader` capability that resolves descriptors to factories.

use super::plugin::PluginFactory;
use super::registry::ChannelDescriptor;
use async_trait::async_trait;

/// Why a channel module could not produce a factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginLoadError {
    /// The loader has no module under this name.
    #[error("channel module not found: {module}")]
    ModuleNotFound {
        /// The requested module key.
        module: String,
    },
    /// The module exists but exports no usable factory.
    #[error("channel module '{module}' does not export a channel factory")]
    MissingFactory {
        /// The requested module key.
        module: String,
    },
    /// Loading failed for another reason (I/O, decoding, ...).
    #[error("failed to load channel module '{module}': {reason}")]
    Failed {
        /// The requested module key.
        module: String,
        /// Backend-specific detail.
        reason: String,
    },
}

/// Resolves a [`ChannelDescriptor`] to a [`PluginFactory`].
///
/// Loading is the one variable-latency step of a channel switch, so it is
/// asynchronous. Implementations may back it with a compiled-in table, a
/// dynamic library or anything else, but they must check what they found and
/// report a typed [`PluginLoadError`] instead of handing back something that
/// cannot construct a channel.
#[async_trait(?Send)]
pub trait ChannelLoader {
    /// Loads the module behind `descriptor`.
    async fn load(&self, descriptor: &ChannelDescriptor) -> Result<PluginFactory, PluginLoadError>;
}
