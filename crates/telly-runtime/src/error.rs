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

use crate::guard::PluginFault;
use telly_core::channel::{PluginLoadError, RegistryError};

/// Errors surfaced by runtime operations.
///
/// None of these stop the runtime. A failed switch leaves it powered with no
/// active channel.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The registry rejected an index.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The channel module could not be resolved.
    #[error("failed to load channel: {0}")]
    Load(#[from] PluginLoadError),
    /// The factory or `init` failed.
    #[error("failed to start channel: {0}")]
    Instantiate(#[from] PluginFault),
    /// The operation needs the set to be on.
    #[error("the set is powered off")]
    PoweredOff,
}
