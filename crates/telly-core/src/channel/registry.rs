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

//! The immutable, ordered channel catalog.

use std::collections::HashSet;
use std::fmt;

/// One selectable channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    /// Stable, unique identifier (also part of the seed).
    pub id: String,
    /// Human-readable name shown on the OSD and in the guide.
    pub display_name: String,
    /// Key the [`ChannelLoader`](super::ChannelLoader) resolves to a factory.
    pub module: String,
}

impl ChannelDescriptor {
    /// Builds a descriptor.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for ChannelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Errors raised when building or indexing a [`ChannelRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A registry needs at least one channel.
    #[error("channel registry is empty")]
    Empty,
    /// Two descriptors share an id.
    #[error("duplicate channel id '{0}'")]
    DuplicateId(String),
    /// An index outside `[0, len)`.
    #[error("channel index {index} out of range (0..{len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of channels.
        len: usize,
    },
}

/// Ordered, read-only list of channels, fixed at construction.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Vec<ChannelDescriptor>,
}

impl ChannelRegistry {
    /// Builds a registry. Fails on an empty list or duplicate ids.
    pub fn new(channels: Vec<ChannelDescriptor>) -> Result<Self, RegistryError> {
        if channels.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::with_capacity(channels.len());
        for ch in &channels {
            if !seen.insert(ch.id.as_str()) {
                return Err(RegistryError::DuplicateId(ch.id.clone()));
            }
        }
        Ok(Self { channels })
    }

    /// All channels in order.
    pub fn all(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    /// The channel at `index`.
    pub fn get(&self, index: usize) -> Result<&ChannelDescriptor, RegistryError> {
        self.channels
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange {
                index,
                len: self.channels.len(),
            })
    }

    /// Number of channels; always at least one.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Index of the channel with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|ch| ch.id == id)
    }
}
