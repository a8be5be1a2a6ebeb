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

//! # Telly Plugins
//!
//! The channels that ship with the runtime, and the [`BuiltinLoader`] that
//! resolves registry entries to them without any dynamic loading.

#![warn(missing_docs)]

pub mod catalog;
pub mod channels;
mod loader;

pub use catalog::{catalog, default_registry};
pub use loader::BuiltinLoader;
