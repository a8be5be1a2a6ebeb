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

//! # Telly App
//!
//! Glue behind the `telly` binary: argument parsing, the interactive
//! session and the capture tool.

#![warn(missing_docs)]

pub mod capture;
pub mod cli;
pub mod session;

pub use capture::{capture, CaptureEntry, CaptureOptions, CaptureReport};
pub use session::{resolve_config, run_session, SessionOptions};
