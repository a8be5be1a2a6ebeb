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

//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A simulated multi-channel television.
#[derive(Debug, Parser)]
#[command(name = "telly", version, about)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// The `telly` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs an interactive session driven by commands on stdin.
    Run(RunArgs),
    /// Tunes to every channel and writes one PNG per channel plus a report.
    Capture(CaptureArgs),
}

/// Screen size shared by both commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct ScreenArgs {
    /// Screen width in pixels.
    #[arg(long, default_value_t = 960)]
    pub width: u32,
    /// Screen height in pixels.
    #[arg(long, default_value_t = 540)]
    pub height: u32,
}

/// Options for `telly run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON runtime configuration; missing keys use defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Power on at start.
    #[arg(long)]
    pub power_on: bool,
    /// Start with scan mode on.
    #[arg(long)]
    pub scan: bool,
    /// Do not open an audio output device.
    #[arg(long)]
    pub silent: bool,
    /// Screen size.
    #[command(flatten)]
    pub screen: ScreenArgs,
}

/// Options for `telly capture`.
#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Directory for the PNGs and report.json.
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,
    /// Frames to run on each channel before capturing.
    #[arg(long, default_value_t = 90)]
    pub frames: u32,
    /// UTC day number used for seeding; defaults to today.
    #[arg(long)]
    pub day: Option<u64>,
    /// Capture only the channel with this id.
    #[arg(long, value_name = "ID")]
    pub channel: Option<String>,
    /// Screen size.
    #[command(flatten)]
    pub screen: ScreenArgs,
}
