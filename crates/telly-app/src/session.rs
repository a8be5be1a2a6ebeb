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

//! The interactive headless session.

use anyhow::Result;
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use telly_core::audio::{AudioDevice, AudioResourceOwner};
use telly_core::clock::SystemClock;
use telly_core::event::CommandBus;
use telly_core::render::Viewport;
use telly_infra::{CpalAudioDevice, HeadlessTarget, SilentAudioDevice};
use telly_plugins::{default_registry, BuiltinLoader};
use telly_runtime::{ChannelRuntime, RuntimeCommand, RuntimeConfig};

/// How to start a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// JSON config file.
    pub config: Option<PathBuf>,
    /// Overrides `boot_powered`.
    pub power_on: bool,
    /// Overrides `boot_scanning`.
    pub scan: bool,
    /// Use the silent audio device.
    pub silent: bool,
    /// Screen size.
    pub viewport: Viewport,
}

/// Loads the config file, if any, and applies command-line overrides.
pub fn resolve_config(options: &SessionOptions) -> Result<RuntimeConfig> {
    let mut config = match &options.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    config.boot_powered |= options.power_on;
    config.boot_scanning |= options.scan;
    Ok(config)
}

/// Forwards stdin lines to the bus until EOF, then asks the runtime to quit.
fn spawn_input_reader(sender: flume::Sender<RuntimeCommand>) -> Result<()> {
    thread::Builder::new()
        .name("telly-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Failed to read stdin: {e}");
                        break;
                    }
                };
                for command in RuntimeCommand::parse_line(&line) {
                    if sender.send(command).is_err() {
                        return;
                    }
                }
            }
            log::debug!("Input closed.");
            let _ = sender.send(RuntimeCommand::Quit);
        })?;
    Ok(())
}

/// Runs until `quit` or the end of input.
pub async fn run_session(options: &SessionOptions) -> Result<()> {
    let config = resolve_config(options)?;
    let device: Box<dyn AudioDevice> = if options.silent {
        Box::new(SilentAudioDevice::new())
    } else {
        Box::new(CpalAudioDevice::new(config.audio.master_gain))
    };
    let audio = AudioResourceOwner::new(device, config.audio);
    let mut runtime = ChannelRuntime::new(
        config,
        default_registry()?,
        Box::new(BuiltinLoader::with_builtins()),
        audio,
        Box::new(HeadlessTarget::new(options.viewport)),
        Box::new(SystemClock),
    );

    let bus = CommandBus::new();
    spawn_input_reader(bus.sender())?;
    log::info!("Type 'help' for keys; 'quit' or end of input exits.");

    runtime.boot().await;
    runtime.run(&bus).await;
    Ok(())
}
