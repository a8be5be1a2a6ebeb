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

use anyhow::Result;
use clap::Parser;
use telly_app::cli::{Cli, Command, ScreenArgs};
use telly_app::{capture, run_session, CaptureOptions, SessionOptions};
use telly_core::render::Viewport;

fn viewport(screen: ScreenArgs) -> Viewport {
    Viewport::new(screen.width.max(1), screen.height.max(1), 1.0)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("cpal", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    // The runtime is single-threaded; everything runs on this thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Run(args) => {
            let options = SessionOptions {
                config: args.config,
                power_on: args.power_on,
                scan: args.scan,
                silent: args.silent,
                viewport: viewport(args.screen),
            };
            runtime.block_on(run_session(&options))
        }
        Command::Capture(args) => {
            let options = CaptureOptions {
                out: args.out,
                frames: args.frames,
                day: args.day,
                channel: args.channel,
                viewport: viewport(args.screen),
            };
            let report = runtime.block_on(capture(&options))?;
            log::info!(
                "Wrote {} capture(s) to '{}'.",
                report.channels.iter().filter(|c| c.file.is_some()).count(),
                options.out.display()
            );
            Ok(())
        }
    }
}
