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

//! Headless capture of every channel to PNG.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use telly_core::audio::AudioResourceOwner;
use telly_core::clock::{Clock, FixedClock, SystemClock};
use telly_core::render::Viewport;
use telly_infra::{render::write_png, HeadlessTarget, SilentAudioDevice};
use telly_plugins::{default_registry, BuiltinLoader};
use telly_runtime::{ChannelRuntime, RuntimeConfig};
use tokio::time::Instant;

/// What to capture.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Output directory, created if missing.
    pub out: PathBuf,
    /// Frames to run on each channel before the snapshot.
    pub frames: u32,
    /// UTC day used for seeding. `None` means today.
    pub day: Option<u64>,
    /// Restrict the capture to one channel id.
    pub channel: Option<String>,
    /// Screen size.
    pub viewport: Viewport,
}

/// One captured channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEntry {
    /// One-based channel number.
    pub number: usize,
    /// Channel id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Seed the channel ran with.
    pub seed: u32,
    /// PNG file name inside the output directory, if the channel came up.
    pub file: Option<String>,
    /// Hook failures while it ran.
    pub faults: u32,
    /// Why the channel could not be tuned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The `report.json` written next to the images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureReport {
    /// UTC day used for seeding.
    pub day: u64,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Frames run per channel.
    pub frames: u32,
    /// Captured channels in tuning order.
    pub channels: Vec<CaptureEntry>,
}

/// File-system-safe form of a channel id.
pub fn slug(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "channel".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Tunes to each channel in turn, runs it and writes its last frame.
pub async fn capture(options: &CaptureOptions) -> Result<CaptureReport> {
    let registry = default_registry()?;
    let indices: Vec<usize> = match &options.channel {
        Some(id) => match registry.position(id) {
            Some(index) => vec![index],
            None => bail!("unknown channel '{id}'"),
        },
        None => (0..registry.len()).collect(),
    };

    fs::create_dir_all(&options.out)
        .with_context(|| format!("Failed to create '{}'", options.out.display()))?;

    let day = options.day.unwrap_or_else(|| SystemClock.calendar_day());
    let config = RuntimeConfig {
        barrier_ms: 0,
        boot_barrier_ms: 0,
        ..RuntimeConfig::default()
    };
    let frame_interval = config.frame_interval();
    let audio = AudioResourceOwner::new(Box::new(SilentAudioDevice::new()), config.audio);
    let mut runtime = ChannelRuntime::new(
        config,
        registry.clone(),
        Box::new(BuiltinLoader::with_builtins()),
        audio,
        Box::new(HeadlessTarget::new(options.viewport)),
        Box::new(FixedClock::on_day(day)),
    );
    log::info!(
        "Capturing {} channel(s) for day {day} at {}x{}.",
        indices.len(),
        options.viewport.width,
        options.viewport.height
    );

    // Power-on tunes channel 1. Each channel below still gets a fresh switch.
    if let Err(e) = runtime.toggle_power().await {
        log::warn!("Initial tune-in failed: {e}");
    }

    // Frames are stamped on a virtual clock so every channel sees the same
    // sequence of dt values regardless of how long switching took.
    let mut now = Instant::now();
    let mut entries = Vec::with_capacity(indices.len());
    for index in indices {
        let descriptor = registry.get(index)?.clone();
        let seed = telly_core::channel::derive_seed(&descriptor.id, index, day);
        let mut entry = CaptureEntry {
            number: index + 1,
            id: descriptor.id.clone(),
            name: descriptor.display_name.clone(),
            seed,
            file: None,
            faults: 0,
            error: None,
        };

        if let Err(e) = runtime.switch_to(index).await {
            log::warn!("Skipping '{}': {e}", descriptor.id);
            entry.error = Some(e.to_string());
            entries.push(entry);
            continue;
        }
        drive_frames(&mut runtime, &mut now, options.frames, frame_interval).await;

        let file = format!("{:02}-{}.png", index + 1, slug(&descriptor.id));
        write_png(runtime.target_mut().screen(), options.out.join(&file))?;
        if let Some(active) = runtime.active_channel() {
            entry.seed = active.seed;
            entry.faults = active.faults;
        }
        log::info!("Captured {} ({}) -> {file}", descriptor.display_name, descriptor.id);
        entry.file = Some(file);
        entries.push(entry);
    }
    runtime.shutdown();

    let report = CaptureReport {
        day,
        width: options.viewport.width,
        height: options.viewport.height,
        frames: options.frames,
        channels: entries,
    };
    write_report(&options.out.join("report.json"), &report)?;
    Ok(report)
}

async fn drive_frames(
    runtime: &mut ChannelRuntime,
    now: &mut Instant,
    frames: u32,
    interval: Duration,
) {
    for _ in 0..frames {
        *now += interval;
        runtime.tick(*now).await;
    }
}

fn write_report(path: &Path, report: &CaptureReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}
