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

//! On-screen display view models: the info banner and the channel guide.

use std::fmt;
use tokio::time::Instant;

/// Which overlays are showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    /// Info banner pinned by the user.
    pub show_info: bool,
    /// Channel guide.
    pub show_guide: bool,
    /// Key help.
    pub show_help: bool,
    /// The banner is also shown until this instant after any user action.
    pub flash_until: Option<Instant>,
}

impl Overlays {
    /// Whether the info banner is visible at `now`.
    pub fn info_visible(&self, now: Instant) -> bool {
        self.show_info || self.flash_until.is_some_and(|until| now < until)
    }
}

/// Formats a zero-based index as the two-digit label on the set.
pub fn channel_label(index: usize) -> String {
    format!("CH {:02}", index + 1)
}

/// What the info banner shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsdSnapshot {
    /// `"ON"` or `"OFF"`.
    pub power: &'static str,
    /// `"CH nn"`.
    pub channel: String,
    /// Display name of the channel.
    pub name: String,
    /// `"AUDIO: ON"` or `"AUDIO: OFF"`.
    pub audio: &'static str,
    /// `"SCAN: ON"` or `"SCAN: OFF"`.
    pub scan: &'static str,
    /// Tune buffer while typing, `"CH nn <id>"` otherwise.
    pub status: String,
    /// Seed of the last switch, if any.
    pub seed: Option<u32>,
    /// Whether the banner is up.
    pub visible: bool,
}

impl fmt::Display for OsdSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} | {} | {} | {}",
            self.power, self.channel, self.name, self.audio, self.scan, self.status
        )?;
        if let Some(seed) = self.seed {
            write!(f, " | seed {seed:#010x}")?;
        }
        Ok(())
    }
}

/// One line of the channel guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideEntry {
    /// `"CH nn"`.
    pub number: String,
    /// Display name.
    pub name: String,
    /// Channel id.
    pub id: String,
    /// Whether this is the current channel.
    pub active: bool,
}

impl fmt::Display for GuideEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { '>' } else { ' ' };
        write!(f, "{marker} {}  {}", self.number, self.name)
    }
}
