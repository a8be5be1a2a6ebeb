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

//! Commands accepted by the runtime and how input maps onto them.

use std::fmt;
use std::str::FromStr;
use telly_core::render::Viewport;

/// One request for the runtime's state machine.
///
/// Every input source (keyboard, remote buttons, scripted tests) is reduced
/// to these and fed to [`ChannelRuntime::handle`](crate::ChannelRuntime::handle).
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    /// Power on or off.
    PowerToggle,
    /// Step up (`+1`) or down (`-1`) through the channel list.
    ChannelStep(i8),
    /// Append a digit to the tune buffer.
    Digit(u8),
    /// Tune to the number in the buffer.
    ConfirmTune,
    /// Remove the last digit from the tune buffer.
    BackspaceTune,
    /// Enable or disable audio. Always user-initiated.
    ToggleAudio,
    /// Enable or disable scan mode.
    ToggleScan,
    /// Show or hide the OSD.
    ToggleInfo,
    /// Show or hide the channel guide.
    ToggleGuide,
    /// Show or hide the key help.
    ToggleHelp,
    /// The display changed size.
    Resize(Viewport),
    /// Leave the run loop.
    Quit,
}

/// Key bindings, for help screens.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("space / power", "power on/off"),
    ("+ / up", "channel up"),
    ("- / down", "channel down"),
    ("0-9", "enter channel number"),
    ("enter", "tune to entered number"),
    ("back", "delete last digit"),
    ("a / audio", "audio on/off"),
    ("s / scan", "scan mode on/off"),
    ("i / info", "on-screen display on/off"),
    ("g / guide", "channel guide on/off"),
    ("h / ? / help", "this help"),
    ("resize W H [DPR]", "change the display size"),
    ("q / quit", "quit"),
];

/// A word that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}'")]
pub struct CommandParseError(pub String);

impl RuntimeCommand {
    /// Maps a single key to a command.
    pub fn from_key(key: char) -> Option<Self> {
        let cmd = match key {
            ' ' => Self::PowerToggle,
            '+' | '=' => Self::ChannelStep(1),
            '-' | '_' => Self::ChannelStep(-1),
            '0'..='9' => Self::Digit(key as u8 - b'0'),
            'a' | 'A' => Self::ToggleAudio,
            's' | 'S' => Self::ToggleScan,
            'i' | 'I' => Self::ToggleInfo,
            'g' | 'G' => Self::ToggleGuide,
            'h' | 'H' | '?' => Self::ToggleHelp,
            'q' | 'Q' => Self::Quit,
            _ => return None,
        };
        Some(cmd)
    }

    /// Whether this command came from a person rather than a timer.
    pub fn is_user_input(&self) -> bool {
        !matches!(self, Self::Resize(_) | Self::Quit)
    }

    /// Parses one line of input.
    ///
    /// A line is either a command word (`power`, `up`, `resize 800 600`, ...)
    /// or a run of key characters such as `12` or `+ a`. Unknown keys are
    /// skipped.
    pub fn parse_line(line: &str) -> Vec<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // A bare newline is the enter key.
            return vec![Self::ConfirmTune];
        }
        if let Ok(cmd) = trimmed.parse::<Self>() {
            return vec![cmd];
        }
        trimmed.chars().filter_map(Self::from_key).collect()
    }
}

impl FromStr for RuntimeCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().unwrap_or_default().to_ascii_lowercase();
        let cmd = match head.as_str() {
            "power" => Self::PowerToggle,
            "up" => Self::ChannelStep(1),
            "down" => Self::ChannelStep(-1),
            "enter" | "ok" => Self::ConfirmTune,
            "back" | "backspace" => Self::BackspaceTune,
            "audio" => Self::ToggleAudio,
            "scan" => Self::ToggleScan,
            "info" => Self::ToggleInfo,
            "guide" => Self::ToggleGuide,
            "help" => Self::ToggleHelp,
            "quit" | "exit" => Self::Quit,
            "resize" => {
                let mut next_num = || words.next().and_then(|w| w.parse::<f32>().ok());
                match (next_num(), next_num()) {
                    (Some(w), Some(h)) if side_in_range(w) && side_in_range(h) => {
                        let dpr = next_num().unwrap_or(1.0);
                        Self::Resize(Viewport::new(w as u32, h as u32, dpr))
                    }
                    _ => return Err(CommandParseError(s.to_string())),
                }
            }
            _ => return Err(CommandParseError(s.to_string())),
        };
        Ok(cmd)
    }
}

fn side_in_range(side: f32) -> bool {
    (1.0..=Viewport::MAX_SIDE as f32).contains(&side)
}

impl fmt::Display for RuntimeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerToggle => write!(f, "power"),
            Self::ChannelStep(d) if *d >= 0 => write!(f, "up"),
            Self::ChannelStep(_) => write!(f, "down"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::ConfirmTune => write!(f, "enter"),
            Self::BackspaceTune => write!(f, "back"),
            Self::ToggleAudio => write!(f, "audio"),
            Self::ToggleScan => write!(f, "scan"),
            Self::ToggleInfo => write!(f, "info"),
            Self::ToggleGuide => write!(f, "guide"),
            Self::ToggleHelp => write!(f, "help"),
            Self::Resize(vp) => write!(f, "resize {} {} {}", vp.width, vp.height, vp.dpr),
            Self::Quit => write!(f, "quit"),
        }
    }
}
