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

//! The runtime's mutable state record and tune-buffer rules.

use std::fmt;

/// Observable phase of the state machine.
///
/// Scan mode is orthogonal: it is a flag on [`RuntimeState`], not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Powered off; no channel instance exists.
    Off,
    /// Powered on, nothing being typed.
    Idle,
    /// Powered on with digits in the tune buffer.
    Tuning,
    /// A barrier and channel swap are in flight.
    Transitioning,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Off => "OFF",
            Phase::Idle => "ON_IDLE",
            Phase::Tuning => "ON_TUNING",
            Phase::Transitioning => "TRANSITIONING",
        };
        f.write_str(name)
    }
}

/// The process-wide state owned by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeState {
    /// Whether the set is on.
    pub powered: bool,
    /// Index of the current (or last attempted) channel, always in range.
    pub current_index: usize,
    /// Pending numeric entry.
    pub tune_buffer: String,
    /// Scan mode flag.
    pub scanning: bool,
    /// Mirror of the audio owner's enabled flag.
    pub audio_enabled: bool,
}

impl RuntimeState {
    /// Appends `digit` if there is room. Returns whether it was accepted.
    pub fn push_digit(&mut self, digit: u8, max_digits: usize) -> bool {
        if digit > 9 || self.tune_buffer.len() >= max_digits {
            return false;
        }
        self.tune_buffer.push(char::from(b'0' + digit));
        true
    }

    /// Removes the last digit, if any.
    pub fn backspace(&mut self) {
        self.tune_buffer.pop();
    }
}

/// Why a tune entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TuneError {
    /// Nothing was typed.
    #[error("tune buffer is empty")]
    Empty,
    /// The buffer is not a number.
    #[error("'{0}' is not a channel number")]
    NotANumber(String),
    /// The number is not a channel.
    #[error("channel {value} does not exist (1..={max})")]
    OutOfRange {
        /// The parsed number.
        value: u32,
        /// Highest valid channel number.
        max: usize,
    },
}

/// Turns a tune buffer into a zero-based channel index.
///
/// Channel numbers are one-based, so `"01"` is index 0 and `"00"` is invalid.
pub fn parse_tune(buffer: &str, channel_count: usize) -> Result<usize, TuneError> {
    if buffer.is_empty() {
        return Err(TuneError::Empty);
    }
    let value: u32 = buffer
        .parse()
        .map_err(|_| TuneError::NotANumber(buffer.to_string()))?;
    if value == 0 || value as usize > channel_count {
        return Err(TuneError::OutOfRange {
            value,
            max: channel_count,
        });
    }
    Ok(value as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_caps_at_max_digits() {
        let mut s = RuntimeState::default();
        assert!(s.push_digit(1, 3));
        assert!(s.push_digit(2, 3));
        assert!(s.push_digit(3, 3));
        assert!(!s.push_digit(4, 3));
        assert_eq!(s.tune_buffer, "123");
        assert!(!s.push_digit(10, 5));
        s.backspace();
        assert_eq!(s.tune_buffer, "12");
    }

    #[test]
    fn parse_tune_bounds() {
        assert_eq!(parse_tune("01", 5), Ok(0));
        assert_eq!(parse_tune("5", 5), Ok(4));
        assert_eq!(parse_tune("00", 5), Err(TuneError::OutOfRange { value: 0, max: 5 }));
        assert_eq!(parse_tune("999", 5), Err(TuneError::OutOfRange { value: 999, max: 5 }));
        assert_eq!(parse_tune("", 5), Err(TuneError::Empty));
        assert!(matches!(parse_tune("x1", 5), Err(TuneError::NotANumber(_))));
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Tuning.to_string(), "ON_TUNING");
    }
}
