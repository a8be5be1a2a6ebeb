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

//! Wall-clock access for seed rotation.
//!
//! Only the calendar day matters to the runtime, so the clock exposes Unix
//! milliseconds and nothing else. Frame and timer scheduling use the async
//! runtime's monotonic clock instead.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one UTC day.
pub const MILLIS_PER_DAY: u64 = 24 * 3600 * 1000;

/// A source of wall-clock time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn unix_millis(&self) -> u64;

    /// Whole UTC days since the Unix epoch.
    fn calendar_day(&self) -> u64 {
        self.unix_millis() / MILLIS_PER_DAY
    }
}

/// The host's system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_millis(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as u64,
            Err(_) => {
                log::warn!("System clock is before the Unix epoch; using day 0.");
                0
            }
        }
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    millis: u64,
}

impl FixedClock {
    /// A clock frozen at `millis` since the epoch.
    pub fn at_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// A clock frozen at midnight UTC of `day`.
    pub fn on_day(day: u64) -> Self {
        Self {
            millis: day.saturating_mul(MILLIS_PER_DAY),
        }
    }
}

impl Clock for FixedClock {
    fn unix_millis(&self) -> u64 {
        self.millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_day_floors() {
        assert_eq!(FixedClock::at_millis(0).calendar_day(), 0);
        assert_eq!(FixedClock::at_millis(MILLIS_PER_DAY - 1).calendar_day(), 0);
        assert_eq!(FixedClock::at_millis(MILLIS_PER_DAY).calendar_day(), 1);
        assert_eq!(FixedClock::on_day(20_000).calendar_day(), 20_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01 is day 18262.
        assert!(SystemClock.calendar_day() > 18_262);
    }
}
