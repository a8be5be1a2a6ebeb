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

//! Runtime configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. Nothing is ever written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use telly_core::audio::AudioSettings;

/// Errors raised while loading a [`RuntimeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Timing and boot behaviour of the channel runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Scan-mode auto-advance period.
    pub scan_period_ms: u64,
    /// Idle time after the last keystroke before the tune buffer clears.
    pub tune_idle_ms: u64,
    /// Maximum digits in the tune buffer.
    pub tune_max_digits: usize,
    /// Noise barrier length for ordinary channel changes.
    pub barrier_ms: u64,
    /// Noise barrier length when powering on.
    pub boot_barrier_ms: u64,
    /// Target frame period.
    pub frame_interval_ms: u64,
    /// Upper bound on the `dt` handed to channels.
    pub max_frame_dt_ms: u64,
    /// How long the OSD stays up after a user action.
    pub osd_flash_ms: u64,
    /// Power on at boot.
    pub boot_powered: bool,
    /// Start with scan mode on.
    pub boot_scanning: bool,
    /// Audio policy.
    pub audio: AudioSettings,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: 30_000,
            tune_idle_ms: 1_500,
            tune_max_digits: 3,
            barrier_ms: 520,
            boot_barrier_ms: 700,
            frame_interval_ms: 16,
            max_frame_dt_ms: 50,
            osd_flash_ms: 1_200,
            boot_powered: false,
            boot_scanning: false,
            audio: AudioSettings::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded runtime config from '{}'.", path.display());
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("frame_interval_ms must be > 0".into()));
        }
        if self.scan_period_ms == 0 {
            return Err(ConfigError::Invalid("scan_period_ms must be > 0".into()));
        }
        if !(1..=9).contains(&self.tune_max_digits) {
            return Err(ConfigError::Invalid(format!(
                "tune_max_digits must be within 1..=9, got {}",
                self.tune_max_digits
            )));
        }
        if !(0.0..=4.0).contains(&self.audio.master_gain) {
            return Err(ConfigError::Invalid(format!(
                "audio.master_gain must be within 0..=4, got {}",
                self.audio.master_gain
            )));
        }
        Ok(())
    }

    /// Scan period as a `Duration`.
    pub fn scan_period(&self) -> Duration {
        Duration::from_millis(self.scan_period_ms)
    }

    /// Tune idle timeout as a `Duration`.
    pub fn tune_idle(&self) -> Duration {
        Duration::from_millis(self.tune_idle_ms)
    }

    /// Ordinary barrier length.
    pub fn barrier(&self) -> Duration {
        Duration::from_millis(self.barrier_ms)
    }

    /// Power-on barrier length.
    pub fn boot_barrier(&self) -> Duration {
        Duration::from_millis(self.boot_barrier_ms)
    }

    /// Frame period.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// `dt` clamp in seconds.
    pub fn max_frame_dt(&self) -> f32 {
        self.max_frame_dt_ms as f32 / 1000.0
    }

    /// OSD flash length.
    pub fn osd_flash(&self) -> Duration {
        Duration::from_millis(self.osd_flash_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_tv() {
        let c = RuntimeConfig::default();
        assert_eq!(c.scan_period(), Duration::from_secs(30));
        assert_eq!(c.tune_idle(), Duration::from_millis(1500));
        assert_eq!(c.tune_max_digits, 3);
        assert!(!c.boot_powered);
        assert!(c.audio.require_gesture);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = RuntimeConfig::from_json(r#"{ "scan_period_ms": 5000, "audio": { "master_gain": 0.3 } }"#)
            .unwrap();
        assert_eq!(c.scan_period_ms, 5000);
        assert_eq!(c.barrier_ms, 520);
        assert_eq!(c.audio.master_gain, 0.3);
        assert!(c.audio.require_gesture);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = RuntimeConfig::from_json(r#"{ "tune_max_digits": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = RuntimeConfig::from_json(r#"{ "frame_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            RuntimeConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "boot_powered": true, "boot_scanning": true }}"#).unwrap();
        let c = RuntimeConfig::load(file.path()).unwrap();
        assert!(c.boot_powered);
        assert!(c.boot_scanning);

        let missing = RuntimeConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
