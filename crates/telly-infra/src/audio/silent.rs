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

//! An audio device that accepts everything and plays nothing.

use anyhow::Result;
use telly_core::audio::{AudioDevice, BeepSpec, DroneSpec, NoiseSpec, Sound, StreamInfo};

struct SilentSound;

impl Sound for SilentSound {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Used for headless sessions and when no output device is wanted.
#[derive(Debug, Default)]
pub struct SilentAudioDevice {
    acquired: bool,
}

impl SilentAudioDevice {
    /// Creates the device.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioDevice for SilentAudioDevice {
    fn acquire(&mut self) -> Result<()> {
        if !self.acquired {
            log::debug!("Silent audio device acquired.");
            self.acquired = true;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.acquire()
    }

    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }

    fn stream_info(&self) -> Option<StreamInfo> {
        None
    }

    fn noise(&mut self, _spec: NoiseSpec) -> Result<Box<dyn Sound>> {
        Ok(Box::new(SilentSound))
    }

    fn drone(&mut self, _spec: DroneSpec) -> Result<Box<dyn Sound>> {
        Ok(Box::new(SilentSound))
    }

    fn beep(&mut self, _spec: BeepSpec) -> Result<()> {
        Ok(())
    }
}
