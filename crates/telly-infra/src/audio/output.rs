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

//! Contains the `CpalAudioDevice` struct.

use super::mixer::Mixer;
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use telly_core::audio::{AudioDevice, BeepSpec, DroneSpec, NoiseSpec, Sound, StreamInfo};

type SharedMixer = Arc<Mutex<Mixer>>;

fn lock(mixer: &SharedMixer) -> Result<std::sync::MutexGuard<'_, Mixer>> {
    mixer.lock().map_err(|_| anyhow!("audio mixer lock poisoned"))
}

/// A voice in the shared mixer, started and stopped from the owning thread.
struct MixerSound {
    id: u64,
    mixer: SharedMixer,
}

impl Sound for MixerSound {
    fn start(&mut self) -> Result<()> {
        if !lock(&self.mixer)?.set_playing(self.id, true) {
            return Err(anyhow!("voice {} no longer exists", self.id));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        lock(&self.mixer)?.remove(self.id);
        Ok(())
    }
}

/// An `AudioDevice` implementation that plays through the host's default
/// output device via CPAL.
///
/// The stream is opened lazily on the first `acquire` and kept until the
/// device is dropped.
pub struct CpalAudioDevice {
    mixer: SharedMixer,
    stream: Option<cpal::Stream>,
    info: Option<StreamInfo>,
    next_voice: u64,
}

impl CpalAudioDevice {
    /// Creates a new instance of the CPAL audio device backend.
    pub fn new(master_gain: f32) -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new(48_000, master_gain))),
            stream: None,
            info: None,
            next_voice: 1,
        }
    }

    fn open_stream(&mut self) -> Result<()> {
        // Set up the CPAL audio stream.
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available"))?;
        let config = device.default_output_config()?;

        let stream_info = StreamInfo {
            channels: config.channels(),
            sample_rate: config.sample_rate(),
        };
        lock(&self.mixer)?.set_sample_rate(stream_info.sample_rate);

        let mixer = Arc::clone(&self.mixer);
        let channels = usize::from(stream_info.channels);
        let audio_callback = move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
            match mixer.lock() {
                Ok(mut mixer) => mixer.mix(output_buffer, channels),
                Err(_) => output_buffer.fill(0.0),
            }
        };

        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {}", err);
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                device.build_output_stream(&config.into(), audio_callback, error_callback, None)?
            }
            format => return Err(anyhow!("Unsupported sample format: {}", format)),
        };

        log::info!(
            "Audio stream opened: {} channels at {} Hz.",
            stream_info.channels,
            stream_info.sample_rate
        );
        self.stream = Some(stream);
        self.info = Some(stream_info);
        Ok(())
    }

    fn next_voice(&mut self) -> u64 {
        let id = self.next_voice;
        self.next_voice += 1;
        id
    }
}

impl AudioDevice for CpalAudioDevice {
    fn acquire(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.open_stream()
    }

    fn resume(&mut self) -> Result<()> {
        self.acquire()?;
        if let Some(stream) = &self.stream {
            stream.play()?;
        }
        lock(&self.mixer)?.set_running(true);
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        lock(&self.mixer)?.set_running(false);
        if let Some(stream) = &self.stream {
            stream.pause()?;
        }
        Ok(())
    }

    fn stream_info(&self) -> Option<StreamInfo> {
        self.info
    }

    fn noise(&mut self, spec: NoiseSpec) -> Result<Box<dyn Sound>> {
        let id = self.next_voice();
        lock(&self.mixer)?.add_noise(id, spec);
        Ok(Box::new(MixerSound {
            id,
            mixer: Arc::clone(&self.mixer),
        }))
    }

    fn drone(&mut self, spec: DroneSpec) -> Result<Box<dyn Sound>> {
        let id = self.next_voice();
        lock(&self.mixer)?.add_drone(id, spec);
        Ok(Box::new(MixerSound {
            id,
            mixer: Arc::clone(&self.mixer),
        }))
    }

    fn beep(&mut self, spec: BeepSpec) -> Result<()> {
        lock(&self.mixer)?.add_beep(spec);
        Ok(())
    }
}

impl Drop for CpalAudioDevice {
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            log::info!("Audio stream closed.");
        }
    }
}
