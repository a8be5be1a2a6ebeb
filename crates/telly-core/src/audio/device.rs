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

//! Defines the abstract `AudioDevice` trait and the sound descriptions it accepts.

use super::sound::Sound;
use anyhow::Result;

/// A struct providing information about the audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// The number of channels (e.g., 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

/// Spectral colour of a looping noise source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseColor {
    /// Flat spectrum.
    #[default]
    White,
    /// One-pole smoothed white noise.
    Pink,
    /// Leaky-integrated white noise.
    Brown,
}

/// Oscillator shape for tones and beeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    /// Pure sine.
    #[default]
    Sine,
    /// Square wave.
    Square,
    /// Triangle wave.
    Triangle,
    /// Rising sawtooth.
    Sawtooth,
}

/// A looping noise bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    /// Noise colour.
    pub color: NoiseColor,
    /// Linear output gain.
    pub gain: f32,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            color: NoiseColor::White,
            gain: 0.08,
        }
    }
}

impl NoiseSpec {
    /// Noise of the given colour at the default gain.
    pub fn colored(color: NoiseColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Returns a copy with `gain` applied.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}

/// A sustained three-oscillator drone: one sine at `root` and two detuned
/// triangles an octave above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneSpec {
    /// Fundamental frequency in Hz.
    pub root: f32,
    /// Detune amount; each unit is 30 cents.
    pub detune: f32,
    /// Linear output gain.
    pub gain: f32,
}

impl Default for DroneSpec {
    fn default() -> Self {
        Self {
            root: 110.0,
            detune: 0.7,
            gain: 0.06,
        }
    }
}

/// A short enveloped blip (tuning beeps, clicks, error cues).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeepSpec {
    /// Frequency in Hz.
    pub freq: f32,
    /// Duration in seconds, attack included.
    pub duration: f32,
    /// Peak linear gain.
    pub gain: f32,
    /// Oscillator shape.
    pub waveform: Waveform,
}

impl Default for BeepSpec {
    fn default() -> Self {
        Self {
            freq: 880.0,
            duration: 0.06,
            gain: 0.06,
            waveform: Waveform::Sine,
        }
    }
}

impl BeepSpec {
    /// A sine beep.
    pub fn new(freq: f32, duration: f32, gain: f32) -> Self {
        Self {
            freq,
            duration,
            gain,
            waveform: Waveform::Sine,
        }
    }

    /// Returns a copy using `waveform`.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }
}

/// The abstract contract for a hardware audio device backend.
///
/// This trait is the boundary between the runtime's audio ownership rules and
/// the platform-specific infrastructure that talks to the sound card. The
/// runtime never reaches the backend directly; everything goes through
/// [`AudioResourceOwner`](super::AudioResourceOwner).
///
/// Implementations are owned by a single thread and need not be `Send`.
pub trait AudioDevice {
    /// Lazily creates the output stream. Must be idempotent.
    fn acquire(&mut self) -> Result<()>;

    /// Starts or resumes playback, acquiring the stream first if needed.
    fn resume(&mut self) -> Result<()>;

    /// Pauses playback without releasing the stream.
    fn suspend(&mut self) -> Result<()>;

    /// Information about the open stream, if any.
    fn stream_info(&self) -> Option<StreamInfo>;

    /// Creates a looping noise source. The source is silent until started.
    fn noise(&mut self, spec: NoiseSpec) -> Result<Box<dyn Sound>>;

    /// Creates a drone. The drone is silent until started.
    fn drone(&mut self, spec: DroneSpec) -> Result<Box<dyn Sound>>;

    /// Plays a one-shot beep. Fire-and-forget.
    fn beep(&mut self, spec: BeepSpec) -> Result<()>;
}
