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

//! A small software mixer rendering noise beds, drones and beeps.
//!
//! The mixer is shared between the owning thread, which adds and removes
//! voices, and the output stream's callback, which pulls samples. It holds no
//! backend state, so it can be driven offline in tests.

use std::f32::consts::TAU;
use telly_core::audio::{BeepSpec, DroneSpec, NoiseColor, NoiseSpec, Waveform};
use telly_core::prng::Mulberry32;

/// Beep attack time in seconds.
const BEEP_ATTACK: f32 = 0.005;
/// Level the beep envelope decays to by the end of its duration.
const BEEP_FLOOR: f32 = 0.0001;
/// Extra tail after a beep's duration before the voice is dropped.
const BEEP_TAIL: f32 = 0.02;

fn waveform_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (phase * TAU).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
}

#[derive(Debug, Clone, Copy)]
struct Osc {
    waveform: Waveform,
    freq: f32,
    level: f32,
    phase: f32,
}

impl Osc {
    fn new(waveform: Waveform, freq: f32, level: f32) -> Self {
        Self {
            waveform,
            freq,
            level,
            phase: 0.0,
        }
    }

    fn next(&mut self, sample_rate: f32) -> f32 {
        let out = waveform_sample(self.waveform, self.phase) * self.level;
        self.phase = (self.phase + self.freq / sample_rate).fract();
        out
    }
}

#[derive(Debug)]
enum Source {
    Noise { color: NoiseColor, last: f32 },
    Drone { oscs: [Osc; 3] },
}

#[derive(Debug)]
struct Voice {
    id: u64,
    gain: f32,
    playing: bool,
    source: Source,
}

#[derive(Debug)]
struct Beep {
    osc: Osc,
    gain: f32,
    duration: f32,
    t: f32,
}

impl Beep {
    fn envelope(&self) -> f32 {
        if self.t < BEEP_ATTACK {
            return self.gain * self.t / BEEP_ATTACK;
        }
        if self.t >= self.duration {
            return 0.0;
        }
        let span = (self.duration - BEEP_ATTACK).max(f32::EPSILON);
        let k = (self.t - BEEP_ATTACK) / span;
        self.gain * (BEEP_FLOOR / self.gain.max(BEEP_FLOOR)).powf(k)
    }

    fn finished(&self) -> bool {
        self.t >= self.duration + BEEP_TAIL
    }
}

/// Mixes every playing voice into interleaved `f32` frames.
#[derive(Debug)]
pub struct Mixer {
    sample_rate: f32,
    master_gain: f32,
    running: bool,
    rng: Mulberry32,
    voices: Vec<Voice>,
    beeps: Vec<Beep>,
}

impl Mixer {
    /// An empty, paused mixer.
    pub fn new(sample_rate: u32, master_gain: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1) as f32,
            master_gain,
            running: false,
            rng: Mulberry32::new(0xA0D1_0000),
            voices: Vec::new(),
            beeps: Vec::new(),
        }
    }

    /// Changes the output rate once the stream is known.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1) as f32;
    }

    /// Pauses or resumes output. A paused mixer renders silence.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Whether the mixer renders anything.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Adds a stopped noise bed under `id`.
    pub fn add_noise(&mut self, id: u64, spec: NoiseSpec) {
        self.voices.push(Voice {
            id,
            gain: spec.gain,
            playing: false,
            source: Source::Noise {
                color: spec.color,
                last: 0.0,
            },
        });
    }

    /// Adds a stopped drone under `id`.
    pub fn add_drone(&mut self, id: u64, spec: DroneSpec) {
        let cents = |c: f32| 2f32.powf(c / 1200.0);
        let upper = spec.root * 2.0;
        let oscs = [
            Osc::new(Waveform::Sine, spec.root, 0.9),
            Osc::new(Waveform::Triangle, upper * cents(spec.detune * 30.0), 0.35),
            Osc::new(Waveform::Triangle, upper * cents(-spec.detune * 30.0), 0.35),
        ];
        self.voices.push(Voice {
            id,
            gain: spec.gain,
            playing: false,
            source: Source::Drone { oscs },
        });
    }

    /// Starts or stops voice `id`. Returns whether it exists.
    pub fn set_playing(&mut self, id: u64, playing: bool) -> bool {
        match self.voices.iter_mut().find(|v| v.id == id) {
            Some(voice) => {
                voice.playing = playing;
                true
            }
            None => false,
        }
    }

    /// Drops voice `id`. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.voices.len();
        self.voices.retain(|v| v.id != id);
        self.voices.len() != before
    }

    /// Queues a one-shot beep.
    pub fn add_beep(&mut self, spec: BeepSpec) {
        self.beeps.push(Beep {
            osc: Osc::new(spec.waveform, spec.freq, 1.0),
            gain: spec.gain,
            duration: spec.duration.max(BEEP_ATTACK),
            t: 0.0,
        });
    }

    /// Number of sustained voices, playing or not.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Number of beeps still sounding.
    pub fn beep_count(&self) -> usize {
        self.beeps.len()
    }

    fn next_sample(&mut self) -> f32 {
        let sr = self.sample_rate;
        let mut sum = 0.0;
        for voice in self.voices.iter_mut().filter(|v| v.playing) {
            let s = match &mut voice.source {
                Source::Noise { color, last } => {
                    let white = self.rng.next_f32() * 2.0 - 1.0;
                    *last = match color {
                        NoiseColor::White => white,
                        NoiseColor::Pink => white * 0.6 + *last * 0.4,
                        NoiseColor::Brown => *last * 0.98 + white * 0.02,
                    };
                    *last
                }
                Source::Drone { oscs } => oscs.iter_mut().map(|o| o.next(sr)).sum(),
            };
            sum += s * voice.gain;
        }
        for beep in &mut self.beeps {
            let env = beep.envelope();
            sum += beep.osc.next(sr) * env;
            beep.t += 1.0 / sr;
        }
        self.beeps.retain(|b| !b.finished());
        (sum * self.master_gain).clamp(-1.0, 1.0)
    }

    /// Fills `out` with interleaved frames of `channels` samples each.
    pub fn mix(&mut self, out: &mut [f32], channels: usize) {
        if !self.running {
            out.fill(0.0);
            return;
        }
        for frame in out.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            frame.fill(s);
        }
    }
}
