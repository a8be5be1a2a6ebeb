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

//! Lava lamp: slow blobs drifting through a warm gradient over brown noise.

use super::ambience::Ambience;
use super::paint::{hsl, soft_circle, vertical_gradient};
use anyhow::Result;
use telly_core::audio::{NoiseColor, NoiseSpec};
use telly_core::prng::{clamp, Mulberry32};
use telly_core::render::{Rgba, Surface, Viewport};
use telly_core::{ChannelPlugin, PluginContext};

const BLOBS: usize = 7;
/// Blob radii are authored against a 540 px tall screen.
const REFERENCE_HEIGHT: f32 = 540.0;
/// Length of the calm/bloop/surge cycle in seconds.
const PHASE_PERIOD: f32 = 180.0;

#[derive(Debug, Clone)]
struct Blob {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    base_r: f32,
    r: f32,
    hue: f32,
    phase: f32,
}

/// Speed multiplier over the phase cycle: calm, a pulsing middle, then a surge.
fn speed_at(u: f32) -> f32 {
    const CALM_END: f32 = 0.45;
    const BLOOP_END: f32 = 0.75;
    if u < CALM_END {
        0.72
    } else if u < BLOOP_END {
        let p = (u - CALM_END) / (BLOOP_END - CALM_END);
        let pulse = (p * std::f32::consts::PI * 6.0).sin().max(0.0).powi(2);
        0.92 + 0.14 * pulse
    } else {
        let p = clamp((u - BLOOP_END) / (1.0 - BLOOP_END), 0.0, 1.0);
        let ramp = p * p * (3.0 - 2.0 * p);
        1.05 + 0.45 * ramp
    }
}

/// The `lava` channel.
pub struct Lava {
    rng: Mulberry32,
    ambience: Ambience,
    width: f32,
    height: f32,
    t: f32,
    phase_offset: f32,
    speed: f32,
    blobs: Vec<Blob>,
}

impl Lava {
    /// Builds the channel from its seed. Nothing is allocated or played until `init`.
    pub fn new(context: PluginContext) -> Self {
        let rng = Mulberry32::new(context.seed);
        let phase_offset = rng.fork(0x51AF_AE).next_f32() * PHASE_PERIOD;
        Self {
            rng,
            ambience: Ambience::new(context.audio),
            width: 0.0,
            height: 0.0,
            t: 0.0,
            phase_offset,
            speed: 1.0,
            blobs: Vec::new(),
        }
    }
}

impl ChannelPlugin for Lava {
    fn init(&mut self, viewport: Viewport) -> Result<()> {
        let (w, h) = (viewport.width as f32, viewport.height as f32);
        self.width = w;
        self.height = h;
        self.t = 0.0;
        let rng = &mut self.rng;
        self.blobs = (0..BLOBS)
            .map(|_| {
                let base_r = rng.range(80.0, 250.0);
                Blob {
                    x: rng.next_f32() * w,
                    y: rng.next_f32() * h,
                    vx: rng.range(-1.0, 1.0) * (30.0 + w / 30.0),
                    vy: rng.range(-1.0, 1.0) * (30.0 + h / 30.0),
                    base_r,
                    r: base_r * h / REFERENCE_HEIGHT,
                    hue: rng.range(290.0, 350.0),
                    phase: rng.range(0.0, 10.0),
                }
            })
            .collect();
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        let (w, h) = (viewport.width as f32, viewport.height as f32);
        let sx = if self.width > 0.0 { w / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { h / self.height } else { 1.0 };
        for b in &mut self.blobs {
            b.r = b.base_r * h / REFERENCE_HEIGHT;
            b.x = clamp(b.x * sx, 0.0, w);
            b.y = clamp(b.y * sy, 0.0, h);
            b.vx *= sx;
            b.vy *= sy;
        }
        self.width = w;
        self.height = h;
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<()> {
        self.t += dt;
        let u = ((self.t + self.phase_offset) % PHASE_PERIOD) / PHASE_PERIOD;
        self.speed = speed_at(u);
        let step = dt * self.speed;
        let (w, h) = (self.width, self.height);
        for b in &mut self.blobs {
            b.x += b.vx * step;
            b.y += b.vy * step + (self.t * 0.4 + b.phase).sin() * 6.0 * step;
            if b.x < 0.0 || b.x > w {
                b.vx = -b.vx;
                b.x = clamp(b.x, 0.0, w);
            }
            if b.y < 0.0 || b.y > h {
                b.vy = -b.vy;
                b.y = clamp(b.y, 0.0, h);
            }
        }
        Ok(())
    }

    fn render(&self, surface: &mut Surface) -> Result<()> {
        vertical_gradient(surface, Rgba::rgb(24, 4, 32), Rgba::rgb(70, 10, 40));
        for b in &self.blobs {
            let wobble = 1.0 + 0.06 * (self.t * 0.7 + b.phase).sin();
            let color = hsl(b.hue, 0.9, 0.55).with_alpha(0.85);
            soft_circle(surface, b.x, b.y, b.r * wobble, color);
        }
        Ok(())
    }

    fn on_audio_on(&mut self) -> Result<()> {
        self.ambience.start_with(|audio| {
            audio.noise_source(NoiseSpec::colored(NoiseColor::Brown).with_gain(0.06))
        })
    }

    fn on_audio_off(&mut self) -> Result<()> {
        self.ambience.stop();
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.ambience.stop();
        self.blobs.clear();
        Ok(())
    }
}
