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

//! A toy planetary system: bodies circling a soft star under a fixed starfield.

use super::ambience::Ambience;
use super::paint::{fill_circle, hsl, soft_circle};
use anyhow::Result;
use std::f32::consts::TAU;
use telly_core::audio::DroneSpec;
use telly_core::prng::Mulberry32;
use telly_core::render::{Rgba, Surface, Viewport};
use telly_core::{ChannelPlugin, PluginContext};

const STARS: usize = 220;
const PLANETS: usize = 7;
const REFERENCE_HEIGHT: f32 = 540.0;

#[derive(Debug, Clone, Copy)]
struct Star {
    nx: f32,
    ny: f32,
    size: i32,
    alpha: f32,
}

#[derive(Debug, Clone, Copy)]
struct Planet {
    orbit: f32,
    angle: f32,
    speed: f32,
    size: f32,
    hue: f32,
    moon: Option<(f32, f32)>,
}

/// The `orbits` channel.
pub struct Orbits {
    rng: Mulberry32,
    ambience: Ambience,
    width: f32,
    height: f32,
    sun_size: f32,
    stars: Vec<Star>,
    planets: Vec<Planet>,
}

impl Orbits {
    /// Builds the channel from its seed. Nothing is allocated or played until `init`.
    pub fn new(context: PluginContext) -> Self {
        Self {
            rng: Mulberry32::new(context.seed),
            ambience: Ambience::new(context.audio),
            width: 0.0,
            height: 0.0,
            sun_size: 0.0,
            stars: Vec::new(),
            planets: Vec::new(),
        }
    }

    fn scale(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }
}

impl ChannelPlugin for Orbits {
    fn init(&mut self, viewport: Viewport) -> Result<()> {
        self.width = viewport.width as f32;
        self.height = viewport.height as f32;
        let rng = &mut self.rng;

        // Precomputed so render never draws random numbers.
        self.stars = (0..STARS)
            .map(|_| {
                let alpha = rng.range(0.12, 0.62);
                let size = if rng.chance(0.08) { 2 } else { 1 };
                Star {
                    nx: rng.next_f32(),
                    ny: rng.next_f32(),
                    size,
                    alpha,
                }
            })
            .collect();

        self.planets = (0..PLANETS)
            .map(|i| {
                let direction = if i % 2 == 1 { 1.0 } else { -1.0 };
                let angle = rng.next_f32() * TAU;
                let speed = rng.range(0.08, 0.32) * direction;
                let size = 5.0 + rng.next_f32() * 10.0 + i as f32 * 0.9;
                let hue = (i as f32 * 40.0 + rng.next_f32() * 30.0) % 360.0;
                let moon = rng
                    .chance(0.4)
                    .then(|| (rng.next_f32() * TAU, rng.range(0.7, 1.8)));
                Planet {
                    orbit: 40.0 + i as f32 * 32.0,
                    angle,
                    speed,
                    size,
                    hue,
                    moon,
                }
            })
            .collect();
        self.sun_size = rng.range(32.0, 54.0);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        self.width = viewport.width as f32;
        self.height = viewport.height as f32;
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<()> {
        for p in &mut self.planets {
            p.angle += dt * p.speed;
            if let Some((moon_angle, moon_speed)) = &mut p.moon {
                *moon_angle += dt * *moon_speed;
            }
        }
        Ok(())
    }

    fn render(&self, surface: &mut Surface) -> Result<()> {
        surface.clear(Rgba::rgb(3, 4, 14));
        let (w, h) = (self.width, self.height);
        for s in &self.stars {
            let color = Rgba::rgb(220, 240, 255).with_alpha(s.alpha * 0.65);
            surface.fill_rect((s.nx * w) as i32, (s.ny * h) as i32, s.size, s.size, color);
        }

        let (cx, cy) = (w / 2.0, h / 2.0);
        let scale = self.scale();
        soft_circle(surface, cx, cy, self.sun_size * scale, Rgba::rgb(255, 220, 160));

        for p in &self.planets {
            let r = p.orbit * scale;
            let size = p.size * scale;
            let x = cx + p.angle.cos() * r;
            let y = cy + p.angle.sin() * r;
            fill_circle(surface, x, y, size, hsl(p.hue, 0.85, 0.6).with_alpha(0.95));
            if let Some((moon_angle, _)) = p.moon {
                let mx = x + moon_angle.cos() * size * 2.2;
                let my = y + moon_angle.sin() * size * 1.4;
                let moon = Rgba::rgb(230, 230, 245).with_alpha(0.85);
                fill_circle(surface, mx, my, size * 0.35, moon);
            }
        }
        Ok(())
    }

    fn on_audio_on(&mut self) -> Result<()> {
        self.ambience.start_with(|audio| {
            audio.drone(DroneSpec {
                root: 82.0,
                detune: 0.8,
                gain: 0.05,
            })
        })
    }

    fn on_audio_off(&mut self) -> Result<()> {
        self.ambience.stop();
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.ambience.stop();
        Ok(())
    }
}
