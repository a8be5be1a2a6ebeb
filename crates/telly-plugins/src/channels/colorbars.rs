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

//! Off-air test card: colour bars, a PLUGE strip and a drifting station ident.

use super::ambience::Ambience;
use super::paint::hsl;
use anyhow::Result;
use telly_core::audio::DroneSpec;
use telly_core::prng::Mulberry32;
use telly_core::render::{Rgba, Surface, Viewport};
use telly_core::{ChannelPlugin, PluginContext};

/// 75% bars, left to right.
const BARS: [Rgba; 7] = [
    Rgba::rgb(191, 191, 191),
    Rgba::rgb(191, 191, 0),
    Rgba::rgb(0, 191, 191),
    Rgba::rgb(0, 191, 0),
    Rgba::rgb(191, 0, 191),
    Rgba::rgb(191, 0, 0),
    Rgba::rgb(0, 0, 191),
];

/// Castellations under the bars.
const CASTELLATIONS: [Rgba; 7] = [
    Rgba::rgb(0, 0, 191),
    Rgba::rgb(19, 19, 19),
    Rgba::rgb(191, 0, 191),
    Rgba::rgb(19, 19, 19),
    Rgba::rgb(0, 191, 191),
    Rgba::rgb(19, 19, 19),
    Rgba::rgb(191, 191, 191),
];

/// The `colorbars` channel.
pub struct ColorBars {
    ambience: Ambience,
    width: u32,
    height: u32,
    ident_hue: f32,
    ident_speed: f32,
    ident_pos: f32,
    tone: f32,
}

impl ColorBars {
    /// Builds the channel from its seed. Nothing is allocated or played until `init`.
    pub fn new(context: PluginContext) -> Self {
        let mut rng = Mulberry32::new(context.seed);
        Self {
            ambience: Ambience::new(context.audio),
            width: 0,
            height: 0,
            ident_hue: rng.range(0.0, 360.0),
            ident_speed: rng.range(0.05, 0.2),
            ident_pos: rng.next_f32(),
            tone: *rng.pick(&[440.0, 660.0, 880.0]).unwrap_or(&440.0),
        }
    }
}

impl ChannelPlugin for ColorBars {
    fn init(&mut self, viewport: Viewport) -> Result<()> {
        self.width = viewport.width;
        self.height = viewport.height;
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        self.init(viewport)
    }

    fn update(&mut self, dt: f32) -> Result<()> {
        self.ident_pos = (self.ident_pos + dt * self.ident_speed).fract();
        Ok(())
    }

    fn render(&self, surface: &mut Surface) -> Result<()> {
        let (w, h) = (self.width as i32, self.height as i32);
        surface.clear(Rgba::rgb(19, 19, 19));

        let bars_h = h * 2 / 3;
        let strip_h = h / 12;
        let n = BARS.len() as i32;
        for (i, (bar, castle)) in BARS.iter().zip(CASTELLATIONS.iter()).enumerate() {
            let i = i as i32;
            let x0 = w * i / n;
            let x1 = w * (i + 1) / n;
            surface.fill_rect(x0, 0, x1 - x0, bars_h, *bar);
            surface.fill_rect(x0, bars_h, x1 - x0, strip_h, *castle);
        }

        // PLUGE: super-black, black and a step above black.
        let pluge_y = bars_h + strip_h;
        let pluge_h = h - pluge_y;
        let cell = w / 6;
        surface.fill_rect(0, pluge_y, cell, pluge_h, Rgba::rgb(0, 33, 76));
        surface.fill_rect(cell, pluge_y, cell, pluge_h, Rgba::WHITE);
        surface.fill_rect(2 * cell, pluge_y, cell, pluge_h, Rgba::rgb(50, 0, 106));
        surface.fill_rect(4 * cell, pluge_y, cell / 3, pluge_h, Rgba::rgb(9, 9, 9));
        surface.fill_rect(4 * cell + 2 * cell / 3, pluge_y, cell / 3, pluge_h, Rgba::rgb(29, 29, 29));

        let box_w = (w / 5).max(1);
        let box_h = (h / 10).max(1);
        let x = ((w - box_w) as f32 * self.ident_pos) as i32;
        let y = (bars_h - box_h) / 2;
        surface.fill_rect(x, y, box_w, box_h, Rgba::rgb(10, 10, 10).with_alpha(0.8));
        let inset = (box_h / 5).max(1);
        surface.fill_rect(
            x + inset,
            y + inset,
            box_w - 2 * inset,
            box_h - 2 * inset,
            hsl(self.ident_hue, 0.7, 0.5),
        );
        Ok(())
    }

    fn on_audio_on(&mut self) -> Result<()> {
        let tone = self.tone;
        self.ambience.start_with(|audio| {
            audio.drone(DroneSpec {
                root: tone,
                detune: 0.0,
                gain: 0.03,
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
