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

//! Drawing helpers shared by the built-in channels.

use telly_core::render::{Rgba, Surface};

/// Converts HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::rgb(to_u8(r), to_u8(g), to_u8(b))
}

/// Blends a filled disc. Pixels whose centre lies inside the radius are painted.
pub fn fill_circle(surface: &mut Surface, cx: f32, cy: f32, radius: f32, color: Rgba) {
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let y0 = (cy - radius).floor().max(0.0) as i32;
    let y1 = (cy + radius).ceil().min(surface.height() as f32) as i32;
    let x0 = (cx - radius).floor().max(0.0) as i32;
    let x1 = (cx + radius).ceil().min(surface.width() as f32) as i32;
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - cy;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                surface.blend_pixel(x, y, color);
            }
        }
    }
}

/// Paints a disc as concentric rings fading from `inner` to a transparent rim.
pub fn soft_circle(surface: &mut Surface, cx: f32, cy: f32, radius: f32, inner: Rgba) {
    const RINGS: u32 = 6;
    for ring in 0..RINGS {
        let k = ring as f32 / RINGS as f32;
        let alpha = f32::from(inner.a) / 255.0 * (0.25 + 0.75 * k) / RINGS as f32 * 2.0;
        fill_circle(surface, cx, cy, radius * (1.0 - k), inner.with_alpha(alpha));
    }
}

/// Fills the surface with a vertical gradient from `top` to `bottom`.
pub fn vertical_gradient(surface: &mut Surface, top: Rgba, bottom: Rgba) {
    let w = surface.width() as i32;
    let h = surface.height();
    for y in 0..h {
        let t = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
        surface.fill_rect(0, y as i32, w, 1, top.lerp(bottom, t));
    }
}
