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

//! A CPU pixel buffer that channels paint into.

use super::target::Viewport;

/// Clamps both sides to [`Viewport::MAX_SIDE`] and returns them with the
/// byte length of an RGBA buffer of that size. Collapses to an empty buffer
/// if the length does not fit in `usize`.
fn buffer_dims(width: u32, height: u32) -> (u32, u32, usize) {
    let width = width.min(Viewport::MAX_SIDE);
    let height = height.min(Viewport::MAX_SIDE);
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .map_or((0, 0, 0), |len| (width, height, len))
}

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Builds a colour from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns a copy with alpha set from a `[0, 1]` factor.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Source-over blend of one 8-bit channel.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u32) -> u8 {
    ((u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255) as u8
}

/// An RGBA8 image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A transparent surface of the given size. Sides above
    /// [`Viewport::MAX_SIDE`] are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height, len) = buffer_dims(width, height);
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resizes and clears the surface. A no-op if the size is unchanged.
    /// Sides above [`Viewport::MAX_SIDE`] are clamped.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height, len) = buffer_dims(width, height);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; len];
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw RGBA bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Fills the whole surface with `color` (no blending).
    pub fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Reads one pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        let p = &self.pixels[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrites one pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Source-over blends `color` onto one pixel.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let alpha = u32::from(color.a);
        if alpha == 255 {
            self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
            return;
        }
        if alpha == 0 {
            return;
        }
        let px = &mut self.pixels[i..i + 4];
        px[0] = blend_channel(color.r, px[0], alpha);
        px[1] = blend_channel(color.g, px[1], alpha);
        px[2] = blend_channel(color.b, px[2], alpha);
        px[3] = (alpha + u32::from(px[3]) * (255 - alpha) / 255) as u8;
    }

    /// Blends a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Blends `top` over this surface at `opacity`. Both must be the same size.
    pub fn composite(&mut self, top: &Surface, opacity: f32) {
        if top.width != self.width || top.height != self.height || opacity <= 0.0 {
            return;
        }
        let k = opacity.clamp(0.0, 1.0);
        for (dst, src) in self.pixels.chunks_exact_mut(4).zip(top.pixels.chunks_exact(4)) {
            let alpha = (f32::from(src[3]) * k).round() as u32;
            if alpha == 0 {
                continue;
            }
            dst[0] = blend_channel(src[0], dst[0], alpha);
            dst[1] = blend_channel(src[1], dst[1], alpha);
            dst[2] = blend_channel(src[2], dst[2], alpha);
            dst[3] = (alpha + u32::from(dst[3]) * (255 - alpha) / 255) as u8;
        }
    }
}
