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

//! An off-screen render target that keeps the last presented frame.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use telly_core::render::{RenderTarget, Surface, Viewport};

/// A [`RenderTarget`] backed by CPU surfaces.
///
/// `present` composites the noise layer over the screen into a separate
/// frame buffer, which can be inspected or written out as PNG.
#[derive(Debug)]
pub struct HeadlessTarget {
    viewport: Viewport,
    screen: Surface,
    noise: Surface,
    noise_opacity: f32,
    frame: Surface,
    presented: u64,
}

impl HeadlessTarget {
    /// A black target of the given size.
    pub fn new(viewport: Viewport) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        Self {
            viewport,
            screen: Surface::new(w, h),
            noise: Surface::new(w, h),
            noise_opacity: 0.0,
            frame: Surface::new(w, h),
            presented: 0,
        }
    }

    /// The last presented frame.
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// How many frames were presented.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Writes the last presented frame as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        write_png(&self.frame, path)
    }
}

/// Encodes `surface` as an RGBA PNG at `path`.
pub fn write_png(surface: &Surface, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let image = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.as_bytes().to_vec(),
    )
    .ok_or_else(|| anyhow!("surface buffer does not match its size"))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    log::debug!("Saved frame to '{}'.", path.display());
    Ok(())
}

impl RenderTarget for HeadlessTarget {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.screen.resize(viewport.width, viewport.height);
        self.noise.resize(viewport.width, viewport.height);
        self.frame.resize(viewport.width, viewport.height);
    }

    fn screen(&mut self) -> &mut Surface {
        &mut self.screen
    }

    fn noise_layer(&mut self) -> &mut Surface {
        &mut self.noise
    }

    fn set_noise_opacity(&mut self, opacity: f32) {
        self.noise_opacity = opacity.clamp(0.0, 1.0);
    }

    fn noise_opacity(&self) -> f32 {
        self.noise_opacity
    }

    fn present(&mut self) -> Result<()> {
        self.frame
            .as_bytes_mut()
            .copy_from_slice(self.screen.as_bytes());
        self.frame.composite(&self.noise, self.noise_opacity);
        self.presented += 1;
        Ok(())
    }
}
