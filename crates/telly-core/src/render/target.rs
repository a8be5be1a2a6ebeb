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

//! Defines the `RenderTarget` trait the runtime paints through.

use super::surface::Surface;

/// Size of the display in device pixels plus its pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Device pixel ratio, clamped to `[1, 2]`.
    pub dpr: f32,
}

impl Viewport {
    /// Largest accepted width or height.
    pub const MAX_SIDE: u32 = 8192;

    /// Builds a viewport, clamping `dpr` into `[1, 2]`.
    pub fn new(width: u32, height: u32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() { dpr.clamp(1.0, 2.0) } else { 1.0 };
        Self { width, height, dpr }
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether either dimension exceeds [`Viewport::MAX_SIDE`].
    pub fn is_oversized(&self) -> bool {
        self.width > Self::MAX_SIDE || self.height > Self::MAX_SIDE
    }
}

/// The display the runtime draws to.
///
/// A target owns two layers: the screen, which the active channel paints,
/// and a noise layer composited on top during channel transitions. Only one
/// party owns the frame at a time: the active channel, or the transition
/// controller while a barrier runs.
pub trait RenderTarget {
    /// Current viewport. The runtime polls this once per frame.
    fn viewport(&self) -> Viewport;

    /// Changes the viewport, resizing both layers. The runtime notices the
    /// change on the next frame.
    fn resize(&mut self, viewport: Viewport);

    /// The channel layer, sized to the viewport.
    fn screen(&mut self) -> &mut Surface;

    /// The transition noise layer, sized to the viewport.
    fn noise_layer(&mut self) -> &mut Surface;

    /// Sets the opacity of the noise layer, `0` hides it.
    fn set_noise_opacity(&mut self, opacity: f32);

    /// Current opacity of the noise layer.
    fn noise_opacity(&self) -> f32;

    /// Makes the current frame visible.
    fn present(&mut self) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpr_is_clamped() {
        assert_eq!(Viewport::new(10, 10, 0.5).dpr, 1.0);
        assert_eq!(Viewport::new(10, 10, 3.0).dpr, 2.0);
    }

    #[test]
    fn oversized_sides() {
        assert!(!Viewport::new(Viewport::MAX_SIDE, 1, 1.0).is_oversized());
        assert!(Viewport::new(1, Viewport::MAX_SIDE + 1, 1.0).is_oversized());
        assert!(Viewport::new(0, 10, 1.0).is_empty());
        assert_eq!(Viewport::new(10, 10, f32::NAN).dpr, 1.0);
        assert_eq!(Viewport::new(10, 10, 1.5).dpr, 1.5);
    }

    #[test]
    fn empty_viewport() {
        assert!(Viewport::new(0, 10, 1.0).is_empty());
        assert!(!Viewport::new(1, 1, 1.0).is_empty());
    }
}
