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

//! The noise barrier that separates one channel from the next.
//!
//! While a barrier runs the controller owns the frame: it repaints the noise
//! layer with fresh static each frame and fades its opacity from 1 to 0. It
//! never touches channel state.

use std::time::Duration;
use telly_core::prng::Mulberry32;
use telly_core::render::{RenderTarget, Rgba, Surface};
use tokio::time::Instant;

/// Seed of the static pattern stream. Not channel-derived.
const NOISE_SEED: u32 = 0x5EED_0001;
/// Strongest per-cell alpha of the static.
const NOISE_MAX_ALPHA: f32 = 220.0;

/// Outcome of one barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierReport {
    /// Noise frames painted.
    pub frames: u32,
    /// Wall time the barrier took.
    pub elapsed: Duration,
}

/// Linear fade of the barrier: `1` at the start, `0` once `duration` passed.
pub fn opacity_at(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    let t = elapsed.as_secs_f32() / duration.as_secs_f32();
    (1.0 - t).clamp(0.0, 1.0)
}

/// Paints one frame of static over the whole of `surface`.
///
/// The pattern is drawn on a coarse grid, between 64 and 360 cells across,
/// and scaled up, so cost stays flat with resolution.
pub fn paint_noise(surface: &mut Surface, rng: &mut Mulberry32) {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 {
        return;
    }
    let cols = w.clamp(64, 360);
    let rows = ((u64::from(cols) * u64::from(h) / u64::from(w)) as u32).max(64);
    for row in 0..rows {
        let y0 = (u64::from(row) * u64::from(h) / u64::from(rows)) as i32;
        let y1 = (u64::from(row + 1) * u64::from(h) / u64::from(rows)) as i32;
        for col in 0..cols {
            let x0 = (u64::from(col) * u64::from(w) / u64::from(cols)) as i32;
            let x1 = (u64::from(col + 1) * u64::from(w) / u64::from(cols)) as i32;
            let v = (rng.next_f32() * 255.0) as u8;
            let a = (rng.next_f32() * NOISE_MAX_ALPHA) as u8;
            if x1 == x0 || y1 == y0 {
                continue;
            }
            let cell = Rgba::new(v, v, v, a);
            for y in y0..y1 {
                for x in x0..x1 {
                    surface.set_pixel(x, y, cell);
                }
            }
        }
    }
}

/// Resets the noise layer if a barrier is dropped mid-flight.
struct FadeGuard<'a> {
    target: &'a mut dyn RenderTarget,
    armed: bool,
}

impl FadeGuard<'_> {
    fn finish(mut self) {
        self.reset();
        self.armed = false;
    }

    fn reset(&mut self) {
        self.target.set_noise_opacity(0.0);
        self.target.noise_layer().clear(Rgba::TRANSPARENT);
    }
}

impl Drop for FadeGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Noise barrier abandoned; clearing the noise layer.");
            self.reset();
        }
    }
}

/// Runs noise barriers on a render target.
#[derive(Debug)]
pub struct TransitionController {
    rng: Mulberry32,
    frame_interval: Duration,
}

impl TransitionController {
    /// A controller pacing its frames at `frame_interval`.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            rng: Mulberry32::new(NOISE_SEED),
            frame_interval: frame_interval.max(Duration::from_millis(1)),
        }
    }

    /// Runs one barrier of `duration`, then hides the noise layer.
    ///
    /// Dropping the returned future early leaves the target with a hidden,
    /// cleared noise layer.
    pub async fn run_barrier(
        &mut self,
        target: &mut dyn RenderTarget,
        duration: Duration,
    ) -> BarrierReport {
        let started = Instant::now();
        let mut frames = 0;
        let mut guard = FadeGuard {
            target,
            armed: true,
        };
        loop {
            let elapsed = started.elapsed();
            if elapsed >= duration {
                break;
            }
            let opacity = opacity_at(elapsed, duration);
            paint_noise(guard.target.noise_layer(), &mut self.rng);
            guard.target.set_noise_opacity(opacity);
            if let Err(e) = guard.target.present() {
                log::warn!("Failed to present noise frame: {e:#}");
            }
            frames += 1;
            let remaining = duration.saturating_sub(started.elapsed());
            tokio::time::sleep(self.frame_interval.min(remaining)).await;
        }
        guard.finish();
        let elapsed = started.elapsed();
        log::trace!("Noise barrier done: {frames} frames in {elapsed:?}.");
        BarrierReport { frames, elapsed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_ramps_down_linearly() {
        let d = Duration::from_millis(500);
        assert_eq!(opacity_at(Duration::ZERO, d), 1.0);
        assert!((opacity_at(Duration::from_millis(250), d) - 0.5).abs() < 1e-6);
        assert_eq!(opacity_at(Duration::from_millis(600), d), 0.0);
        assert_eq!(opacity_at(Duration::ZERO, Duration::ZERO), 0.0);
    }

    #[test]
    fn noise_covers_small_and_large_surfaces() {
        let mut rng = Mulberry32::new(1);
        for (w, h) in [(8, 6), (640, 360)] {
            let mut s = Surface::new(w, h);
            paint_noise(&mut s, &mut rng);
            let painted = s.as_bytes().chunks_exact(4).filter(|p| p[3] > 0).count();
            assert!(painted > (w * h / 2) as usize, "{w}x{h}: {painted}");
        }
    }

    #[test]
    fn noise_alpha_is_capped() {
        let mut s = Surface::new(100, 100);
        paint_noise(&mut s, &mut Mulberry32::new(9));
        assert!(s.as_bytes().chunks_exact(4).all(|p| p[3] <= 220));
    }
}
