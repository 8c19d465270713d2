use rand::Rng;
use std::ops::Range;

use crate::viewport::Viewport;

pub const RADIUS_RANGE: Range<f32> = 1.0..3.0;
pub const VELOCITY_RANGE: Range<f32> = -0.5..0.5;
pub const OPACITY_RANGE: Range<f32> = 0.2..0.7;

/// Folds `value` into `[0, extent)`. Values far outside the range (after the
/// container shrank) fold the same way as a one-step crossing.
#[inline(always)]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negative values up to `extent` itself
    if wrapped.is_finite() && wrapped < extent {
        wrapped
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        let (width, height) = viewport.extent();
        Particle {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            radius: rng.gen_range(RADIUS_RANGE),
            vx: rng.gen_range(VELOCITY_RANGE),
            vy: rng.gen_range(VELOCITY_RANGE),
            opacity: rng.gen_range(OPACITY_RANGE),
        }
    }

    /// One frame of motion. Velocity is per frame, not per second.
    #[inline(always)]
    pub fn advance(&mut self, viewport: Viewport) {
        let (width, height) = viewport.extent();
        self.x = wrap_axis(self.x + self.vx, width);
        self.y = wrap_axis(self.y + self.vy, height);
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
