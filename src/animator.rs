use crate::error::{ClockError::InvalidAnimationWindow, ClockResult};
use crate::glyph::{DigitShape, Float, C_ZERO, POINT_COUNT};

#[allow(unused_imports)]
use num_traits::real::Real;

use core::f32::consts::PI;

/// Ease-in-ease-out curve with zero velocity at both ends.
pub fn ease(m: Float) -> Float {
    match m {
        m if m <= 0.0 => 0.0,
        m if m >= 1.0 => 1.0,
        m => (1.0 - (m * PI).cos()) / 2.0,
    }
}

/// Clamps a raw cycle ratio into `[0, 1]`; NaN counts as the start of the cycle.
pub fn clamp_ratio(ratio: Float) -> Float {
    if ratio.is_nan() {
        log::warn!("non-finite ratio replaced by 0");
        0.0
    } else if !(0.0..=1.0).contains(&ratio) {
        log::warn!("ratio {} clamped", ratio);
        ratio.clamp(0.0, 1.0)
    } else {
        ratio
    }
}

/// Morphs one slot between two glyphs. Only the last `duration`
/// seconds of each `interval` are spent animating.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DigitAnimator {
    animation_start_ratio: Float,
}

impl DigitAnimator {
    pub fn new(interval: Float, duration: Float) -> ClockResult<Self> {
        let valid = interval.is_finite()
            && duration.is_finite()
            && interval > 0.0
            && duration > 0.0
            && duration <= interval;

        match valid {
            true => Ok(Self {
                animation_start_ratio: (interval - duration) / interval,
            }),
            false => Err(InvalidAnimationWindow),
        }
    }

    pub fn animation_start_ratio(&self) -> Float {
        self.animation_start_ratio
    }

    /// Maps a cycle ratio to the progress of the morph itself.
    pub fn morph_ratio(&self, ratio: Float) -> Float {
        let ratio = clamp_ratio(ratio);
        let start = self.animation_start_ratio;
        if ratio <= start {
            0.0
        } else {
            ((ratio - start) / (1.0 - start)).clamp(0.0, 1.0)
        }
    }

    pub fn update(&self, current: &DigitShape, next: &DigitShape, ratio: Float) -> DigitShape {
        let eased = ease(self.morph_ratio(ratio));
        let (from, to) = (current.points(), next.points());

        let mut points = [C_ZERO; POINT_COUNT];
        for i in 0..POINT_COUNT {
            // weighted form keeps both ends bit-exact
            points[i] = from[i] * (1.0 - eased) + to[i] * eased;
        }

        DigitShape::from_points(points)
    }

    /// Static rendering: no transition at all.
    pub fn hold(&self, current: &DigitShape) -> DigitShape {
        *current
    }
}
