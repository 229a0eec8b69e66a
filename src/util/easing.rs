//! Easing curves applied to the normalized scroll position.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic non-decreasing and
//! fixes both endpoints, so the camera always starts at the top pose and ends
//! at the bottom pose whatever curve is configured.

use serde::{Deserialize, Serialize};

/// Easing curve variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Identity (no easing).
    Linear,
    /// `t²`: slow near the top of the page, faster towards the bottom.
    #[default]
    QuadraticIn,
    /// `1 - (1 - t)²`: fast near the top, settling at the bottom.
    QuadraticOut,
    /// `3t² - 2t³`: slow at both ends.
    Smoothstep,
}

impl EasingFunction {
    /// Evaluate the curve at `t`. Input is clamped to `[0, 1]`; NaN maps to 0.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}
