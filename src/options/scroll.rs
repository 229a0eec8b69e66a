use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Endpoints and curve of the scroll-to-camera mapping.
pub struct ScrollOptions {
    /// Camera Y at the top of the page (just above the nose cone).
    pub top_y: f32,
    /// Camera Y at the bottom of the page.
    pub bottom_y: f32,
    /// Curve applied to the normalized scroll fraction.
    pub easing: EasingFunction,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            top_y: 300.0,
            bottom_y: -6500.0,
            easing: EasingFunction::QuadraticIn,
        }
    }
}
