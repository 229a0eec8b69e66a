use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Pointer and idle rotation speeds.
pub struct InteractionOptions {
    /// Yaw applied per pixel of horizontal drag, in radians.
    pub drag_sensitivity: f32,
    /// Yaw applied per frame while idle, in radians.
    pub idle_rotation_speed: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            idle_rotation_speed: 0.002,
        }
    }
}
