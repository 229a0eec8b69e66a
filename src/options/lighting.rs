use serde::{Deserialize, Serialize};

/// One light source. Colors are linear RGB in `[0, 1]`; directional and
/// spot lights aim from `position` towards `target`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    /// Uniform light from every direction.
    Ambient {
        /// Light color.
        color: [f32; 3],
        /// Scalar multiplier on `color`.
        intensity: f32,
    },
    /// Parallel rays, like sunlight.
    Directional {
        /// Light color.
        color: [f32; 3],
        /// Scalar multiplier on `color`.
        intensity: f32,
        /// Position the rays originate from.
        position: [f32; 3],
        /// Point the rays travel towards.
        #[serde(default)]
        target: [f32; 3],
    },
    /// Omnidirectional light with distance falloff.
    Point {
        /// Light color.
        color: [f32; 3],
        /// Scalar multiplier on `color`.
        intensity: f32,
        /// World position.
        position: [f32; 3],
        /// Cutoff distance; 0 means unlimited.
        #[serde(default)]
        distance: f32,
        /// Falloff exponent.
        #[serde(default = "default_decay")]
        decay: f32,
    },
    /// Cone of light with distance falloff and a soft edge.
    Spot {
        /// Light color.
        color: [f32; 3],
        /// Scalar multiplier on `color`.
        intensity: f32,
        /// World position.
        position: [f32; 3],
        /// Point the cone is aimed at.
        #[serde(default)]
        target: [f32; 3],
        /// Half-angle of the cone in radians.
        angle: f32,
        /// Fraction of the cone that fades out, in `[0, 1]`.
        #[serde(default)]
        penumbra: f32,
        /// Cutoff distance; 0 means unlimited.
        #[serde(default)]
        distance: f32,
        /// Falloff exponent.
        #[serde(default = "default_decay")]
        decay: f32,
    },
}

fn default_decay() -> f32 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Lights and background.
pub struct LightingOptions {
    /// Clear color (RGBA). Alpha 0 keeps the page visible behind the scene.
    pub clear_color: [f32; 4],
    /// Lights added to the scene, in order.
    pub lights: Vec<Light>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
        Self {
            clear_color: [0.0; 4],
            lights: vec![
                Light::Ambient {
                    color: WHITE,
                    intensity: 0.3,
                },
                Light::Directional {
                    color: WHITE,
                    intensity: 1.5,
                    position: [10.0, 10.0, 10.0],
                    target: [0.0; 3],
                },
                Light::Point {
                    color: WHITE,
                    intensity: 54_351.413,
                    position: [0.0, 5000.0, 0.0],
                    distance: 1000.0,
                    decay: 2.0,
                },
                Light::Spot {
                    color: [1.0, 0.0, 1.0],
                    intensity: 1.5,
                    position: [0.0, -5000.0, 0.0],
                    target: [0.0; 3],
                    angle: std::f32::consts::FRAC_PI_6,
                    penumbra: 0.5,
                    distance: 0.0,
                    decay: 2.0,
                },
            ],
        }
    }
}
