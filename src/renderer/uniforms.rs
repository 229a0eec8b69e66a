//! GPU uniform layout for the mesh pass and the packing of scene lights
//! into it.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::options::Light;
use crate::scene::Scene;

/// Maximum number of non-ambient lights the shader evaluates.
pub const MAX_LIGHTS: usize = 4;

/// `GpuLight::position.w` for a directional light.
pub const LIGHT_DIRECTIONAL: f32 = 0.0;
/// `GpuLight::position.w` for a point light.
pub const LIGHT_POINT: f32 = 1.0;
/// `GpuLight::position.w` for a spot light.
pub const LIGHT_SPOT: f32 = 2.0;

/// One light as the shader sees it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    /// xyz = world position, w = light kind.
    pub position: [f32; 4],
    /// xyz = unit direction the light travels.
    pub direction: [f32; 4],
    /// rgb = color times intensity.
    pub color: [f32; 4],
    /// x = cutoff distance, y = decay, z = outer cone cos, w = inner cone cos.
    pub params: [f32; 4],
}

/// Per-frame uniform block (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Model world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix (upper 3x3 used).
    pub normal_matrix: [[f32; 4]; 4],
    /// xyz = camera position.
    pub camera_position: [f32; 4],
    /// rgb = summed ambient light.
    pub ambient: [f32; 4],
    /// x = roughness.
    pub material: [f32; 4],
    /// x = number of active entries in `lights`.
    pub light_count: [u32; 4],
    /// Non-ambient lights.
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl FrameUniform {
    /// Fill the uniform for drawing the scene's model from `camera`.
    #[must_use]
    pub fn new(scene: &Scene, camera: &Camera, model: Mat4) -> Self {
        let (ambient, lights, count) = pack_lights(scene.lights());
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            camera_position: camera.eye.extend(1.0).to_array(),
            ambient: ambient.extend(0.0).to_array(),
            material: [scene.roughness(), 0.0, 0.0, 0.0],
            light_count: [count as u32, 0, 0, 0],
            lights,
        }
    }
}

/// Split scene lights into summed ambient and up to [`MAX_LIGHTS`] shader
/// lights. Extra lights are dropped with a warning.
#[must_use]
pub fn pack_lights(lights: &[Light]) -> (Vec3, [GpuLight; MAX_LIGHTS], usize) {
    let mut ambient = Vec3::ZERO;
    let mut packed = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0;

    for light in lights {
        let gpu = match *light {
            Light::Ambient { color, intensity } => {
                ambient += Vec3::from(color) * intensity;
                continue;
            }
            Light::Directional {
                color,
                intensity,
                position,
                target,
            } => GpuLight {
                position: Vec3::from(position).extend(LIGHT_DIRECTIONAL).to_array(),
                direction: aim(position, target),
                color: radiance(color, intensity),
                params: [0.0; 4],
            },
            Light::Point {
                color,
                intensity,
                position,
                distance,
                decay,
            } => GpuLight {
                position: Vec3::from(position).extend(LIGHT_POINT).to_array(),
                direction: [0.0; 4],
                color: radiance(color, intensity),
                params: [distance, decay, 0.0, 0.0],
            },
            Light::Spot {
                color,
                intensity,
                position,
                target,
                angle,
                penumbra,
                distance,
                decay,
            } => GpuLight {
                position: Vec3::from(position).extend(LIGHT_SPOT).to_array(),
                direction: aim(position, target),
                color: radiance(color, intensity),
                params: [
                    distance,
                    decay,
                    angle.cos(),
                    (angle * (1.0 - penumbra.clamp(0.0, 1.0))).cos(),
                ],
            },
        };

        if count == MAX_LIGHTS {
            log::warn!("more than {MAX_LIGHTS} lights configured; extras ignored");
            break;
        }
        packed[count] = gpu;
        count += 1;
    }

    (ambient, packed, count)
}

fn aim(position: [f32; 3], target: [f32; 3]) -> [f32; 4] {
    let dir = (Vec3::from(target) - Vec3::from(position))
        .try_normalize()
        .unwrap_or(Vec3::NEG_Y);
    dir.extend(0.0).to_array()
}

fn radiance(color: [f32; 3], intensity: f32) -> [f32; 4] {
    (Vec3::from(color) * intensity).extend(1.0).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LightingOptions;

    #[test]
    fn uniform_block_is_std140_sized() {
        assert_eq!(size_of::<GpuLight>(), 64);
        assert_eq!(size_of::<FrameUniform>(), 512);
    }

    #[test]
    fn default_lights_pack_ambient_separately() {
        let lights = LightingOptions::default().lights;
        let (ambient, packed, count) = pack_lights(&lights);
        assert!((ambient - Vec3::splat(0.3)).length() < 1e-6);
        assert_eq!(count, 3);
        assert_eq!(packed[0].position[3], LIGHT_DIRECTIONAL);
        assert_eq!(packed[1].position[3], LIGHT_POINT);
        assert_eq!(packed[2].position[3], LIGHT_SPOT);
    }

    #[test]
    fn directional_light_aims_at_target() {
        let lights = LightingOptions::default().lights;
        let (_, packed, _) = pack_lights(&lights);
        let dir = Vec3::from_slice(&packed[0].direction[..3]);
        let expected = Vec3::new(-1.0, -1.0, -1.0).normalize();
        assert!((dir - expected).length() < 1e-6);
    }

    #[test]
    fn spot_cone_uses_penumbra_for_inner_edge() {
        let lights = LightingOptions::default().lights;
        let (_, packed, _) = pack_lights(&lights);
        let spot = packed[2];
        let angle = std::f32::consts::FRAC_PI_6;
        assert!((spot.params[2] - angle.cos()).abs() < 1e-6);
        assert!((spot.params[3] - (angle * 0.5).cos()).abs() < 1e-6);
        assert!(spot.params[3] > spot.params[2]);
        // Spot points straight up from below the rocket.
        assert!((spot.direction[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn extra_lights_are_dropped() {
        let light = Light::Point {
            color: [1.0; 3],
            intensity: 1.0,
            position: [0.0; 3],
            distance: 0.0,
            decay: 2.0,
        };
        let (_, _, count) = pack_lights(&[light; MAX_LIGHTS + 2]);
        assert_eq!(count, MAX_LIGHTS);
    }
}
