//! The scene graph: lights plus one wrapper node that carries the model.
//!
//! The scene is created once by the controller and owned by it until
//! teardown. Nothing else holds references into it; the renderer borrows
//! it for the duration of a frame.

mod wrapper;

use glam::Mat4;
pub use wrapper::{AttachedModel, ModelState, ModelWrapper, Transform};

use crate::options::{Light, SceneOptions};

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Lights, background and the model wrapper for one frame.
pub struct Scene {
    lights: Vec<Light>,
    clear_color: [f32; 4],
    roughness: f32,
    wrapper: ModelWrapper,
}

impl Scene {
    /// Build the scene from options. The wrapper starts empty.
    #[must_use]
    pub fn new(options: &SceneOptions) -> Self {
        Self {
            lights: options.lighting.lights.clone(),
            clear_color: options.lighting.clear_color,
            roughness: options.model.roughness,
            wrapper: ModelWrapper::new(options.model.wrapper_position.into()),
        }
    }

    /// Lights in insertion order.
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// RGBA clear color.
    #[must_use]
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Material roughness shared by every mesh of the model.
    #[must_use]
    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    /// The model wrapper node.
    #[must_use]
    pub fn wrapper(&self) -> &ModelWrapper {
        &self.wrapper
    }

    /// Mutable access to the model wrapper node.
    pub fn wrapper_mut(&mut self) -> &mut ModelWrapper {
        &mut self.wrapper
    }

    /// World matrix of the attached model, if any.
    #[must_use]
    pub fn model_matrix(&self) -> Option<Mat4> {
        self.wrapper.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_has_configured_lights_and_empty_wrapper() {
        let options = SceneOptions::default();
        let scene = Scene::new(&options);
        assert_eq!(scene.lights().len(), 4);
        assert_eq!(scene.clear_color(), [0.0; 4]);
        assert_eq!(scene.roughness(), 0.5);
        assert_eq!(scene.wrapper().state(), ModelState::Unloaded);
        assert_eq!(scene.wrapper().position().y, -300.0);
        assert!(scene.model_matrix().is_none());
    }
}
