//! Rendering: the backend-neutral [`Renderer`] trait and its wgpu
//! implementation.

pub mod mesh_pass;
pub(crate) mod pipeline_util;
pub mod uniforms;

pub use mesh_pass::MeshRenderer;

use crate::asset::ModelMesh;
use crate::camera::Camera;
use crate::error::SceneError;
use crate::scene::Scene;

/// Draws the scene into the host's surface.
///
/// The controller owns exactly one renderer and calls
/// [`release`](Self::release) once at teardown; implementations must treat
/// every call after that as a no-op.
pub trait Renderer {
    /// Resize the output to `width x height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Upload model geometry, replacing any previous model.
    fn upload_model(&mut self, mesh: &ModelMesh);

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an error for unrecoverable surface failures.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), SceneError>;

    /// Free every GPU resource.
    fn release(&mut self);
}
