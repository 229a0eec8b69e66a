use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::asset::ModelMesh;
use crate::options::ModelOptions;

/// Load state of the wrapper's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelState {
    /// No load has been requested yet.
    #[default]
    Unloaded,
    /// A load is in flight; the wrapper is empty.
    Loading,
    /// The model is attached and responds to rotation.
    Ready,
    /// The load failed; the wrapper stays empty for good.
    Failed,
}

/// Translation, Euler rotation (XYZ, radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation.
    pub translation: Vec3,
    /// Euler angles applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// Local transform of the model inside its wrapper.
    #[must_use]
    pub fn from_model_options(options: &ModelOptions) -> Self {
        Self {
            translation: options.offset.into(),
            rotation: options.rotation.into(),
            scale: options.scale.into(),
        }
    }

    /// `T * R * S` matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A loaded mesh together with its placement inside the wrapper.
#[derive(Debug, Clone)]
pub struct AttachedModel {
    /// Geometry.
    pub mesh: ModelMesh,
    /// Local transform compensating for the asset's authored origin.
    pub local: Transform,
}

/// Pivot node for the model: fixed position, mutable yaw.
///
/// Rotation requests are ignored until a model is attached, so drag and
/// idle rotation are inert while loading and after a failed load.
#[derive(Debug)]
pub struct ModelWrapper {
    position: Vec3,
    yaw: f32,
    state: ModelState,
    model: Option<AttachedModel>,
}

impl ModelWrapper {
    /// Empty wrapper at `position`.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            state: ModelState::Unloaded,
            model: None,
        }
    }

    /// World position (also the camera's initial look-at point).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation about the vertical axis, in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> ModelState {
        self.state
    }

    /// `true` once a model is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == ModelState::Ready
    }

    /// The attached model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&AttachedModel> {
        self.model.as_ref()
    }

    /// Add `delta` radians of yaw. Returns `false` (and does nothing) unless
    /// the model is ready.
    pub fn rotate(&mut self, delta: f32) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.yaw += delta;
        true
    }

    /// Mark a load as in flight. A previously attached model is kept until
    /// its replacement arrives.
    pub fn mark_loading(&mut self) {
        if self.model.is_none() {
            self.state = ModelState::Loading;
        }
    }

    /// Attach a loaded mesh and make the wrapper ready.
    pub fn attach(&mut self, mesh: ModelMesh, local: Transform) {
        self.model = Some(AttachedModel { mesh, local });
        self.state = ModelState::Ready;
    }

    /// Record a failed load. An already attached model stays ready.
    pub fn mark_failed(&mut self) {
        if self.model.is_none() {
            self.state = ModelState::Failed;
        }
    }

    /// Wrapper world matrix: translation then yaw.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)
    }

    /// World matrix of the attached model, if any.
    #[must_use]
    pub fn model_matrix(&self) -> Option<Mat4> {
        self.model
            .as_ref()
            .map(|model| self.world_matrix() * model.local.matrix())
    }
}
