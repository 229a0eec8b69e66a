use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Asset location and placement of the model.
///
/// The wrapper is the rotation pivot; `offset`, `rotation` and `scale` are
/// the model's local transform inside it and compensate for where the
/// asset's authored origin sits.
pub struct ModelOptions {
    /// Model file, relative to `base_path`.
    pub asset_path: String,
    /// Static asset base path (the page's public URL). Empty means the site
    /// root.
    pub base_path: String,
    /// World position of the wrapper node.
    pub wrapper_position: [f32; 3],
    /// Model translation inside the wrapper.
    pub offset: [f32; 3],
    /// Model Euler rotation (XYZ order, radians) inside the wrapper.
    pub rotation: [f32; 3],
    /// Model scale inside the wrapper.
    pub scale: [f32; 3],
    /// Roughness applied to every mesh of the model.
    pub roughness: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            asset_path: "Lemaire.glb".into(),
            base_path: String::new(),
            wrapper_position: [0.0, -300.0, 0.0],
            offset: [0.0, -5000.0, 0.0],
            rotation: [0.0, -15.65, 0.0],
            scale: [2000.0; 3],
            roughness: 0.5,
        }
    }
}
