//! Model asset handling: URL resolution and glTF/GLB parsing into a flat
//! triangle mesh the renderer can upload directly.

mod mesh;
mod path;

use std::fmt;

pub use mesh::{parse_model, MeshVertex, ModelMesh};
pub use path::resolve_asset_url;

/// Errors raised while fetching or decoding the model.
#[derive(Debug)]
pub enum AssetError {
    /// The bytes could not be retrieved (network, HTTP status, file I/O).
    Fetch(String),
    /// The bytes are not a readable glTF/GLB document.
    Parse(String),
    /// The document parsed but holds no triangle geometry.
    Empty,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(msg) => write!(f, "fetch failed: {msg}"),
            Self::Parse(msg) => write!(f, "invalid glTF: {msg}"),
            Self::Empty => write!(f, "model contains no triangle meshes"),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<gltf::Error> for AssetError {
    fn from(e: gltf::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
