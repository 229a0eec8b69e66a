//! Crate-level error types.

use std::fmt;

use crate::asset::AssetError;
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the ares-scene crate.
#[derive(Debug)]
pub enum SceneError {
    /// The mount container element was not found in the page.
    ContainerMissing(String),
    /// The host refused to register an event listener.
    Listener(String),
    /// Failed to fetch or parse the model asset.
    Asset(AssetError),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Unrecoverable presentation surface failure.
    Surface(wgpu::SurfaceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// A browser DOM call failed.
    Dom(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerMissing(id) => {
                write!(f, "container element '{id}' not found")
            }
            Self::Listener(msg) => {
                write!(f, "failed to register listener: {msg}")
            }
            Self::Asset(e) => write!(f, "asset error: {e}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Asset(e) => Some(e),
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SceneError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<AssetError> for SceneError {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_missing_names_the_element() {
        let err = SceneError::ContainerMissing("three-container".into());
        assert_eq!(
            err.to_string(),
            "container element 'three-container' not found"
        );
    }

    #[test]
    fn asset_error_is_exposed_as_source() {
        let err = SceneError::from(AssetError::Empty);
        assert!(std::error::Error::source(&err).is_some());
    }
}
