//! Scene configuration with TOML and JSON support.
//!
//! Every tweakable constant of the hero scene (camera framing, scroll
//! endpoints, model placement, interaction speeds, lights, DOM ids) lives
//! here. All sections use `#[serde(default)]`, so a partial file that only
//! overrides `[scroll]` keeps every other default.

mod camera;
mod interaction;
mod lighting;
mod model;
mod page;
mod scroll;

use std::path::Path;

pub use camera::CameraOptions;
pub use interaction::InteractionOptions;
pub use lighting::{Light, LightingOptions};
pub use model::ModelOptions;
pub use page::PageOptions;
pub use scroll::ScrollOptions;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SceneOptions {
    /// Perspective projection and camera distance.
    pub camera: CameraOptions,
    /// Scroll-to-camera mapping.
    pub scroll: ScrollOptions,
    /// Asset location and placement of the model inside its wrapper.
    pub model: ModelOptions,
    /// Drag sensitivity and idle rotation speed.
    pub interaction: InteractionOptions,
    /// Lights and clear color.
    pub lighting: LightingOptions,
    /// Ids of the page elements the scene binds to.
    pub page: PageOptions,
}

impl SceneOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::OptionsParse`] if it is not valid TOML for these options.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))
    }

    /// Parse options from a JSON string (the form the web entry point
    /// receives from the page).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] on malformed input.
    pub fn from_json(content: &str) -> Result<Self, SceneError> {
        serde_json::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] if serialization fails and
    /// [`SceneError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
