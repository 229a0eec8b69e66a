use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Ids of the page elements the scene binds to.
pub struct PageOptions {
    /// Element the canvas is appended to. Required.
    pub container_id: String,
    /// Element whose width tracks scroll progress. Optional in the page;
    /// `None` disables progress updates entirely.
    pub progress_id: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            container_id: "three-container".into(),
            progress_id: Some("scroll-progress".into()),
        }
    }
}
