//! Asynchronous model loading with stale-result rejection.
//!
//! The fetch itself happens outside the controller (a browser `fetch`, a
//! file read in the viewer). The controller hands out a [`LoadTicket`] and
//! accepts the result only while that ticket is still current.

use super::SceneController;
use crate::asset::{resolve_asset_url, AssetError, ModelMesh};
use crate::host::Host;
use crate::renderer::Renderer;
use crate::scene::Transform;

/// Proof of a requested load. Returned to
/// [`SceneController::finish_load`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    url: String,
}

impl LoadTicket {
    /// Resolved asset URL to fetch.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// What [`SceneController::finish_load`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The model is attached and ready.
    Attached,
    /// The load failed; the scene continues without a model.
    Failed,
    /// The ticket was stale (teardown or a newer load); nothing changed.
    Discarded,
}

impl<R: Renderer, H: Host> SceneController<R, H> {
    /// Start loading the configured model.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        let model = &self.options.model;
        let url = resolve_asset_url(&model.base_path, &model.asset_path);
        if self.is_active() {
            self.scene.wrapper_mut().mark_loading();
        }
        log::debug!("loading model from {url}");
        LoadTicket {
            generation: self.load_generation,
            url,
        }
    }

    /// Deliver the result of a load started with [`begin_load`](Self::begin_load).
    ///
    /// Failures are logged and leave the wrapper empty; there is no retry.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<ModelMesh, AssetError>,
    ) -> LoadOutcome {
        if !self.is_active() || ticket.generation != self.load_generation {
            log::debug!("discarding stale model load for {}", ticket.url);
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(mesh) => {
                log::info!(
                    "model loaded from {}: {} vertices, {} triangles",
                    ticket.url,
                    mesh.vertices.len(),
                    mesh.triangle_count()
                );
                if let Some((min, max)) = mesh.bounds() {
                    log::debug!("model bounds {min} .. {max}");
                }
                self.renderer.upload_model(&mesh);
                let local = Transform::from_model_options(&self.options.model);
                self.scene.wrapper_mut().attach(mesh, local);
                LoadOutcome::Attached
            }
            Err(e) => {
                log::error!("failed to load model from {}: {e}", ticket.url);
                self.scene.wrapper_mut().mark_failed();
                LoadOutcome::Failed
            }
        }
    }
}
