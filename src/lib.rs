// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven 3D hero scene for the ARES landing page, built on wgpu.
//!
//! A rocket model sits behind the page content. Dragging the mouse spins it
//! about its vertical axis, it turns slowly on its own while idle, and the
//! camera slides down the rocket as the page scrolls while a progress bar
//! tracks the eased scroll position.
//!
//! # Key entry points
//!
//! - [`controller::SceneController`] - owns the scene, camera and renderer
//!   and reacts to [`input::InputEvent`]s
//! - [`render_loop::RenderLoop`] - explicit start/stop frame stepping
//! - [`host::Host`] / [`renderer::Renderer`] - the platform seams
//! - [`options::SceneOptions`] - TOML/JSON configuration
//!
//! # Front ends
//!
//! With the `web` feature the crate exports a `start()` function for the
//! browser that mounts a transparent canvas into the page. With the `viewer`
//! feature it ships a native preview window where the mouse wheel scrolls a
//! virtual page.

pub mod asset;
pub mod camera;
pub mod controller;
pub mod error;
pub mod gpu;
pub mod host;
pub mod input;
pub mod options;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use controller::SceneController;
pub use error::SceneError;
pub use input::InputEvent;
pub use options::SceneOptions;
pub use render_loop::RenderLoop;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
