//! Camera system for the hero scene.
//!
//! A single perspective camera that only ever translates vertically with
//! the page scroll, plus the pure scroll-to-camera mapping.

/// Core camera struct and matrices.
pub mod core;
/// Scroll metrics, the eased scroll mapping and the translate-only rig.
pub mod scroll;

pub use self::core::Camera;
pub use self::scroll::{ScrollMapping, ScrollMetrics, ScrollRig};
