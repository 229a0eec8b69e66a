//! Shared utilities: easing curves for the scroll mapping and frame timing
//! for the render loop.

pub mod easing;
pub mod frame_timing;
