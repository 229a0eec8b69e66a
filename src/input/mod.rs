//! Input handling: platform-agnostic events and the drag state machine.

/// Horizontal drag tracking.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;

pub use drag::DragState;
pub use event::InputEvent;
