use crate::camera::ScrollMetrics;

/// Platform-agnostic input events.
///
/// Front ends translate DOM or window events into these and feed them to
/// [`SceneController::handle_event`](crate::SceneController::handle_event).
///
/// # Example
///
/// ```ignore
/// controller.handle_event(InputEvent::PointerDown { x: 120.0 });
/// controller.handle_event(InputEvent::PointerMove { x: 220.0 });
/// controller.handle_event(InputEvent::PointerUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the scene surface.
    PointerDown {
        /// Horizontal client position in CSS pixels.
        x: f32,
    },
    /// Pointer moved over the scene surface.
    PointerMove {
        /// Horizontal client position in CSS pixels.
        x: f32,
    },
    /// Primary button released.
    PointerUp,
    /// Pointer left the scene surface.
    PointerLeave,
    /// The page scrolled.
    Scroll(ScrollMetrics),
    /// The viewport changed size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}
