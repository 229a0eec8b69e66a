//! The page-side seam of the controller.
//!
//! A [`Host`] is whatever embeds the scene: the browser document in the web
//! build, the native window in the viewer, a recording fake in tests. The
//! controller only talks to the page through this trait, which keeps every
//! side effect of setup listed in one place so teardown can reverse it.

use crate::camera::ScrollMetrics;
use crate::error::SceneError;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// `width / height`, or 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// The page window (resize, scroll).
    Window,
    /// The scene's drawing surface (pointer events).
    Surface,
}

/// Event listeners the controller registers during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Viewport resized.
    Resize,
    /// Page scrolled.
    Scroll,
    /// Button pressed over the surface.
    PointerDown,
    /// Pointer moved over the surface.
    PointerMove,
    /// Button released over the surface.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
}

impl ListenerKind {
    /// Every listener, in registration order.
    pub const ALL: [Self; 6] = [
        Self::Resize,
        Self::Scroll,
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerLeave,
    ];

    /// DOM event type name.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::PointerDown => "mousedown",
            Self::PointerMove => "mousemove",
            Self::PointerUp => "mouseup",
            Self::PointerLeave => "mouseleave",
        }
    }

    /// Object the listener attaches to.
    #[must_use]
    pub fn target(self) -> ListenerTarget {
        match self {
            Self::Resize | Self::Scroll => ListenerTarget::Window,
            _ => ListenerTarget::Surface,
        }
    }
}

/// Page operations the controller needs.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current page scroll state.
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Append the drawing surface to the element with `container_id`.
    ///
    /// # Errors
    ///
    /// [`SceneError::ContainerMissing`] if no such element exists.
    fn attach_surface(&mut self, container_id: &str) -> Result<(), SceneError>;

    /// Remove the drawing surface from its container if it is still there.
    fn detach_surface(&mut self);

    /// Start delivering events of `kind`.
    ///
    /// # Errors
    ///
    /// [`SceneError::Listener`] if the page refuses the registration.
    fn add_listener(&mut self, kind: ListenerKind) -> Result<(), SceneError>;

    /// Stop delivering events of `kind`. Unknown kinds are ignored.
    fn remove_listener(&mut self, kind: ListenerKind);

    /// Set the width of the progress element, in percent. A missing element
    /// is silently ignored.
    fn set_progress(&mut self, element_id: &str, percent: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_listeners_attach_to_the_surface() {
        for kind in ListenerKind::ALL {
            let expected = matches!(kind, ListenerKind::Resize | ListenerKind::Scroll);
            assert_eq!(kind.target() == ListenerTarget::Window, expected);
        }
    }

    #[test]
    fn degenerate_viewport_has_unit_aspect() {
        let vp = Viewport {
            width: 640,
            height: 0,
        };
        assert_eq!(vp.aspect(), 1.0);
    }

    #[test]
    fn zero_width_viewport_has_unit_aspect() {
        let vp = Viewport {
            width: 0,
            height: 480,
        };
        assert_eq!(vp.aspect(), 1.0);
    }
}
