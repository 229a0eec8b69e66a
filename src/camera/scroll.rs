use glam::Vec3;

use super::Camera;
use crate::options::ScrollOptions;
use crate::util::easing::EasingFunction;

/// Raw page scroll state, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset.
    pub scroll_y: f32,
    /// Full document height.
    pub document_height: f32,
    /// Visible viewport height.
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Normalized scroll position in `[0, 1]`. A page without a scrollable
    /// range reports 0.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        let range = self.document_height - self.viewport_height;
        if range <= 0.0 || !range.is_finite() {
            return 0.0;
        }
        let f = self.scroll_y / range;
        if f.is_nan() {
            0.0
        } else {
            f.clamp(0.0, 1.0)
        }
    }
}

/// Pure mapping from scroll fraction to camera height and progress width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMapping {
    /// Camera Y at fraction 0.
    pub top_y: f32,
    /// Camera Y at fraction 1.
    pub bottom_y: f32,
    /// Curve applied to the fraction before interpolating.
    pub easing: EasingFunction,
}

impl ScrollMapping {
    /// Mapping from options.
    #[must_use]
    pub fn from_options(options: &ScrollOptions) -> Self {
        Self {
            top_y: options.top_y,
            bottom_y: options.bottom_y,
            easing: options.easing,
        }
    }

    /// Eased fraction.
    #[inline]
    #[must_use]
    pub fn eased(&self, fraction: f32) -> f32 {
        self.easing.evaluate(fraction)
    }

    /// Camera Y for a scroll fraction.
    #[inline]
    #[must_use]
    pub fn camera_y(&self, fraction: f32) -> f32 {
        self.top_y + (self.bottom_y - self.top_y) * self.eased(fraction)
    }

    /// Progress bar width in percent for a scroll fraction.
    #[inline]
    #[must_use]
    pub fn progress_percent(&self, fraction: f32) -> f32 {
        self.eased(fraction) * 100.0
    }
}

/// Moves the camera along Y while keeping its viewing direction.
///
/// The look-at offset is captured once from the initial pose (eye above the
/// nose cone, looking at the wrapper). Each scroll update moves eye and
/// target together, so the camera translates and never tilts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRig {
    mapping: ScrollMapping,
    look_offset: Vec3,
}

impl ScrollRig {
    /// Rig for a camera whose top pose looks at `focus`.
    #[must_use]
    pub fn new(mapping: ScrollMapping, top_eye: Vec3, focus: Vec3) -> Self {
        Self {
            mapping,
            look_offset: focus - top_eye,
        }
    }

    /// Place the camera for `fraction`; returns the progress percentage.
    pub fn apply(&self, camera: &mut Camera, fraction: f32) -> f32 {
        camera.eye.y = self.mapping.camera_y(fraction);
        camera.target = camera.eye + self.look_offset;
        self.mapping.progress_percent(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn mapping() -> ScrollMapping {
        ScrollMapping::from_options(&ScrollOptions::default())
    }

    #[test]
    fn fraction_divides_by_scrollable_range() {
        let metrics = ScrollMetrics {
            scroll_y: 500.0,
            document_height: 3000.0,
            viewport_height: 1000.0,
        };
        assert_eq!(metrics.fraction(), 0.25);
    }

    #[test]
    fn fraction_is_clamped() {
        let over = ScrollMetrics {
            scroll_y: 5000.0,
            document_height: 3000.0,
            viewport_height: 1000.0,
        };
        assert_eq!(over.fraction(), 1.0);
        let under = ScrollMetrics {
            scroll_y: -40.0,
            ..over
        };
        assert_eq!(under.fraction(), 0.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        let metrics = ScrollMetrics {
            scroll_y: 0.0,
            document_height: 800.0,
            viewport_height: 800.0,
        };
        assert_eq!(metrics.fraction(), 0.0);
        assert_eq!(ScrollMetrics::default().fraction(), 0.0);
    }

    #[test]
    fn camera_y_follows_square_curve() {
        let m = mapping();
        for i in 0..=20 {
            let f = i as f32 / 20.0;
            let expected = m.top_y + (m.bottom_y - m.top_y) * f * f;
            assert!((m.camera_y(f) - expected).abs() < 1e-3, "f = {f}");
        }
    }

    #[test]
    fn camera_y_is_monotonic() {
        let m = mapping();
        let mut prev = m.camera_y(0.0);
        for i in 1..=100 {
            let y = m.camera_y(i as f32 / 100.0);
            assert!(y <= prev, "camera rose at step {i}");
            prev = y;
        }
        assert_eq!(m.camera_y(0.0), 300.0);
        assert!((m.camera_y(1.0) + 6500.0).abs() < 1e-3);
    }

    #[test]
    fn progress_is_hundred_times_eased_fraction() {
        let m = mapping();
        assert_eq!(m.progress_percent(0.0), 0.0);
        assert_eq!(m.progress_percent(0.5), 25.0);
        assert_eq!(m.progress_percent(1.0), 100.0);
    }

    #[test]
    fn rig_translates_without_tilting() {
        let top_eye = Vec3::new(0.0, 300.0, 500.0);
        let focus = Vec3::new(0.0, -300.0, 0.0);
        let rig = ScrollRig::new(mapping(), top_eye, focus);
        let mut camera =
            Camera::new(&CameraOptions::default(), 1.5, top_eye, focus);
        let initial_forward = camera.forward();

        for f in [0.0, 0.3, 0.5, 1.0] {
            let progress = rig.apply(&mut camera, f);
            assert!((camera.forward() - initial_forward).length() < 1e-5);
            assert_eq!(camera.eye.x, 0.0);
            assert_eq!(camera.eye.z, 500.0);
            assert!((progress - 100.0 * f * f).abs() < 1e-3);
        }
        assert!((camera.eye.y + 6500.0).abs() < 1e-3);
    }
}
