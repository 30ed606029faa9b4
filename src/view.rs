//! Screen <-> local coordinate mapping for the planner canvas.
//!
//! Local space is the axis's own pixel space (`Axis::span_geometry` output);
//! screen space is whatever the canvas is currently drawn at after zoom and
//! horizontal pan. The pair of conversions here must stay exact inverses of
//! each other, and degrade to the identity when the transform is unusable
//! rather than failing.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Zoom multiplier (1.0 = native pixels).
    pub zoom: f32,
    /// Horizontal pan in local pixels.
    pub pan: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: 1.0, pan: 0.0 }
    }
}

impl ViewTransform {
    /// A transform that cannot be inverted: non-finite or collapsed zoom.
    fn degenerate(&self) -> bool {
        !self.zoom.is_finite() || !self.pan.is_finite() || self.zoom.abs() < 1e-6
    }

    /// Local x -> screen x, given the canvas origin.
    pub fn to_screen(&self, local_x: f32, origin_x: f32) -> f32 {
        if self.degenerate() {
            return local_x;
        }
        origin_x + (local_x - self.pan) * self.zoom
    }

    /// Screen x -> local x. Falls back to the raw coordinate on a degenerate
    /// transform: downstream math stays well-defined, possibly visually
    /// wrong, never crashing.
    pub fn to_local(&self, screen_x: f32, origin_x: f32) -> f32 {
        if self.degenerate() {
            return screen_x;
        }
        (screen_x - origin_x) / self.zoom + self.pan
    }

    /// Screen pixel delta -> local pixel delta.
    pub fn delta_to_local(&self, screen_dx: f32) -> f32 {
        if self.degenerate() {
            return screen_dx;
        }
        screen_dx / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_under_zoom_and_pan() {
        let view = ViewTransform { zoom: 1.75, pan: 42.0 };
        for local in [0.0_f32, 13.5, 150.0, 901.25] {
            let screen = view.to_screen(local, 300.0);
            let back = view.to_local(screen, 300.0);
            assert!((back - local).abs() < 1e-3, "{local} -> {screen} -> {back}");
        }
    }

    #[test]
    fn degenerate_transform_returns_raw_coordinates() {
        for view in [
            ViewTransform { zoom: 0.0, pan: 10.0 },
            ViewTransform { zoom: f32::NAN, pan: 0.0 },
            ViewTransform { zoom: 1.0, pan: f32::INFINITY },
        ] {
            assert_eq!(view.to_local(123.0, 300.0), 123.0);
            assert_eq!(view.to_screen(123.0, 300.0), 123.0);
            assert_eq!(view.delta_to_local(7.0), 7.0);
        }
    }

    #[test]
    fn delta_ignores_pan() {
        let view = ViewTransform { zoom: 2.0, pan: 500.0 };
        assert!((view.delta_to_local(10.0) - 5.0).abs() < 1e-6);
    }
}
