//! Discrete interval axis and position-solver math.
//!
//! The axis is `intervals` equal-width slots (1-indexed) after a fixed left
//! margin. All functions here are pure; interaction code calls them with raw
//! fractional pixel values during a drag and rounds only at commit time.

use serde::{Deserialize, Serialize};

use crate::estimate::PhaseSpan;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Axis {
    /// Number of discrete intervals (N). Valid positions are 1..=N.
    pub intervals: i32,
    /// Pixel width of one interval at zoom 1.0.
    pub interval_width: f32,
    /// Pixel offset of interval 1's left edge in local space.
    pub left_margin: f32,
}

impl Axis {
    pub fn new(intervals: i32, interval_width: f32, left_margin: f32) -> Self {
        Self {
            intervals,
            interval_width,
            left_margin,
        }
    }

    /// Total pixel width of the interval area (margin excluded).
    pub fn pixel_width(&self) -> f32 {
        self.intervals as f32 * self.interval_width
    }

    /// Local-space (x, width) of a span's bar.
    pub fn span_geometry(&self, span: PhaseSpan) -> (f32, f32) {
        let x = self.left_margin + (span.start - 1) as f32 * self.interval_width;
        let width = span.duration() as f32 * self.interval_width;
        (x, width)
    }

    /// Fractional 1-based interval whose left edge sits at local `x`.
    /// Inverse of the x part of [`Axis::span_geometry`].
    pub fn x_to_start(&self, x: f32) -> f32 {
        (x - self.left_margin) / self.interval_width + 1.0
    }

    /// Fractional interval whose *right* edge sits at local `x`.
    pub fn x_to_end(&self, x: f32) -> f32 {
        (x - self.left_margin) / self.interval_width
    }

    /// Pixel delta -> fractional interval delta.
    pub fn delta_to_intervals(&self, dx: f32) -> f32 {
        dx / self.interval_width
    }

    /// Clamp a candidate start so a bar of `duration` intervals stays fully
    /// on the axis. Duration is preserved by construction.
    pub fn clamp_start(&self, candidate: i32, duration: i32) -> i32 {
        candidate.clamp(1, (self.intervals - duration + 1).max(1))
    }

    /// Clamp a left-edge resize candidate: never past the fixed right edge,
    /// never off the axis. A span can shrink to one interval, never invert.
    pub fn clamp_resize_left(&self, candidate: i32, fixed_end: i32) -> i32 {
        candidate.clamp(1, fixed_end)
    }

    /// Clamp a right-edge resize candidate against the fixed left edge.
    pub fn clamp_resize_right(&self, candidate: i32, fixed_start: i32) -> i32 {
        candidate.clamp(fixed_start, self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> Axis {
        Axis::new(10, 24.0, 150.0)
    }

    #[test]
    fn geometry_round_trips_for_all_valid_spans() {
        let ax = axis();
        for start in 1..=ax.intervals {
            for end in start..=ax.intervals {
                let span = PhaseSpan::new(start, end);
                let (x, w) = ax.span_geometry(span);
                let rt_start = ax.x_to_start(x).round() as i32;
                let rt_end = ax.x_to_end(x + w).round() as i32;
                assert_eq!((rt_start, rt_end), (start, end), "span {start}..{end}");
            }
        }
    }

    #[test]
    fn clamp_start_is_idempotent() {
        let ax = axis();
        for candidate in -5..20 {
            for duration in 1..=ax.intervals {
                let once = ax.clamp_start(candidate, duration);
                assert_eq!(ax.clamp_start(once, duration), once);
                assert!(once >= 1 && once + duration - 1 <= ax.intervals);
            }
        }
    }

    #[test]
    fn clamp_start_preserves_duration_at_edges() {
        let ax = axis();
        assert_eq!(ax.clamp_start(-3, 4), 1);
        assert_eq!(ax.clamp_start(9, 4), 7); // 7..10 is the last valid slot
        assert_eq!(ax.clamp_start(5, 4), 5);
    }

    #[test]
    fn resize_clamps_never_invert() {
        let ax = axis();
        // left edge of [3, 7] dragged far right stops at the fixed end
        assert_eq!(ax.clamp_resize_left(12, 7), 7);
        assert_eq!(ax.clamp_resize_left(-4, 7), 1);
        // right edge of [3, 3] dragged far left stops at the fixed start
        assert_eq!(ax.clamp_resize_right(0, 3), 3);
        assert_eq!(ax.clamp_resize_right(25, 3), 10);
    }
}
