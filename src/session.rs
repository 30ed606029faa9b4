//! Drag session: the ephemeral state of one in-progress pointer gesture.
//!
//! A session is created on pointer-down over a bar (or not at all, when the
//! target phase is missing/empty - silent no-op), updated on every pointer
//! move, and consumed exactly once by [`DragSession::finish`] or dropped by
//! [`DragSession::cancel`]. Live geometry is recomputed on every update from
//! the session-start snapshot plus the *current* pointer position, never from
//! the previous move's output, so throttled or dropped move events cannot
//! accumulate drift.

use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use crate::axis::Axis;
use crate::estimate::{Estimate, PhaseSpan};

/// Pointer displacement (local px) past which a gesture counts as a drag
/// rather than a click.
pub const DRAG_THRESHOLD_PX: f32 = 3.0;

/// What is being dragged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// Moving one phase's bar horizontally.
    MoveSegment { phase: String },
    /// Dragging one phase bar's left edge; the right edge stays fixed.
    ResizeLeft { phase: String },
    /// Dragging one phase bar's right edge; the left edge stays fixed.
    ResizeRight { phase: String },
    /// Moving the whole group bar: every phase shifts by the same delta.
    MoveGroup,
}

#[derive(Clone, Debug)]
pub struct DragSession {
    pub estimate_uuid: Uuid,
    pub kind: DragKind,
    /// Span of the dragged bar (union span for group moves) at pointer-down.
    pub start_span: PhaseSpan,
    /// Deep snapshot of every phase's interval list at pointer-down. The
    /// commit merges the gesture's result over this, so one gesture always
    /// yields the complete phase map.
    pub phases_at_start: IndexMap<String, Vec<i32>>,
    /// Local-px position of the tracked geometry at pointer-down: the bar's
    /// left edge for moves and left resizes, the right edge for right
    /// resizes.
    pub anchor_x: f32,
    /// Pointer-down position in local px.
    pub origin_x: f32,
    /// Accumulated pointer delta in local px (current pointer - origin).
    pub live_dx: f32,
    /// Latched once displacement exceeds [`DRAG_THRESHOLD_PX`]; the caller
    /// uses it to tell a group-bar click from a group drag.
    pub moved: bool,
}

impl DragSession {
    /// Start moving one phase bar. `None` when the phase is absent or empty:
    /// no session, no visual feedback, no callback.
    pub fn begin_move(
        estimate: &Estimate,
        phase: &str,
        axis: &Axis,
        pointer_local_x: f32,
    ) -> Option<Self> {
        let span = estimate.phase_span(phase)?;
        let (x, _) = axis.span_geometry(span);
        debug!(
            "begin move: {} phase={phase} span={}..{}",
            estimate.uuid, span.start, span.end
        );
        Some(Self::new(
            estimate,
            DragKind::MoveSegment { phase: phase.to_string() },
            span,
            x,
            pointer_local_x,
        ))
    }

    /// Start resizing one edge of a phase bar.
    pub fn begin_resize(
        estimate: &Estimate,
        phase: &str,
        left_edge: bool,
        axis: &Axis,
        pointer_local_x: f32,
    ) -> Option<Self> {
        let span = estimate.phase_span(phase)?;
        let (x, w) = axis.span_geometry(span);
        let (kind, anchor_x) = if left_edge {
            (DragKind::ResizeLeft { phase: phase.to_string() }, x)
        } else {
            (DragKind::ResizeRight { phase: phase.to_string() }, x + w)
        };
        debug!(
            "begin resize ({}): {} phase={phase} span={}..{}",
            if left_edge { "left" } else { "right" },
            estimate.uuid,
            span.start,
            span.end
        );
        Some(Self::new(estimate, kind, span, anchor_x, pointer_local_x))
    }

    /// Start moving the whole group bar. `None` when no phase occupies any
    /// interval (there is no group bar to grab).
    pub fn begin_group(estimate: &Estimate, axis: &Axis, pointer_local_x: f32) -> Option<Self> {
        let span = estimate.union_span()?;
        let (x, _) = axis.span_geometry(span);
        debug!(
            "begin group move: {} union={}..{}",
            estimate.uuid, span.start, span.end
        );
        Some(Self::new(estimate, DragKind::MoveGroup, span, x, pointer_local_x))
    }

    fn new(
        estimate: &Estimate,
        kind: DragKind,
        start_span: PhaseSpan,
        anchor_x: f32,
        origin_x: f32,
    ) -> Self {
        Self {
            estimate_uuid: estimate.uuid,
            kind,
            start_span,
            phases_at_start: estimate.phases.clone(),
            anchor_x,
            origin_x,
            live_dx: 0.0,
            moved: false,
        }
    }

    /// Feed the current pointer position (local px). Idempotent with respect
    /// to event loss: state depends only on this position and the start
    /// snapshot.
    pub fn update(&mut self, pointer_local_x: f32) {
        self.live_dx = pointer_local_x - self.origin_x;
        if self.live_dx.abs() > DRAG_THRESHOLD_PX {
            self.moved = true;
        }
    }

    /// Current raw (unsnapped) bar geometry for live visual feedback, as
    /// local (x, width). Resizes are pinned so the bar never renders
    /// inverted; the commit-side clamps are authoritative.
    pub fn live_geometry(&self, axis: &Axis) -> (f32, f32) {
        let (start_x, start_w) = axis.span_geometry(self.start_span);
        match self.kind {
            DragKind::MoveSegment { .. } | DragKind::MoveGroup => {
                (start_x + self.live_dx, start_w)
            }
            DragKind::ResizeLeft { .. } => {
                let right = start_x + start_w;
                let left = (self.anchor_x + self.live_dx).min(right - 1.0);
                (left, right - left)
            }
            DragKind::ResizeRight { .. } => {
                let right = (self.anchor_x + self.live_dx).max(start_x + 1.0);
                (start_x, right - start_x)
            }
        }
    }

    /// Abandon the gesture: nothing is emitted and the next render comes
    /// from the caller's (unchanged) model.
    pub fn cancel(self) {
        debug!("cancel drag: {} ({:?})", self.estimate_uuid, self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> Axis {
        Axis::new(10, 20.0, 100.0)
    }

    fn estimate() -> Estimate {
        Estimate::new("renovation")
            .with_phase("design", vec![2, 3, 4])
            .with_phase("build", vec![3, 4, 5])
    }

    #[test]
    fn begin_on_missing_or_empty_phase_is_silent() {
        let est = estimate().with_phase("qa", vec![]);
        let ax = axis();
        assert!(DragSession::begin_move(&est, "qa", &ax, 0.0).is_none());
        assert!(DragSession::begin_move(&est, "nope", &ax, 0.0).is_none());
        assert!(DragSession::begin_resize(&est, "qa", true, &ax, 0.0).is_none());
    }

    #[test]
    fn begin_group_on_all_empty_is_silent() {
        let est = Estimate::new("empty").with_phase("design", vec![]);
        assert!(DragSession::begin_group(&est, &axis(), 0.0).is_none());
    }

    #[test]
    fn moved_flag_latches_past_threshold() {
        let est = estimate();
        let ax = axis();
        let mut session = DragSession::begin_group(&est, &ax, 200.0).unwrap();
        session.update(202.0);
        assert!(!session.moved, "2px is a click, not a drag");
        session.update(205.0);
        assert!(session.moved);
        // moving back under the threshold does not unlatch
        session.update(200.5);
        assert!(session.moved);
    }

    #[test]
    fn live_geometry_tracks_pointer_without_drift() {
        let est = estimate();
        let ax = axis();
        // design spans [2,4]: x = 100 + 20 = 120, w = 60
        let mut session = DragSession::begin_move(&est, "design", &ax, 130.0).unwrap();
        session.update(145.5);
        assert_eq!(session.live_geometry(&ax), (135.5, 60.0));
        // a burst of updates ends at the same place as a single one
        for x in [200.0, 90.0, 145.5] {
            session.update(x);
        }
        assert_eq!(session.live_geometry(&ax), (135.5, 60.0));
    }

    #[test]
    fn live_resize_never_renders_inverted() {
        let est = estimate();
        let ax = axis();
        // build spans [3,5]: x = 140, w = 60, right edge at 200
        let mut session = DragSession::begin_resize(&est, "build", false, &ax, 200.0).unwrap();
        session.update(-500.0);
        let (x, w) = session.live_geometry(&ax);
        assert_eq!(x, 140.0);
        assert!(w > 0.0);
    }
}
