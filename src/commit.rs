//! Commit engine: turn a finished drag session into an authoritative
//! phase-map update.
//!
//! All snapping happens here, once, from the session's live geometry. The
//! emitted map is complete (every phase of the estimate, touched or not) and
//! contiguous per phase, so the caller can persist it as-is. One gesture
//! produces exactly one [`PlanChange`], even when nothing moved.

use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use crate::axis::Axis;
use crate::estimate::PhaseSpan;
use crate::session::{DragKind, DragSession};

/// The result handed to the caller after a gesture: the full updated phase
/// map for one estimate. Persistence is the caller's problem; by the time
/// this exists the engine is already idle.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanChange {
    pub estimate_uuid: Uuid,
    pub phases: IndexMap<String, Vec<i32>>,
}

/// A completed gesture: the change to emit, plus whether the pointer ever
/// crossed the drag threshold. Group-bar callers use `moved` to decide
/// between expand/collapse toggle (click) and position update (drag) with no
/// wall-clock involved.
#[derive(Clone, Debug)]
pub struct GestureOutcome {
    pub change: PlanChange,
    pub moved: bool,
}

impl DragSession {
    /// Consume the session and compute the final snapped phase map.
    pub fn finish(self, axis: &Axis) -> GestureOutcome {
        let mut phases = self.phases_at_start.clone();

        match &self.kind {
            DragKind::MoveSegment { phase } => {
                let duration = self.start_span.duration();
                let live_left = self.anchor_x + self.live_dx;
                let candidate = axis.x_to_start(live_left).round() as i32;
                let start = axis.clamp_start(candidate, duration);
                let end = (start + duration - 1).min(axis.intervals);
                phases.insert(phase.clone(), PhaseSpan::new(start, end).intervals());
                debug!("commit move: {phase} -> {start}..{end}");
            }
            DragKind::ResizeLeft { phase } => {
                let live_left = self.anchor_x + self.live_dx;
                let candidate = axis.x_to_start(live_left).round() as i32;
                let start = axis.clamp_resize_left(candidate, self.start_span.end);
                let end = self.start_span.end;
                phases.insert(phase.clone(), PhaseSpan::new(start, end).intervals());
                debug!("commit resize-left: {phase} -> {start}..{end}");
            }
            DragKind::ResizeRight { phase } => {
                let live_right = self.anchor_x + self.live_dx;
                let candidate = axis.x_to_end(live_right).round() as i32;
                let start = self.start_span.start;
                let end = axis.clamp_resize_right(candidate, start);
                phases.insert(phase.clone(), PhaseSpan::new(start, end).intervals());
                debug!("commit resize-right: {phase} -> {start}..{end}");
            }
            DragKind::MoveGroup => {
                let delta = axis.delta_to_intervals(self.live_dx).round() as i32;
                // Per-phase clamping, not block-wide: a phase already at an
                // axis edge absorbs less of the delta than phases with room,
                // so the group's shape can desynchronize under extreme
                // drags. Intentional, matches the shipped behavior.
                for (key, intervals) in self.phases_at_start.iter() {
                    let Some(span) = PhaseSpan::from_intervals(intervals) else {
                        continue; // empty phases stay empty
                    };
                    let start = axis.clamp_start(span.start + delta, span.duration());
                    let end = start + span.duration() - 1;
                    phases.insert(key.clone(), PhaseSpan::new(start, end).intervals());
                }
                debug!("commit group move: {} delta={delta}", self.estimate_uuid);
            }
        }

        GestureOutcome {
            change: PlanChange {
                estimate_uuid: self.estimate_uuid,
                phases,
            },
            moved: self.moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::Estimate;

    fn axis() -> Axis {
        Axis::new(10, 20.0, 100.0)
    }

    fn drag(session: &mut DragSession, dx: f32) {
        session.update(session.origin_x + dx);
    }

    #[test]
    fn move_commit_rounds_to_nearest_interval() {
        let est = Estimate::new("e").with_phase("design", vec![2, 3, 4]);
        let ax = axis();
        let mut s = DragSession::begin_move(&est, "design", &ax, 130.0).unwrap();
        drag(&mut s, 28.0); // 1.4 intervals -> rounds to +1
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["design"], vec![3, 4, 5]);
    }

    #[test]
    fn move_commit_clamps_to_axis_preserving_duration() {
        let est = Estimate::new("e").with_phase("design", vec![7, 8, 9]);
        let ax = axis();
        let mut s = DragSession::begin_move(&est, "design", &ax, 250.0).unwrap();
        drag(&mut s, 400.0); // way past the right edge
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["design"], vec![8, 9, 10]);
    }

    #[test]
    fn resize_right_of_single_interval_never_inverts() {
        let est = Estimate::new("e").with_phase("qa", vec![3]);
        let ax = axis();
        // right edge of [3,3] sits at 100 + 3*20 = 160
        let mut s = DragSession::begin_resize(&est, "qa", false, &ax, 160.0).unwrap();
        drag(&mut s, -300.0); // far left, past interval 1
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["qa"], vec![3]);
    }

    #[test]
    fn resize_left_holds_right_edge_fixed() {
        let est = Estimate::new("e").with_phase("build", vec![4, 5, 6, 7]);
        let ax = axis();
        let mut s = DragSession::begin_resize(&est, "build", true, &ax, 160.0).unwrap();
        drag(&mut s, 41.0); // +2.05 intervals
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["build"], vec![6, 7]);
    }

    #[test]
    fn group_shift_happy_path() {
        let est = Estimate::new("e")
            .with_phase("A", vec![2, 3, 4])
            .with_phase("B", vec![3, 4, 5]);
        let ax = axis();
        let mut s = DragSession::begin_group(&est, &ax, 140.0).unwrap();
        drag(&mut s, 40.0); // exactly +2 intervals
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["A"], vec![4, 5, 6]);
        assert_eq!(out.change.phases["B"], vec![5, 6, 7]);
    }

    #[test]
    fn group_shift_desynchronizes_at_axis_edge() {
        // B is already flush against the right edge; A has room. The +3
        // delta lands fully on A and not at all on B - the documented
        // divergence, not "no movement" and not "full movement".
        let est = Estimate::new("e")
            .with_phase("A", vec![1, 2, 3])
            .with_phase("B", vec![8, 9, 10]);
        let ax = axis();
        let mut s = DragSession::begin_group(&est, &ax, 150.0).unwrap();
        drag(&mut s, 60.0); // +3 intervals
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["A"], vec![4, 5, 6]);
        assert_eq!(out.change.phases["B"], vec![8, 9, 10]);
    }

    #[test]
    fn group_commit_leaves_empty_phases_empty() {
        let est = Estimate::new("e")
            .with_phase("A", vec![2, 3])
            .with_phase("backlog", vec![]);
        let ax = axis();
        let mut s = DragSession::begin_group(&est, &ax, 140.0).unwrap();
        drag(&mut s, 20.0);
        let out = s.finish(&ax);
        assert_eq!(out.change.phases["A"], vec![3, 4]);
        assert!(out.change.phases["backlog"].is_empty());
    }

    #[test]
    fn zero_delta_gesture_still_emits_the_unchanged_map() {
        let est = Estimate::new("e").with_phase("A", vec![2, 3, 4]);
        let ax = axis();
        let s = DragSession::begin_group(&est, &ax, 140.0).unwrap();
        let out = s.finish(&ax);
        assert!(!out.moved);
        assert_eq!(out.change.phases, est.phases);
    }

    #[test]
    fn sub_threshold_drag_commits_but_reports_click() {
        let est = Estimate::new("e").with_phase("A", vec![2, 3, 4]);
        let ax = axis();
        let mut s = DragSession::begin_group(&est, &ax, 140.0).unwrap();
        drag(&mut s, 2.0); // below the 3px threshold
        let out = s.finish(&ax);
        assert!(!out.moved, "2px gesture must read as a click");
        assert_eq!(out.change.phases["A"], vec![2, 3, 4]);

        let mut s = DragSession::begin_group(&est, &ax, 140.0).unwrap();
        drag(&mut s, 5.0); // past the threshold, rounds to zero intervals
        let out = s.finish(&ax);
        assert!(out.moved, "5px gesture must read as a drag");
        assert_eq!(out.change.phases["A"], vec![2, 3, 4]);
    }

    #[test]
    fn exactly_one_change_per_gesture() {
        let est = Estimate::new("e").with_phase("A", vec![2, 3, 4]);
        let ax = axis();

        for move_events in [0usize, 1, 100] {
            let mut emitted = 0;
            let mut on_change = |_change: PlanChange| emitted += 1;

            let mut session = DragSession::begin_move(&est, "A", &ax, 130.0).unwrap();
            for i in 0..move_events {
                session.update(130.0 + i as f32 * 0.5);
            }
            on_change(session.finish(&ax).change);

            assert_eq!(emitted, 1, "{move_events} move events");
        }
    }

    #[test]
    fn cancel_emits_nothing() {
        let est = Estimate::new("e").with_phase("A", vec![2, 3, 4]);
        let ax = axis();
        let mut session = DragSession::begin_move(&est, "A", &ax, 130.0).unwrap();
        session.update(500.0);
        session.cancel(); // consumes the session; no PlanChange exists
    }
}
