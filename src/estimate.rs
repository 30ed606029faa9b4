//! Estimate: one plannable row with a map of named phases.
//!
//! Each phase stores the list of axis intervals it occupies (1-indexed).
//! Rendering and all interaction math treat the occupied set as the
//! contiguous span `[min, max]`; gaps are not independently representable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contiguous 1-indexed interval span, inclusive on both ends.
///
/// Invariant: `start <= end`. Constructed via [`PhaseSpan::from_intervals`]
/// or by interaction code that clamps before building one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpan {
    pub start: i32,
    pub end: i32,
}

impl PhaseSpan {
    pub fn new(start: i32, end: i32) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// Span covering an occupied-interval list, `None` if the list is empty.
    /// The list does not have to be sorted or contiguous.
    pub fn from_intervals(intervals: &[i32]) -> Option<Self> {
        let start = *intervals.iter().min()?;
        let end = *intervals.iter().max()?;
        Some(Self { start, end })
    }

    /// Number of intervals covered (>= 1).
    pub fn duration(&self) -> i32 {
        self.end - self.start + 1
    }

    /// Materialize the contiguous interval list for storage.
    pub fn intervals(&self) -> Vec<i32> {
        (self.start..=self.end).collect()
    }
}

/// One estimate row: identity, display name, and ordered phase map.
///
/// Phase order is preserved as inserted (matters for row layout and for the
/// emitted updates, hence `IndexMap` rather than `HashMap`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Estimate {
    pub uuid: Uuid,
    pub name: String,
    /// phase key -> occupied intervals (1-indexed, may be unsorted)
    pub phases: IndexMap<String, Vec<i32>>,
}

impl Estimate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            phases: IndexMap::new(),
        }
    }

    pub fn with_phase(mut self, key: impl Into<String>, intervals: Vec<i32>) -> Self {
        self.phases.insert(key.into(), intervals);
        self
    }

    /// Span of one phase, `None` if the phase is absent or empty.
    pub fn phase_span(&self, key: &str) -> Option<PhaseSpan> {
        PhaseSpan::from_intervals(self.phases.get(key)?)
    }

    /// Minimal span covering every non-empty phase; `None` when no phase
    /// occupies any interval (the group bar is simply not rendered then).
    pub fn union_span(&self) -> Option<PhaseSpan> {
        let mut acc: Option<PhaseSpan> = None;
        for intervals in self.phases.values() {
            if let Some(span) = PhaseSpan::from_intervals(intervals) {
                acc = Some(match acc {
                    Some(a) => PhaseSpan {
                        start: a.start.min(span.start),
                        end: a.end.max(span.end),
                    },
                    None => span,
                });
            }
        }
        acc
    }

    /// Replace this estimate's phase map with a committed update.
    pub fn apply(&mut self, phases: IndexMap<String, Vec<i32>>) {
        self.phases = phases;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_from_unsorted_gappy_list() {
        let span = PhaseSpan::from_intervals(&[7, 2, 5]).unwrap();
        assert_eq!(span, PhaseSpan::new(2, 7));
        assert_eq!(span.duration(), 6);
        assert_eq!(span.intervals(), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn span_from_empty_list_is_none() {
        assert_eq!(PhaseSpan::from_intervals(&[]), None);
    }

    #[test]
    fn union_covers_all_phases() {
        let est = Estimate::new("kitchen")
            .with_phase("design", vec![2, 3, 4])
            .with_phase("build", vec![3, 4, 5]);
        assert_eq!(est.union_span(), Some(PhaseSpan::new(2, 5)));
    }

    #[test]
    fn union_skips_empty_phases() {
        let est = Estimate::new("kitchen")
            .with_phase("design", vec![])
            .with_phase("build", vec![8, 9]);
        assert_eq!(est.union_span(), Some(PhaseSpan::new(8, 9)));
    }

    #[test]
    fn union_of_all_empty_is_none() {
        let est = Estimate::new("kitchen").with_phase("design", vec![]);
        assert_eq!(est.union_span(), None);
        assert_eq!(est.phase_span("design"), None);
        assert_eq!(est.phase_span("missing"), None);
    }
}
