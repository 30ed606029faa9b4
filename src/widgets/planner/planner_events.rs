//! Planner widget events, handed to the host through a dispatch closure.

use indexmap::IndexMap;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub enum PlannerEvent {
    /// Exactly one per completed drag/resize gesture, carrying the complete
    /// updated phase map for the estimate (unchanged maps included - a
    /// zero-delta gesture still emits).
    PlanChanged {
        estimate_uuid: Uuid,
        phases: IndexMap<String, Vec<i32>>,
    },
    /// Group bar clicked without crossing the drag threshold.
    RowToggled { estimate_uuid: Uuid, expanded: bool },
    RowSelected { estimate_uuid: Uuid },
    ZoomChanged(f32),
    PanChanged(f32),
}
