//! planbar - interactive phase-bar planner widget for egui
//!
//! A headless timeline-bar interaction engine (axis geometry, drag-state
//! machine, commit engine) plus an egui widget that renders estimate rows
//! and wires pointer input to it. Re-exports all modules for use by binary
//! targets.

// Interaction engine (pure, UI-free)
pub mod axis;
pub mod commit;
pub mod estimate;
pub mod session;
pub mod view;

// App modules
pub mod cli;
pub mod widgets;

// Re-export commonly used types
pub use axis::Axis;
pub use commit::{GestureOutcome, PlanChange};
pub use estimate::{Estimate, PhaseSpan};
pub use session::{DragKind, DragSession, DRAG_THRESHOLD_PX};
pub use view::ViewTransform;
pub use widgets::planner::{PlannerConfig, PlannerEvent, PlannerState};
