//! Planner widget - estimate rows with draggable phase bars
//!
//! Group summary bar per estimate, one phase bar per row when expanded.

mod planner;
mod planner_events;
mod planner_helpers;
mod planner_ui;

pub use planner::{PlannerConfig, PlannerState};
pub use planner_events::PlannerEvent;
pub use planner_ui::{render_planner, render_toolbar};
