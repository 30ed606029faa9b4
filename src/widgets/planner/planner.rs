//! Planner widget - state and configuration.
//! Shared by the renderer and the host app. The host keeps `PlannerState`
//! between frames (it is serde-persistable apart from the live drag
//! session) and passes `PlannerConfig` plus the estimate list on every
//! render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::DragSession;
use crate::view::ViewTransform;

/// Configuration for the planner widget
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub row_height: f32,
    pub name_column_width: f32,
    /// Pixel width of one axis interval at zoom 1.0.
    pub interval_width: f32,
    /// Local-px offset of interval 1 inside the bar area.
    pub left_margin: f32,
    /// Pixel distance from a bar edge that still counts as a resize handle.
    pub edge_threshold: f32,
    pub show_interval_numbers: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            row_height: 26.0,
            name_column_width: 180.0,
            interval_width: 28.0,
            left_margin: 8.0,
            edge_threshold: 8.0,
            show_interval_numbers: true,
        }
    }
}

/// Planner state (persistent between frames)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerState {
    /// Zoom multiplier (1.0 = default)
    pub zoom: f32,
    /// Horizontal pan offset in local pixels
    pub pan_offset: f32,
    pub selected: Option<Uuid>,
    /// Estimates whose phase rows are folded away (only the group bar shows)
    pub collapsed: HashSet<Uuid>,
    /// Active drag session; exists only between pointer-down and pointer-up
    #[serde(skip)]
    pub session: Option<DragSession>,
    pub last_canvas_width: f32,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: 0.0,
            selected: None,
            collapsed: HashSet::new(),
            session: None,
            last_canvas_width: 0.0,
        }
    }
}

impl PlannerState {
    pub fn view(&self) -> ViewTransform {
        ViewTransform {
            zoom: self.zoom,
            pan: self.pan_offset,
        }
    }
}
