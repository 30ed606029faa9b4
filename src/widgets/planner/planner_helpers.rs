//! Planner UI helpers: tools, coordinate plumbing and drawing utilities.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Ui, Vec2};

use super::{PlannerConfig, PlannerState};
use crate::axis::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SegmentTool {
    ResizeLeft,
    ResizeRight,
    Move,
}

impl SegmentTool {
    pub(super) fn cursor(&self) -> egui::CursorIcon {
        match self {
            SegmentTool::ResizeLeft | SegmentTool::ResizeRight => {
                egui::CursorIcon::ResizeHorizontal
            }
            SegmentTool::Move => egui::CursorIcon::Grab,
        }
    }
}

pub(super) fn detect_segment_tool(
    hover_pos: Pos2,
    bar_rect: Rect,
    edge_threshold: f32,
) -> Option<SegmentTool> {
    // Allow grabbing slightly outside the bar so thin bars stay resizable
    if !bar_rect.expand(edge_threshold).contains(hover_pos) {
        return None;
    }

    let dist_to_left = (hover_pos.x - bar_rect.min.x).abs();
    let dist_to_right = (hover_pos.x - bar_rect.max.x).abs();

    if dist_to_left < edge_threshold {
        Some(SegmentTool::ResizeLeft)
    } else if dist_to_right < edge_threshold {
        Some(SegmentTool::ResizeRight)
    } else if bar_rect.contains(hover_pos) {
        Some(SegmentTool::Move)
    } else {
        None
    }
}

pub(super) fn local_to_screen_x(local_x: f32, origin_x: f32, state: &PlannerState) -> f32 {
    state.view().to_screen(local_x, origin_x)
}

pub(super) fn screen_x_to_local(x: f32, origin_x: f32, state: &PlannerState) -> f32 {
    state.view().to_local(x, origin_x)
}

pub(super) fn row_to_y(row: usize, config: &PlannerConfig, canvas_rect: Rect) -> f32 {
    canvas_rect.min.y + row as f32 * config.row_height
}

/// Draw the interval ruler strip and return its rect. Tick/label stepping
/// adapts to the effective interval width so labels never overlap.
pub(super) fn draw_interval_ruler(
    ui: &mut Ui,
    axis: &Axis,
    config: &PlannerConfig,
    state: &PlannerState,
    width: f32,
) -> Rect {
    let ruler_height = 20.0;
    let (rect, _response) =
        ui.allocate_exact_size(Vec2::new(width, ruler_height), Sense::hover());

    if !ui.is_rect_visible(rect) {
        return rect;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Color32::from_gray(25));

    let effective_iw = axis.interval_width * state.zoom;
    let label_step = if effective_iw > 18.0 {
        1
    } else if effective_iw > 9.0 {
        2
    } else {
        5
    };

    for interval in 1..=axis.intervals {
        let (local_x, _) = axis.span_geometry(crate::estimate::PhaseSpan::new(interval, interval));
        let x = local_to_screen_x(local_x, rect.min.x, state);
        if x < rect.min.x || x > rect.max.x {
            continue;
        }

        painter.line_segment(
            [Pos2::new(x, rect.max.y - 5.0), Pos2::new(x, rect.max.y)],
            (1.0, Color32::from_gray(100)),
        );

        if config.show_interval_numbers && interval % label_step == 0 {
            painter.text(
                Pos2::new(x + effective_iw * 0.5, rect.min.y + 2.0),
                egui::Align2::CENTER_TOP,
                format!("{}", interval),
                egui::FontId::monospace(9.0),
                Color32::from_gray(150),
            );
        }
    }

    // closing edge of the last interval
    let end_x = local_to_screen_x(axis.left_margin + axis.pixel_width(), rect.min.x, state);
    if end_x >= rect.min.x && end_x <= rect.max.x {
        painter.line_segment(
            [Pos2::new(end_x, rect.max.y - 5.0), Pos2::new(end_x, rect.max.y)],
            (1.0, Color32::from_gray(100)),
        );
    }

    rect
}

/// Outline where the drag will land once snapped.
pub(super) fn draw_snap_preview(painter: &egui::Painter, x0: f32, x1: f32, row_y: f32, row_height: f32) {
    let bar_height = (row_height - 8.0).max(2.0);
    let rect = Rect::from_min_max(
        Pos2::new(x0, row_y + 4.0),
        Pos2::new(x1, row_y + 4.0 + bar_height),
    );
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(2.0, Color32::from_rgba_unmultiplied(100, 220, 255, 180)),
        egui::epaint::StrokeKind::Middle,
    );
}

/// Stable color per phase key (hash of the name, like clip colors).
pub(super) fn phase_color(key: &str) -> Color32 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hue = (hasher.finish() % 360) as f32;
    hsv_to_rgb(hue, 0.65, 0.55)
}

pub(super) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color32 {
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color32::from_rgb(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
