//! Planner widget - UI rendering and pointer wiring.
//!
//! Each estimate is a group row (summary bar spanning all phases) followed,
//! when expanded, by one row per phase. Interactions:
//!
//! - **Click** on a group bar: toggle expand/collapse (only while the
//!   pointer stayed under the drag threshold)
//! - **Drag** a group bar: shift every phase by the same interval delta
//! - **Drag** a phase bar body: move that phase
//! - **Edge drag** on a phase bar: resize that edge; the other edge is fixed
//! - **Escape**: abandon the gesture, nothing is emitted
//!
//! Data flow: pointer-down creates a `DragSession`, pointer-move feeds it,
//! pointer-up finishes it and dispatches exactly one
//! `PlannerEvent::PlanChanged` through the host's closure. The widget never
//! mutates the estimates; the host applies the emitted phase map and the
//! next frame renders from that authoritative state.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Ui, Vec2};
use uuid::Uuid;

use super::planner_events::PlannerEvent;
use super::planner_helpers::{
    detect_segment_tool, draw_interval_ruler, draw_snap_preview, local_to_screen_x, phase_color,
    row_to_y, screen_x_to_local, SegmentTool,
};
use super::{PlannerConfig, PlannerState};
use crate::axis::Axis;
use crate::estimate::Estimate;
use crate::session::{DragKind, DragSession};

/// One visual row of the canvas.
#[derive(Clone, Debug)]
enum RowKind {
    Group,
    Phase(String),
}

#[derive(Clone, Debug)]
struct Row {
    estimate_idx: usize,
    kind: RowKind,
}

/// Render planner toolbar (zoom controls)
pub fn render_toolbar(
    ui: &mut Ui,
    state: &mut PlannerState,
    mut dispatch: impl FnMut(PlannerEvent),
) {
    ui.horizontal(|ui| {
        ui.label("Zoom:");
        let zoom_response = ui.add_sized(
            Vec2::new(160.0, 20.0),
            egui::Slider::new(&mut state.zoom, 0.25..=4.0).fixed_decimals(2),
        );
        if zoom_response.changed() {
            dispatch(PlannerEvent::ZoomChanged(state.zoom));
        }
        if ui.button("Reset").on_hover_text("Reset zoom and pan").clicked() {
            state.zoom = 1.0;
            state.pan_offset = 0.0;
            dispatch(PlannerEvent::ZoomChanged(1.0));
            dispatch(PlannerEvent::PanChanged(0.0));
        }
    });
}

/// Render the planner canvas: ruler, estimate rows, bars, drag handling.
pub fn render_planner(
    ui: &mut Ui,
    intervals: i32,
    estimates: &[Estimate],
    config: &PlannerConfig,
    state: &mut PlannerState,
    mut dispatch: impl FnMut(PlannerEvent),
) {
    state.last_canvas_width = ui.available_width();
    let axis = Axis::new(intervals, config.interval_width, config.left_margin);

    // Ruler, offset past the name column
    ui.horizontal(|ui| {
        ui.allocate_exact_size(Vec2::new(config.name_column_width, 20.0), Sense::hover());
        let ruler_width = ui.available_width();
        draw_interval_ruler(ui, &axis, config, state, ruler_width);
    });
    ui.add_space(2.0);

    // Row layout: group row per estimate, phase rows when expanded
    let mut rows: Vec<Row> = Vec::new();
    for (idx, est) in estimates.iter().enumerate() {
        rows.push(Row { estimate_idx: idx, kind: RowKind::Group });
        if !state.collapsed.contains(&est.uuid) {
            for key in est.phases.keys() {
                rows.push(Row {
                    estimate_idx: idx,
                    kind: RowKind::Phase(key.clone()),
                });
            }
        }
    }

    let total_height = (rows.len().max(1) as f32) * config.row_height;
    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), total_height),
        Sense::click_and_drag(),
    );
    let canvas = response.rect;
    let origin_x = canvas.min.x + config.name_column_width;

    // Scroll-wheel / middle-drag pan (only while idle)
    if state.session.is_none() && response.hovered() {
        let scroll = ui.ctx().input(|i| i.smooth_scroll_delta);
        if scroll.x.abs() > 0.0 {
            let local_dx = state.view().delta_to_local(scroll.x);
            state.pan_offset -= local_dx;
            dispatch(PlannerEvent::PanChanged(state.pan_offset));
        }
        if ui
            .ctx()
            .input(|i| i.pointer.button_down(egui::PointerButton::Middle))
        {
            let delta = ui.ctx().input(|i| i.pointer.delta());
            if delta.x != 0.0 {
                let local_dx = state.view().delta_to_local(delta.x);
                state.pan_offset -= local_dx;
                dispatch(PlannerEvent::PanChanged(state.pan_offset));
            }
        }
    }

    // Screen-space bar rect for a row, None when the row has no occupied span
    let bar_rect = |row: &Row, row_y: f32| -> Option<Rect> {
        let est = &estimates[row.estimate_idx];
        let span = match &row.kind {
            RowKind::Group => est.union_span()?,
            RowKind::Phase(key) => est.phase_span(key)?,
        };
        let (x, w) = axis.span_geometry(span);
        let x0 = local_to_screen_x(x, origin_x, state);
        let x1 = local_to_screen_x(x + w, origin_x, state);
        Some(Rect::from_min_max(
            Pos2::new(x0, row_y + 4.0),
            Pos2::new(x1, row_y + config.row_height - 4.0),
        ))
    };

    // Does the active session own this row's bar?
    let session_owns = |session: &DragSession, row: &Row, est: &Estimate| -> bool {
        if session.estimate_uuid != est.uuid {
            return false;
        }
        match (&session.kind, &row.kind) {
            (DragKind::MoveGroup, RowKind::Group) => true,
            (DragKind::MoveSegment { phase }, RowKind::Phase(key))
            | (DragKind::ResizeLeft { phase }, RowKind::Phase(key))
            | (DragKind::ResizeRight { phase }, RowKind::Phase(key)) => phase == key,
            _ => false,
        }
    };

    // Draw pass
    for (row_idx, row) in rows.iter().enumerate() {
        let est = &estimates[row.estimate_idx];
        let row_y = row_to_y(row_idx, config, canvas);
        let row_rect = Rect::from_min_size(
            Pos2::new(canvas.min.x, row_y),
            Vec2::new(canvas.width(), config.row_height),
        );

        let bg = if row_idx % 2 == 0 {
            Color32::from_gray(30)
        } else {
            Color32::from_gray(35)
        };
        painter.rect_filled(row_rect, 0.0, bg);

        // Name column
        let (label, label_color) = match &row.kind {
            RowKind::Group => {
                let arrow = if state.collapsed.contains(&est.uuid) { "▸" } else { "▾" };
                (format!("{arrow} {}", est.name), Color32::from_gray(220))
            }
            RowKind::Phase(key) => (format!("   {key}"), Color32::from_gray(170)),
        };
        painter.text(
            Pos2::new(canvas.min.x + 6.0, row_y + config.row_height * 0.5),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(12.0),
            label_color,
        );

        let active = state
            .session
            .as_ref()
            .filter(|s| session_owns(s, row, est));

        let rect = match active {
            // Live (fractional) geometry while the gesture is in flight
            Some(session) => {
                let (x, w) = session.live_geometry(&axis);
                let x0 = local_to_screen_x(x, origin_x, state);
                let x1 = local_to_screen_x(x + w, origin_x, state);
                Some(Rect::from_min_max(
                    Pos2::new(x0, row_y + 4.0),
                    Pos2::new(x1, row_y + config.row_height - 4.0),
                ))
            }
            None => bar_rect(row, row_y),
        };

        let Some(rect) = rect else { continue };

        let fill = match &row.kind {
            RowKind::Group => {
                if state.selected == Some(est.uuid) {
                    Color32::from_rgba_unmultiplied(110, 140, 190, 160)
                } else {
                    Color32::from_rgba_unmultiplied(90, 95, 105, 140)
                }
            }
            RowKind::Phase(key) => phase_color(key),
        };
        painter.rect_filled(rect, 4.0, fill);
        painter.rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(1.0, Color32::from_gray(150)),
            egui::epaint::StrokeKind::Middle,
        );

        // Snap preview: where the commit will land if released now
        if let Some(session) = active {
            let preview = session.clone().finish(&axis);
            let key = match &row.kind {
                RowKind::Group => None,
                RowKind::Phase(key) => Some(key.as_str()),
            };
            let span = match key {
                Some(key) => crate::estimate::PhaseSpan::from_intervals(&preview.change.phases[key]),
                None => {
                    let mut snapped = est.clone();
                    snapped.apply(preview.change.phases.clone());
                    snapped.union_span()
                }
            };
            if let Some(span) = span {
                let (x, w) = axis.span_geometry(span);
                let x0 = local_to_screen_x(x, origin_x, state);
                let x1 = local_to_screen_x(x + w, origin_x, state);
                draw_snap_preview(&painter, x0, x1, row_y, config.row_height);
            }
        }
    }

    // Interaction pass: hit-test and start sessions while idle
    if state.session.is_none() {
        if let Some(hover_pos) = ui.ctx().input(|i| i.pointer.hover_pos()) {
            let row_idx = ((hover_pos.y - canvas.min.y) / config.row_height).floor();
            let row = (row_idx >= 0.0)
                .then(|| rows.get(row_idx as usize))
                .flatten();
            if let Some(row) = row {
                let est = &estimates[row.estimate_idx];
                let row_y = row_to_y(row_idx as usize, config, canvas);
                if let Some(rect) = bar_rect(row, row_y) {
                    let pressed = ui.ctx().input(|i| i.pointer.primary_pressed());
                    let local_x = screen_x_to_local(hover_pos.x, origin_x, state);

                    match &row.kind {
                        RowKind::Group => {
                            if rect.contains(hover_pos) {
                                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                                if pressed {
                                    state.session =
                                        DragSession::begin_group(est, &axis, local_x);
                                    select(state, est.uuid, &mut dispatch);
                                }
                            }
                        }
                        RowKind::Phase(key) => {
                            if let Some(tool) =
                                detect_segment_tool(hover_pos, rect, config.edge_threshold)
                            {
                                ui.ctx().set_cursor_icon(tool.cursor());
                                if pressed {
                                    state.session = match tool {
                                        SegmentTool::Move => {
                                            DragSession::begin_move(est, key, &axis, local_x)
                                        }
                                        SegmentTool::ResizeLeft => DragSession::begin_resize(
                                            est, key, true, &axis, local_x,
                                        ),
                                        SegmentTool::ResizeRight => DragSession::begin_resize(
                                            est, key, false, &axis, local_x,
                                        ),
                                    };
                                    select(state, est.uuid, &mut dispatch);
                                }
                            }
                        }
                    }
                }
            }
        }
    } else {
        // Active session: feed the pointer, commit on release, Escape cancels.
        // latest_pos() keeps tracking even when the cursor leaves the window.
        if let Some(pos) = ui.ctx().input(|i| i.pointer.latest_pos()) {
            let local_x = screen_x_to_local(pos.x, origin_x, state);
            if let Some(session) = state.session.as_mut() {
                session.update(local_x);
                ui.ctx().set_cursor_icon(match session.kind {
                    DragKind::ResizeLeft { .. } | DragKind::ResizeRight { .. } => {
                        egui::CursorIcon::ResizeHorizontal
                    }
                    _ => egui::CursorIcon::Grabbing,
                });
            }
        }

        if ui.ctx().input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(session) = state.session.take() {
                session.cancel();
            }
        } else if ui.ctx().input(|i| i.pointer.any_released()) {
            if let Some(session) = state.session.take() {
                let was_group = matches!(session.kind, DragKind::MoveGroup);
                let outcome = session.finish(&axis);
                let estimate_uuid = outcome.change.estimate_uuid;

                if was_group && !outcome.moved {
                    // Sub-threshold gesture on the group bar: a click
                    let expanded = state.collapsed.contains(&estimate_uuid);
                    if expanded {
                        state.collapsed.remove(&estimate_uuid);
                    } else {
                        state.collapsed.insert(estimate_uuid);
                    }
                    dispatch(PlannerEvent::RowToggled {
                        estimate_uuid,
                        expanded,
                    });
                }

                dispatch(PlannerEvent::PlanChanged {
                    estimate_uuid,
                    phases: outcome.change.phases,
                });
            }
        }
        ui.ctx().request_repaint();
    }
}

fn select(state: &mut PlannerState, uuid: Uuid, dispatch: &mut impl FnMut(PlannerEvent)) {
    if state.selected != Some(uuid) {
        state.selected = Some(uuid);
        dispatch(PlannerEvent::RowSelected { estimate_uuid: uuid });
    }
}
