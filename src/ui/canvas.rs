// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pixel editing canvas.
//!
//! This module renders the active frame as a grid of cells and maps mouse
//! input back to pixel coordinates: left button paints, right button
//! erases, dragging works for both. While the previous-frame ghost mode
//! is enabled, unlit pixels that are lit in the previous frame show as
//! translucent blue - a drawing aid for animating.

use crate::models::frame::Frame;
use crate::util::geometry::GridLayout;

const BACKGROUND: egui::Color32 = egui::Color32::BLACK;
const GRID_LINES: egui::Color32 = egui::Color32::WHITE;
const LIT_PIXEL: egui::Color32 = egui::Color32::WHITE;
/// Lightened blue at half opacity, drawn under the grid for ghost pixels.
const GHOST_PIXEL: egui::Color32 = egui::Color32::from_rgba_premultiplied(45, 45, 128, 128);

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Set (`on = true`) or clear one pixel of the active frame.
    Paint { x: usize, y: usize, on: bool },
    /// Any click while playing stops the animation.
    StopAnimation,
}

/// Display the editing canvas for the active frame and handle painting.
pub fn show(
    ui: &mut egui::Ui,
    frame: &Frame,
    ghost: Option<&Frame>,
    animating: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let (response, painter) =
        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let grid = GridLayout::fit(rect.width(), rect.height(), frame.width(), frame.height());

    // pixels
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let lit = frame.is_set(x, y).unwrap_or(false);
            let color = if lit {
                LIT_PIXEL
            } else if ghost.is_some_and(|g| g.is_set(x, y).unwrap_or(false)) {
                GHOST_PIXEL
            } else {
                continue;
            };
            let (ox, oy) = grid.cell_origin(x, y);
            let cell = egui::Rect::from_min_size(
                rect.min + egui::vec2(ox, oy),
                egui::vec2(grid.cell_width, grid.cell_height),
            );
            painter.rect_filled(cell, 0.0, color);
        }
    }

    // grid lines
    let stroke = egui::Stroke::new(1.0, GRID_LINES);
    for y in 0..=frame.height() {
        let (ox, oy) = grid.cell_origin(0, y);
        let (ex, _) = grid.cell_origin(frame.width(), y);
        painter.line_segment(
            [
                rect.min + egui::vec2(ox, oy),
                rect.min + egui::vec2(ex, oy),
            ],
            stroke,
        );
    }
    for x in 0..=frame.width() {
        let (ox, oy) = grid.cell_origin(x, 0);
        let (_, ey) = grid.cell_origin(x, frame.height());
        painter.line_segment(
            [
                rect.min + egui::vec2(ox, oy),
                rect.min + egui::vec2(ox, ey),
            ],
            stroke,
        );
    }

    if animating {
        if ui.input(|i| i.pointer.any_pressed()) {
            return CanvasAction::StopAnimation;
        }
        return action;
    }

    let (primary, secondary) =
        ui.input(|i| (i.pointer.primary_down(), i.pointer.secondary_down()));
    if primary || secondary {
        if let Some(pos) = response.hover_pos() {
            let local = pos - rect.min;
            if let Some((x, y)) = grid.cell_at(local.x, local.y) {
                action = CanvasAction::Paint {
                    x,
                    y,
                    on: primary,
                };
            }
        }
    }

    action
}
