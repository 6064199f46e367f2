// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame selection strip.
//!
//! A horizontally scrolling row of frame thumbnails below the canvas.
//! The selected frame carries a red outline and is scrolled into view
//! when the selection changes off-screen.

use crate::models::frame::Frame;
use crate::models::sequence::Sequence;

const THUMB_SIZE: f32 = 48.0;
const THUMB_SPACING: f32 = 5.0;

/// Result of filmstrip interaction.
pub enum FilmstripAction {
    None,
    Select(usize),
}

/// Display one thumbnail per frame and handle selection clicks.
pub fn show(
    ui: &mut egui::Ui,
    sequence: &Sequence,
    selected: usize,
    scroll_to_selected: bool,
) -> FilmstripAction {
    let mut action = FilmstripAction::None;

    egui::ScrollArea::horizontal()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = THUMB_SPACING;
                for (index, frame) in sequence.frames().iter().enumerate() {
                    let response = thumbnail(ui, frame, index == selected);
                    if response.clicked() {
                        action = FilmstripAction::Select(index);
                    }
                    if scroll_to_selected && index == selected {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                }
            });
        });

    action
}

fn thumbnail(ui: &mut egui::Ui, frame: &Frame, selected: bool) -> egui::Response {
    let (response, painter) = ui.allocate_painter(
        egui::vec2(THUMB_SIZE, THUMB_SIZE),
        egui::Sense::click(),
    );
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

    let cell_w = rect.width() / frame.width() as f32;
    let cell_h = rect.height() / frame.height() as f32;
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            if frame.is_set(x, y).unwrap_or(false) {
                let min = rect.min + egui::vec2(x as f32 * cell_w, y as f32 * cell_h);
                painter.rect_filled(
                    egui::Rect::from_min_size(min, egui::vec2(cell_w, cell_h)),
                    0.0,
                    egui::Color32::WHITE,
                );
            }
        }
    }

    let outline = if selected {
        egui::Color32::RED
    } else {
        egui::Color32::WHITE
    };
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, outline));

    response
}
