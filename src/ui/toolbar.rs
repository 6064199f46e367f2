// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with frame operations and playback control.

use crate::models::sequence::Sequence;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    NewFrame,
    DuplicateFrame,
    DeleteFrame,
    ClearFrame,
    FillFrame,
    TogglePlayback,
}

/// Display the toolbar row above the canvas.
pub fn show(
    ui: &mut egui::Ui,
    sequence: &Sequence,
    selected: usize,
    playing: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("New frame (n)").clicked() {
            action = ToolbarAction::NewFrame;
        }
        if ui.button("Duplicate (d)").clicked() {
            action = ToolbarAction::DuplicateFrame;
        }
        if ui.button("Delete (Del)").clicked() {
            action = ToolbarAction::DeleteFrame;
        }

        ui.separator();

        if ui.button("Clear (c)").clicked() {
            action = ToolbarAction::ClearFrame;
        }
        if ui.button("Fill (f)").clicked() {
            action = ToolbarAction::FillFrame;
        }

        ui.separator();

        let play_label = if playing { "⏹ Stop (p)" } else { "▶ Play (p)" };
        if ui.button(play_label).clicked() {
            action = ToolbarAction::TogglePlayback;
        }
        ui.label(format!("{} ms/frame", sequence.animation_interval_millis()));

        ui.separator();

        ui.label(format!(
            "{} - frame {}/{}",
            sequence.name(),
            selected + 1,
            sequence.frames().len()
        ));

        ui.separator();

        ui.label(
            egui::RichText::new("Left-click paints, right-click erases")
                .italics()
                .weak(),
        );
    });

    action
}
