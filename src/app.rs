// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, wiring menus, keyboard shortcuts and the
//! animation clock to the sequence model and dispatching the actions
//! returned by the UI panels.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::events::{EditorEvent, EventBus};
use crate::io::project;
use crate::io::settings::Settings;
use crate::models::frame::Frame;
use crate::models::sequence::Sequence;
use crate::ui::{canvas, filmstrip, toolbar};

const DEFAULT_PROJECT_NAME: &str = "example";
const PROJECT_FILE_EXTENSION: &str = "sprite";

/// Action deferred behind the unsaved-changes confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    Quit,
    NewProject,
}

/// Main application state.
pub struct SpritedApp {
    /// The sequence being edited
    project: Sequence,

    /// Index of the active frame within the project
    selected: usize,

    /// Persisted user settings (recent files)
    settings: Settings,

    /// Change-notification bus shared with the views
    bus: EventBus,

    /// Set by a bus subscriber when the filmstrip should scroll the
    /// selection into view
    scroll_to_selected: Rc<Cell<bool>>,

    /// Whether animation playback is running
    playing: bool,

    /// Whether the previous-frame ghost overlay is drawn (suppressed
    /// while playing)
    ghost_enabled: bool,

    /// Playback clock: time of the last frame advance
    last_tick: f64,

    /// Error message shown in a modal dialog
    error_message: Option<String>,

    /// Action waiting on the unsaved-changes confirmation
    pending: Option<PendingAction>,

    /// Close was confirmed; let the window actually close
    allow_close: bool,
}

impl Default for SpritedApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SpritedApp {
    /// Create a new sprited application instance.
    pub fn new() -> Self {
        let mut bus = EventBus::new();

        let scroll_to_selected = Rc::new(Cell::new(false));
        {
            let flag = Rc::clone(&scroll_to_selected);
            bus.subscribe(move |event| {
                match event {
                    EditorEvent::ActiveFrameChanged { .. } => flag.set(true),
                }
                Ok(())
            });
        }
        bus.subscribe(|event| {
            match event {
                EditorEvent::ActiveFrameChanged { frame, index } => {
                    log::debug!("Active frame changed: {frame} (index {index})");
                }
            }
            Ok(())
        });

        Self {
            project: Sequence::new(DEFAULT_PROJECT_NAME)
                .expect("default project name is valid"),
            selected: 0,
            settings: Settings::load(),
            bus,
            scroll_to_selected,
            playing: false,
            ghost_enabled: true,
            last_tick: 0.0,
            error_message: None,
            pending: None,
            allow_close: false,
        }
    }

    fn active_frame(&self) -> &Frame {
        &self.project.frames()[self.selected]
    }

    /// Change the active frame and notify subscribed views.
    fn set_selected(&mut self, index: usize) {
        let index = index.min(self.project.frames().len() - 1);
        self.selected = index;
        let event = EditorEvent::ActiveFrameChanged {
            frame: self.project.frames()[index].id(),
            index,
        };
        self.bus.publish(&event);
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.set_selected(self.selected - 1);
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.project.frames().len() {
            self.set_selected(self.selected + 1);
        }
    }

    fn new_frame(&mut self) {
        self.project.append(Frame::default());
        self.set_selected(self.project.frames().len() - 1);
        log::info!("Added frame, total: {}", self.project.frames().len());
    }

    fn duplicate_frame(&mut self) {
        let copy = self.active_frame().create_copy();
        if let Err(err) = self.project.insert(self.selected + 1, copy) {
            self.show_error(format!("Failed to duplicate frame: {err}"));
            return;
        }
        self.set_selected(self.selected + 1);
        log::info!("Duplicated frame, total: {}", self.project.frames().len());
    }

    fn delete_frame(&mut self) {
        let id = self.active_frame().id();
        self.project.delete(id);
        // the removed identity is gone; keep the selection at the same
        // slot, clamped to the new end
        self.set_selected(self.selected);
        log::info!("Deleted frame, total: {}", self.project.frames().len());
    }

    fn clear_frame(&mut self) {
        if let Some(frame) = self.project.frame_mut(self.selected) {
            frame.clear();
        }
    }

    fn fill_frame(&mut self) {
        if let Some(frame) = self.project.frame_mut(self.selected) {
            frame.fill();
        }
    }

    fn toggle_playback(&mut self, now: f64) {
        if self.playing {
            self.stop_animation();
        } else {
            self.start_animation(now);
        }
    }

    fn start_animation(&mut self, now: f64) {
        self.playing = true;
        self.ghost_enabled = false;
        self.last_tick = now;
        log::info!(
            "Animation started at {} ms/frame",
            self.project.animation_interval_millis()
        );
    }

    fn stop_animation(&mut self) {
        if self.playing {
            self.playing = false;
            self.ghost_enabled = true;
            log::info!("Animation stopped");
        }
    }

    fn show_error(&mut self, message: String) {
        log::error!("{message}");
        self.error_message = Some(message);
    }

    fn remember_recent_file(&mut self, path: &Path) {
        self.settings.add_recent_file(path);
        if let Err(err) = self.settings.save() {
            log::warn!("Failed to save settings: {err}");
        }
    }

    fn update_title(&self, ctx: &egui::Context) {
        let title = match self.project.source_file() {
            Some(path) => format!("{} - {}", self.project.name(), path.display()),
            None => self.project.name().to_string(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }

    fn new_project(&mut self, ctx: &egui::Context) {
        self.stop_animation();
        self.project = Sequence::new(DEFAULT_PROJECT_NAME)
            .expect("default project name is valid");
        self.set_selected(0);
        self.update_title(ctx);
        log::info!("Created new project");
    }

    fn load_project_from(&mut self, path: PathBuf, ctx: &egui::Context) {
        match project::load_project(&path) {
            Ok(sequence) => {
                self.stop_animation();
                self.project = sequence;
                self.set_selected(0);
                self.remember_recent_file(&path);
                self.update_title(ctx);
            }
            Err(err) => {
                // the previous project stays untouched on a failed load
                self.show_error(format!("Failed to load {}: {err}", path.display()));
            }
        }
    }

    fn load_project_dialog(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Sprite projects", &[PROJECT_FILE_EXTENSION]);
        if let Some(dir) = self
            .settings
            .recent_files()
            .first()
            .and_then(|p| p.parent())
        {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_project_from(path, ctx);
        }
    }

    /// Save to `path`. Returns whether the project is clean afterwards.
    fn save_project_to(&mut self, path: PathBuf, ctx: &egui::Context) -> bool {
        match project::save_project(&mut self.project, &path) {
            Ok(()) => {
                self.remember_recent_file(&path);
                self.update_title(ctx);
                true
            }
            Err(err) => {
                // a failed save leaves the project dirty
                self.show_error(format!("Failed to save {}: {err}", path.display()));
                false
            }
        }
    }

    fn save_as(&mut self, ctx: &egui::Context) -> bool {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Sprite projects", &[PROJECT_FILE_EXTENSION])
            .set_file_name(format!("{}.{PROJECT_FILE_EXTENSION}", self.project.name()));
        if let Some(path) = self.project.source_file() {
            if let Some(dir) = path.parent() {
                dialog = dialog.set_directory(dir);
            }
        }
        match dialog.save_file() {
            Some(path) => self.save_project_to(path, ctx),
            None => false,
        }
    }

    fn save(&mut self, ctx: &egui::Context) -> bool {
        match self.project.source_file().map(Path::to_path_buf) {
            Some(path) => self.save_project_to(path, ctx),
            None => self.save_as(ctx),
        }
    }

    fn export_source_dialog(&mut self) {
        let dialog = rfd::FileDialog::new()
            .add_filter("C source", &["h", "c"])
            .set_file_name(format!("{}.h", self.project.name()));
        if let Some(path) = dialog.save_file() {
            let text = project::export_source_text(&self.project);
            if let Err(err) = std::fs::write(&path, text) {
                self.show_error(format!("Failed to export {}: {err}", path.display()));
            } else {
                log::info!("Exported C source to {}", path.display());
            }
        }
    }

    fn copy_source_to_clipboard(&self, ctx: &egui::Context) {
        ctx.copy_text(project::export_source_text(&self.project));
        log::info!("Copied C source to clipboard");
    }

    /// Run `action` immediately if the project is clean, otherwise park
    /// it behind the unsaved-changes dialog.
    fn request(&mut self, action: PendingAction, ctx: &egui::Context) {
        if self.project.is_dirty() {
            self.pending = Some(action);
        } else {
            self.run_pending(action, ctx);
        }
    }

    fn run_pending(&mut self, action: PendingAction, ctx: &egui::Context) {
        match action {
            PendingAction::Quit => {
                self.allow_close = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            PendingAction::NewProject => self.new_project(ctx),
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let now = ctx.input(|i| i.time);
        let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::P) {
            self.toggle_playback(now);
            return;
        }

        // any other mapped key stops a running animation instead of acting
        let mapped = [
            egui::Key::ArrowLeft,
            egui::Key::ArrowRight,
            egui::Key::Delete,
            egui::Key::D,
            egui::Key::N,
            egui::Key::C,
            egui::Key::F,
        ];
        if self.playing {
            if mapped.iter().any(|&k| pressed(k)) {
                self.stop_animation();
            }
            return;
        }

        if pressed(egui::Key::ArrowLeft) {
            self.select_previous();
        } else if pressed(egui::Key::ArrowRight) {
            self.select_next();
        } else if pressed(egui::Key::Delete) {
            self.delete_frame();
        } else if pressed(egui::Key::D) {
            self.duplicate_frame();
        } else if pressed(egui::Key::N) {
            self.new_frame();
        } else if pressed(egui::Key::C) {
            self.clear_frame();
        } else if pressed(egui::Key::F) {
            self.fill_frame();
        }
    }

    fn advance_animation(&mut self, ctx: &egui::Context) {
        if !self.playing {
            return;
        }
        let now = ctx.input(|i| i.time);
        let interval = self.project.animation_interval_millis();
        if now - self.last_tick >= interval as f64 / 1000.0 {
            self.last_tick = now;
            let current = self.active_frame().id();
            let next = self.project.next(current).id();
            if let Some(index) = self.project.position(next) {
                self.set_selected(index);
            }
        }
        ctx.request_repaint_after(Duration::from_millis(u64::from(interval)));
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        self.request(PendingAction::NewProject, ctx);
                        ui.close_menu();
                    }
                    if ui.button("Load...").clicked() {
                        self.load_project_dialog(ctx);
                        ui.close_menu();
                    }
                    ui.menu_button("Recent files", |ui| {
                        if self.settings.recent_files().is_empty() {
                            ui.weak("(empty)");
                        }
                        let recent: Vec<PathBuf> =
                            self.settings.recent_files().to_vec();
                        for path in recent {
                            let label = path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string());
                            if ui.button(label).clicked() {
                                self.load_project_from(path, ctx);
                                ui.close_menu();
                            }
                        }
                    });
                    ui.separator();
                    if ui.button("Save").clicked() {
                        self.save(ctx);
                        ui.close_menu();
                    }
                    if ui.button("Save as...").clicked() {
                        self.save_as(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Copy C source to clipboard").clicked() {
                        self.copy_source_to_clipboard(ctx);
                        ui.close_menu();
                    }
                    if ui.button("Export C source...").clicked() {
                        self.export_source_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Animation Speed", |ui| {
                    for (label, millis) in
                        [("60 FPS", 16), ("30 FPS", 32), ("15 FPS", 48)]
                    {
                        let selected =
                            self.project.animation_interval_millis() == millis;
                        if ui.selectable_label(selected, label).clicked() {
                            if let Err(err) =
                                self.project.set_animation_interval_millis(millis)
                            {
                                self.show_error(format!(
                                    "Failed to set animation speed: {err}"
                                ));
                            }
                            ui.close_menu();
                        }
                    }
                });
            });
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(action) = self.pending {
            egui::Window::new("Unsaved changes")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("The project has unsaved changes. Save them first?");
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            self.pending = None;
                            if self.save(ctx) {
                                self.run_pending(action, ctx);
                            }
                        }
                        if ui.button("Discard").clicked() {
                            self.pending = None;
                            self.run_pending(action, ctx);
                        }
                        if ui.button("Cancel").clicked() {
                            self.pending = None;
                        }
                    });
                });
        }
    }
}

impl eframe::App for SpritedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // intercept window close while the project is dirty
        if ctx.input(|i| i.viewport().close_requested())
            && !self.allow_close
            && self.project.is_dirty()
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.pending = Some(PendingAction::Quit);
        }

        self.advance_animation(ctx);
        self.handle_keyboard(ctx);
        self.show_menu_bar(ctx);

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &self.project, self.selected, self.playing)
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::NewFrame => self.new_frame(),
            toolbar::ToolbarAction::DuplicateFrame => self.duplicate_frame(),
            toolbar::ToolbarAction::DeleteFrame => self.delete_frame(),
            toolbar::ToolbarAction::ClearFrame => self.clear_frame(),
            toolbar::ToolbarAction::FillFrame => self.fill_frame(),
            toolbar::ToolbarAction::TogglePlayback => {
                let now = ctx.input(|i| i.time);
                self.toggle_playback(now);
            }
            toolbar::ToolbarAction::None => {}
        }

        // Filmstrip (bottom)
        let scroll_to_selected = self.scroll_to_selected.take();
        let filmstrip_action = egui::TopBottomPanel::bottom("filmstrip")
            .show(ctx, |ui| {
                filmstrip::show(ui, &self.project, self.selected, scroll_to_selected)
            })
            .inner;

        if let filmstrip::FilmstripAction::Select(index) = filmstrip_action {
            if self.playing {
                self.stop_animation();
            }
            self.set_selected(index);
        }

        // Editing canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let frame = self.active_frame();
                let ghost = if self.ghost_enabled {
                    self.project.previous(frame.id())
                } else {
                    None
                };
                canvas::show(ui, frame, ghost, self.playing)
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::Paint { x, y, on } => {
                let result = self
                    .project
                    .frame_mut(self.selected)
                    .map(|frame| frame.set(x, y, on));
                match result {
                    Some(Ok(true)) => {
                        log::trace!("{}", project::export_source_text(&self.project));
                    }
                    Some(Err(err)) => log::warn!("Rejected paint: {err}"),
                    _ => {}
                }
            }
            canvas::CanvasAction::StopAnimation => self.stop_animation(),
            canvas::CanvasAction::None => {}
        }

        self.show_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.settings.save() {
            log::warn!("Failed to save settings on exit: {err}");
        }
    }
}
