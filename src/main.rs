// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SPRITED - sprite editor for 8x8 LED dot-matrix displays.
//!
//! A cross-platform desktop application for drawing monochrome sprite
//! animations and exporting them as C byte arrays for embedding in
//! firmware.

use anyhow::Result;
use sprited::SpritedApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("SPRITED - LED Matrix Sprite Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SPRITED",
        options,
        Box::new(|_cc| Ok(Box::new(SpritedApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
