// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings, currently the recent-files list.
//!
//! Persisted separately from project data as a flat `key=value` file in
//! the platform config directory. The list is stored most-recent first
//! and rebuilt through [`Settings::add_recent_file`] on load, so entries
//! that vanished from disk are dropped silently.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;
use crate::io::document::Document;

/// Upper bound of the most-recently-used list.
pub const MAX_RECENT_FILES: usize = 6;

const KEY_RECENT_FILES: &str = "recentFiles";
const FILE_COMMENT: &str = "Automatically generated, do not edit.";

/// User settings persisted across sessions.
#[derive(Debug, Default)]
pub struct Settings {
    recent_files: Vec<PathBuf>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recent project files, most-recently-used first.
    pub fn recent_files(&self) -> &[PathBuf] {
        &self.recent_files
    }

    /// Move `path` to the front of the list, dropping any previous entry
    /// for it. Overflow evicts the oldest entry.
    pub fn add_recent_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "GitHub", "sprited").map(|dirs| dirs.config_dir().join("settings"))
    }

    /// Load settings from the platform config dir, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::new();
        };
        if !path.exists() {
            return Self::new();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Failed to load settings from {}: {err}", path.display());
                Self::new()
            }
        }
    }

    /// Persist settings to the platform config dir. A missing config dir
    /// is not an error (headless environments).
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::settings_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let doc = Document::parse(&std::fs::read_to_string(path)?)?;
        let mut settings = Self::new();
        if let Some(joined) = doc.get(KEY_RECENT_FILES) {
            // Stored most-recent first; re-adding in reverse order makes
            // add_recent_file reproduce the original order.
            for entry in joined.split(',').rev() {
                let file = PathBuf::from(entry.trim());
                if is_readable_file(&file) {
                    settings.add_recent_file(file);
                }
            }
        }
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut doc = Document::new();
        if !self.recent_files.is_empty() {
            let joined = self
                .recent_files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(",");
            doc.set(KEY_RECENT_FILES, joined);
        }
        std::fs::write(path, doc.render(FILE_COMMENT))?;
        Ok(())
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "name=t\nimage.0=0x0\n").unwrap();
        path
    }

    #[test]
    fn re_adding_moves_to_front_without_duplicates() {
        let mut settings = Settings::new();
        settings.add_recent_file("/tmp/a");
        settings.add_recent_file("/tmp/b");
        settings.add_recent_file("/tmp/a");
        assert_eq!(
            settings.recent_files(),
            &[PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]
        );
    }

    #[test]
    fn list_is_capped_and_evicts_the_oldest() {
        let mut settings = Settings::new();
        for i in 0..7 {
            settings.add_recent_file(format!("/tmp/file{i}"));
        }
        assert_eq!(settings.recent_files().len(), MAX_RECENT_FILES);
        assert_eq!(settings.recent_files()[0], PathBuf::from("/tmp/file6"));
        // the first file added has been evicted
        assert!(!settings
            .recent_files()
            .iter()
            .any(|p| p == &PathBuf::from("/tmp/file0")));
    }

    #[test]
    fn order_survives_a_save_load_roundtrip() {
        let a = touch("sprited-settings-a.sprite");
        let b = touch("sprited-settings-b.sprite");
        let c = touch("sprited-settings-c.sprite");

        let mut settings = Settings::new();
        settings.add_recent_file(&a);
        settings.add_recent_file(&b);
        settings.add_recent_file(&c);

        let path = std::env::temp_dir().join("sprited-settings-roundtrip");
        settings.save_to(&path).unwrap();
        let restored = Settings::load_from(&path).unwrap();
        assert_eq!(restored.recent_files(), &[c.clone(), b.clone(), a.clone()]);

        for p in [a, b, c, path] {
            std::fs::remove_file(p).ok();
        }
    }

    #[test]
    fn vanished_entries_are_skipped_on_load() {
        let existing = touch("sprited-settings-existing.sprite");
        let gone = std::env::temp_dir().join("sprited-settings-gone.sprite");

        let mut settings = Settings::new();
        settings.add_recent_file(&gone);
        settings.add_recent_file(&existing);

        let path = std::env::temp_dir().join("sprited-settings-skip");
        settings.save_to(&path).unwrap();
        let restored = Settings::load_from(&path).unwrap();
        assert_eq!(restored.recent_files(), &[existing.clone()]);

        std::fs::remove_file(existing).ok();
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_settings_file_yields_defaults() {
        let path = std::env::temp_dir().join("sprited-settings-empty");
        Settings::new().save_to(&path).unwrap();
        let restored = Settings::load_from(&path).unwrap();
        assert!(restored.recent_files().is_empty());
        std::fs::remove_file(path).ok();
    }
}
