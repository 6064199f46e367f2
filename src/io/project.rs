// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project file codec and C source export.
//!
//! A project file is a flat `key=value` document with the sequence name,
//! one `image.N` entry per frame (contiguous from zero) and the playback
//! speed. The export renders the same frame data as a C array literal for
//! embedding in firmware.

use std::path::Path;

use crate::error::{Error, Result};
use crate::io::document::Document;
use crate::models::frame::Frame;
use crate::models::sequence::Sequence;

const KEY_NAME: &str = "name";
const KEY_ANIMATION_SPEED: &str = "animationSpeed";
const KEY_IMAGE_PREFIX: &str = "image.";
const FILE_COMMENT: &str = "Automatically generated, do not alter.";

/// Render a sequence as a project file document.
pub fn serialize(sequence: &Sequence) -> String {
    let mut doc = Document::new();
    doc.set(KEY_NAME, sequence.name());
    for (index, frame) in sequence.frames().iter().enumerate() {
        doc.set(format!("{KEY_IMAGE_PREFIX}{index}"), frame.encode());
    }
    doc.set(
        KEY_ANIMATION_SPEED,
        sequence.animation_interval_millis().to_string(),
    );
    doc.render(FILE_COMMENT)
}

/// Parse a project file document. Frames are read from `image.0`,
/// `image.1`, ... until the first missing index.
pub fn deserialize(text: &str) -> Result<Sequence> {
    let doc = Document::parse(text)?;

    let name = doc
        .get(KEY_NAME)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::format("project file has no name"))?;

    let mut frames = Vec::new();
    while let Some(data) = doc.get(&format!("{KEY_IMAGE_PREFIX}{}", frames.len())) {
        frames.push(Frame::decode(data)?);
    }
    if frames.is_empty() {
        return Err(Error::Integrity("project file contains no frames".into()));
    }

    let mut sequence = Sequence::from_frames(name, frames)?;
    if let Some(speed) = doc.get(KEY_ANIMATION_SPEED).map(str::trim).filter(|s| !s.is_empty()) {
        let millis = speed
            .parse::<u32>()
            .map_err(|_| Error::format(format!("invalid animation speed '{speed}'")))?;
        sequence.set_animation_interval_millis(millis)?;
    }
    Ok(sequence)
}

/// Render the sequence as a C array literal, one row per frame:
///
/// ```text
/// const uint8_t data[2][8] = {
///     {0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0},
///     {0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff}
/// };
/// ```
pub fn export_source_text(sequence: &Sequence) -> String {
    let rows = sequence
        .frames()
        .iter()
        .map(|frame| format!("{{{}}}", frame.encode()))
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!(
        "const uint8_t data[{}][{}] = {{\n    {}\n}};\n",
        sequence.frames().len(),
        sequence.first().height(),
        rows
    )
}

/// Load a project from disk. On failure the caller's current project is
/// untouched; the error carries the reason for the user-facing message.
pub fn load_project(path: &Path) -> Result<Sequence> {
    let text = std::fs::read_to_string(path)?;
    let mut sequence = deserialize(&text)?;
    sequence.set_source_file(path);
    log::info!(
        "Loaded project '{}' with {} frame(s) from {}",
        sequence.name(),
        sequence.frames().len(),
        path.display()
    );
    Ok(sequence)
}

/// Save a project to disk. Only after the write succeeds is the source
/// path recorded and every dirty flag cleared; a failed save leaves the
/// project dirty.
pub fn save_project(sequence: &mut Sequence, path: &Path) -> Result<()> {
    std::fs::write(path, serialize(sequence))?;
    sequence.set_source_file(path);
    sequence.mark_saved();
    log::info!(
        "Saved project '{}' with {} frame(s) to {}",
        sequence.name(),
        sequence.frames().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo_sequence() -> Sequence {
        let blank = Frame::default();
        let mut filled = Frame::default();
        filled.fill();
        let mut seq = Sequence::from_frames("demo", vec![blank, filled]).unwrap();
        seq.set_animation_interval_millis(32).unwrap();
        seq
    }

    #[test]
    fn serialize_emits_the_documented_format() {
        let text = serialize(&demo_sequence());
        assert_eq!(
            text,
            "# Automatically generated, do not alter.\n\
             name=demo\n\
             image.0=0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0\n\
             image.1=0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff\n\
             animationSpeed=32\n"
        );
    }

    #[test]
    fn deserialize_roundtrips_serialize() {
        let original = demo_sequence();
        let restored = deserialize(&serialize(&original)).unwrap();
        assert_eq!(restored.name(), "demo");
        assert_eq!(restored.animation_interval_millis(), 32);
        assert_eq!(restored.frames().len(), 2);
        assert_eq!(restored.frames()[0].columns(), original.frames()[0].columns());
        assert_eq!(restored.frames()[1].columns(), original.frames()[1].columns());
        assert!(!restored.is_dirty());
    }

    #[test]
    fn frame_reading_stops_at_the_first_gap() {
        let text = "name=demo\nimage.0=0x1\nimage.2=0x2\n";
        let seq = deserialize(text).unwrap();
        assert_eq!(seq.frames().len(), 1);
        assert_eq!(seq.frames()[0].columns(), &[0x1]);
    }

    #[test]
    fn key_order_does_not_matter() {
        let text = "animationSpeed=48\nimage.0=0xff\nname=demo\n";
        let seq = deserialize(text).unwrap();
        assert_eq!(seq.name(), "demo");
        assert_eq!(seq.animation_interval_millis(), 48);
    }

    #[test]
    fn missing_or_blank_name_is_a_format_error() {
        assert!(matches!(
            deserialize("image.0=0x0\n"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            deserialize("name=  \nimage.0=0x0\n"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn document_without_frames_is_an_integrity_error() {
        assert!(matches!(
            deserialize("name=demo\n"),
            Err(Error::Integrity(_))
        ));
    }

    #[test]
    fn bad_animation_speed_is_rejected() {
        assert!(matches!(
            deserialize("name=demo\nimage.0=0x0\nanimationSpeed=fast\n"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            deserialize("name=demo\nimage.0=0x0\nanimationSpeed=0\n"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn blank_animation_speed_falls_back_to_default() {
        let seq = deserialize("name=demo\nimage.0=0x0\nanimationSpeed=\n").unwrap();
        assert_eq!(seq.animation_interval_millis(), 16);
    }

    #[test]
    fn export_matches_the_firmware_shape() {
        let text = export_source_text(&demo_sequence());
        assert_eq!(
            text,
            "const uint8_t data[2][8] = {\n    \
             {0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0},\n    \
             {0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff}\n};\n"
        );
    }

    #[test]
    fn save_records_path_and_clears_dirty_flags() {
        let mut seq = demo_sequence();
        seq.frame_mut(0).unwrap().set(0, 0, true).unwrap();
        assert!(seq.is_dirty());

        let path = std::env::temp_dir().join("sprited-project-save-test.sprite");
        save_project(&mut seq, &path).unwrap();
        assert!(!seq.is_dirty());
        assert_eq!(seq.source_file(), Some(path.as_path()));

        let restored = load_project(&path).unwrap();
        assert_eq!(restored.name(), "demo");
        assert_eq!(restored.frames()[0].columns(), seq.frames()[0].columns());
        assert_eq!(restored.source_file(), Some(path.as_path()));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_of_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("sprited-no-such-project.sprite");
        assert!(matches!(load_project(&path), Err(Error::Io(_))));
    }
}
