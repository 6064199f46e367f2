// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Flat `key=value` text documents.
//!
//! Both the project file and the application settings file use this
//! format: one entry per line, `#`-prefixed comment lines and blank lines
//! ignored, keys order-insensitive on read.

use crate::error::{Error, Result};

/// An ordered set of `key=value` entries.
#[derive(Debug, Default)]
pub struct Document {
    entries: Vec<(String, String)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document. Lines are split at the first `=`; the key is
    /// trimmed, the value kept verbatim. A duplicated key keeps the last
    /// value seen.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (key, value) = trimmed
                .split_once('=')
                .ok_or_else(|| Error::format(format!("expected key=value, got '{trimmed}'")))?;
            doc.set(key.trim(), value);
        }
        Ok(doc)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an entry, replacing any existing value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Render the document with a leading comment header, entries in
    /// insertion order. Output is deterministic.
    pub fn render(&self, comment: &str) -> String {
        let mut out = format!("# {comment}\n");
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_entries_and_skips_comments() {
        let doc = Document::parse("# header\n\nname=demo\nimage.0=0x0, 0x1\n").unwrap();
        assert_eq!(doc.get("name"), Some("demo"));
        assert_eq!(doc.get("image.0"), Some("0x0, 0x1"));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let doc = Document::parse("key=a=b").unwrap();
        assert_eq!(doc.get("key"), Some("a=b"));
    }

    #[test]
    fn duplicate_keys_keep_the_last_value() {
        let doc = Document::parse("key=first\nkey=second").unwrap();
        assert_eq!(doc.get("key"), Some("second"));
    }

    #[test]
    fn line_without_separator_is_an_error() {
        assert!(matches!(
            Document::parse("not a property"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn render_is_deterministic_and_parseable() {
        let mut doc = Document::new();
        doc.set("name", "demo");
        doc.set("animationSpeed", "32");
        let text = doc.render("Automatically generated, do not alter.");
        assert_eq!(
            text,
            "# Automatically generated, do not alter.\nname=demo\nanimationSpeed=32\n"
        );
        let reparsed = Document::parse(&text).unwrap();
        assert_eq!(reparsed.get("name"), Some("demo"));
    }
}
