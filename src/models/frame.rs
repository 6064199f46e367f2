// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Monochrome bitmap frames.
//!
//! A frame stores one byte per column with bit `y` representing the pixel
//! at `(x, y)`, the same packing the target LED-matrix driver consumes.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

/// Default frame width in pixels.
pub const DEFAULT_WIDTH: usize = 8;
/// Default frame height in pixels.
pub const DEFAULT_HEIGHT: usize = 8;

/// One bit per row per column byte, so height is capped at 8.
const MAX_HEIGHT: usize = 8;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque frame identity, unique per process. Used to track frames across
/// reorderings; carries no meaning beyond identity and debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame #{}", self.0)
    }
}

/// A fixed-size monochrome bitmap with a sticky unsaved-changes flag.
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    width: usize,
    height: usize,
    columns: Vec<u8>,
    dirty: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).expect("default dimensions are valid")
    }
}

impl Frame {
    /// Create a blank frame. Height is limited to `1..=8` by the
    /// one-byte-per-column packing; width must be at least 1.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::validation("frame width must be at least 1"));
        }
        if height == 0 || height > MAX_HEIGHT {
            return Err(Error::validation(format!(
                "frame height must be in 1..={MAX_HEIGHT}, got {height}"
            )));
        }
        Ok(Self {
            id: FrameId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            width,
            height,
            columns: vec![0; width],
            dirty: false,
        })
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw column bytes, one per x-coordinate.
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    fn check_coords(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::validation(format!(
                "pixel ({x}, {y}) outside {}x{} frame",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether the pixel at `(x, y)` is lit.
    pub fn is_set(&self, x: usize, y: usize) -> Result<bool> {
        self.check_coords(x, y)?;
        Ok(self.columns[x] & (1 << y) != 0)
    }

    /// Set or clear one pixel. Returns whether the stored byte changed;
    /// a change also marks the frame dirty.
    pub fn set(&mut self, x: usize, y: usize, on: bool) -> Result<bool> {
        self.check_coords(x, y)?;
        let mask = 1u8 << y;
        let old = self.columns[x];
        if on {
            self.columns[x] |= mask;
        } else {
            self.columns[x] &= !mask;
        }
        let changed = old != self.columns[x];
        self.dirty |= changed;
        Ok(changed)
    }

    /// Invert one pixel. Returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        let lit = self.is_set(x, y)?;
        self.set(x, y, !lit)?;
        Ok(!lit)
    }

    /// Light every pixel. Returns whether anything changed.
    pub fn fill(&mut self) -> bool {
        let all_on = ((1u16 << self.height) - 1) as u8;
        let changed = self.columns.iter().any(|&b| b != all_on);
        self.columns.fill(all_on);
        self.dirty |= changed;
        changed
    }

    /// Clear every pixel. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.columns.iter().any(|&b| b != 0);
        self.columns.fill(0);
        self.dirty |= changed;
        changed
    }

    /// Render the column bytes as comma-separated lowercase hex literals,
    /// e.g. `0x0, 0xff, 0x3c, ...` - the form used both in project files
    /// and in the exported C source.
    pub fn encode(&self) -> String {
        self.columns
            .iter()
            .map(|b| format!("0x{b:x}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Inverse of [`encode`](Self::encode). Token count defines the frame
    /// width; height defaults to 8.
    pub fn decode(s: &str) -> Result<Self> {
        let mut columns = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let value = u8::from_str_radix(digits, 16)
                .map_err(|_| Error::format(format!("invalid hex byte '{token}'")))?;
            columns.push(value);
        }
        let mut frame = Self::new(columns.len(), DEFAULT_HEIGHT)?;
        frame.columns = columns;
        Ok(frame)
    }

    /// Value copy of the pixel data with a fresh identity. The copy starts
    /// out clean and the two frames are independent thereafter.
    pub fn create_copy(&self) -> Self {
        Self {
            id: FrameId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            width: self.width,
            height: self.height,
            columns: self.columns.clone(),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}
