// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the sprite data model and persistence codec.

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core model and the persistence codec.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument violated a contract (out-of-range coordinate,
    /// blank name, non-positive interval).
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Malformed hex token or malformed persisted document.
    #[error("malformed data: {0}")]
    Format(String),

    /// A decoded sequence violated a structural invariant.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Underlying file I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}
