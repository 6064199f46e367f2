// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: project persistence, source export and application settings.

pub mod document;
pub mod project;
pub mod settings;
