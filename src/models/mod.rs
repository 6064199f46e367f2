// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: bitmap frames and animation sequences.

pub mod frame;
pub mod sequence;
