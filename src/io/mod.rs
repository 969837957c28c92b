// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL export and preview buffers

mod exporter;
mod preview;

pub use exporter::{export_stl, stl_size, ExportOptions};
pub use preview::PreviewBuffers;
