// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat vertex/index buffers for viewers

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interleaved xyz positions and triangle indices, ready for a GPU upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewBuffers {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PreviewBuffers {
    /// Flatten a mesh; fails if a vertex index does not fit in `u32`
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        let positions = mesh
            .vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect();

        let indices: Vec<u32> = mesh
            .triangles
            .iter()
            .flat_map(|t| t.indices)
            .map(to_index)
            .collect::<Result<_>>()?;

        Ok(Self { positions, indices })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Write the buffers as JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(self).context("Failed to serialize preview buffers")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write preview file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn to_index(index: usize) -> Result<u32> {
    u32::try_from(index)
        .with_context(|| format!("vertex index {} does not fit 32-bit preview indices", index))
}
