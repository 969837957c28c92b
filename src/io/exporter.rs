// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL exporter
//!
//! The file is written to a temporary sibling first and moved into place once
//! complete, so a failed export never leaves a truncated STL behind.

use crate::error::ExportError;
use crate::geometry::Mesh;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};
use tempfile::NamedTempFile;
use tracing::info;

/// Export behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Replace an existing file at the destination
    pub overwrite: bool,
}

/// Size in bytes of a binary STL holding `triangles` facets
pub fn stl_size(triangles: usize) -> u64 {
    84 + 50 * triangles as u64
}

/// Write `mesh` as binary STL to `path`
pub fn export_stl(
    mesh: &Mesh,
    path: impl AsRef<Path>,
    options: ExportOptions,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if !options.overwrite && path.exists() {
        return Err(ExportError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let staging = NamedTempFile::new_in(&parent).map_err(io_error)?;

    {
        let mut writer = BufWriter::new(staging.as_file());
        stl_io::write_stl(&mut writer, to_stl_triangles(mesh).iter()).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
    }

    if options.overwrite {
        staging.persist(path).map_err(|e| io_error(e.error))?;
    } else {
        staging.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                ExportError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                io_error(e.error)
            }
        })?;
    }

    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        bytes = stl_size(mesh.triangle_count()),
        "wrote STL"
    );
    Ok(())
}

fn to_stl_triangles(mesh: &Mesh) -> Vec<StlTriangle> {
    mesh.triangles
        .iter()
        .map(|tri| {
            let n = mesh.facet_normal(tri);
            let [v0, v1, v2] = mesh.corners(tri);

            StlTriangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    StlVertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    StlVertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    StlVertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect()
}
