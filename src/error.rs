// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for tile generation and export

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for kernel-level operations
pub type Result<T> = std::result::Result<T, TilerError>;

/// Top-level error returned by a generation request
#[derive(Error, Debug)]
pub enum TilerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Parameter problems detected before any tile work begins
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("{field}: {value} must be greater than zero")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: '{value}' is negative, a count must be zero or more")]
    NegativeCount { field: &'static str, value: String },

    #[error("{field}: {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },

    #[error("point_count: {count} is too small, a circle needs at least 3 points")]
    TooFewPoints { count: u32 },

    #[error("iteration_count: {count} exceeds the configured maximum of {max}")]
    TooManyIterations { count: u32, max: u32 },

    #[error(
        "surface {width_mm}x{height_mm} mm cannot hold a single tile (pitch {pitch_x:.3}x{pitch_y:.3} mm)"
    )]
    EmptyLayout {
        width_mm: f64,
        height_mm: f64,
        pitch_x: f64,
        pitch_y: f64,
    },
}

/// Failure while constructing a single tile
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("triangle {indices:?} is degenerate (area {area:e})")]
    DegenerateTriangle { indices: [usize; 3], area: f64 },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("triangle references vertex {index} but the mesh has {len} vertices")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Koch snowflake with {iterations} iterations exceeds the limit of {max}")]
    TooManyIterations { iterations: u32, max: u32 },
}

/// Failure while writing the combined mesh
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("refusing to overwrite existing file {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Path the export attempted to write
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::AlreadyExists { path } | Self::Io { path, .. } => path,
        }
    }
}
