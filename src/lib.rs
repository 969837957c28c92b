// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cellgrid tiling kernel
//!
//! Procedurally builds unit cells (hexagon, circle, square, Koch snowflake),
//! tiles them across a rectangular surface on a worker pool, and writes the
//! combined triangle mesh as binary STL.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod layout;
pub mod shapes;
pub mod utils;

pub use assembly::{AssemblyOutcome, CancellationToken, Progress, ProgressSink, TiledMesh};
pub use config::GeneratorConfig;
pub use error::{ExportError, GeometryError, Result, TilerError, ValidationError};
pub use geometry::{Mesh, Primitive};
pub use io::{export_stl, ExportOptions, PreviewBuffers};
pub use kernel::{GenerationOutcome, GenerationReport, TilingKernel};
pub use layout::{SurfaceSpec, TilePlacement};
pub use shapes::{Shape, ShapeInput};

use std::path::Path;

/// Main entry point: parse text parameters, tile the surface and write `output`
pub fn generate(
    input: &ShapeInput,
    width: &str,
    height: &str,
    output: impl AsRef<Path>,
    config: GeneratorConfig,
) -> Result<GenerationOutcome> {
    let shape = input.parse(&config)?;
    let surface = SurfaceSpec::parse(width, height)?;
    TilingKernel::new(config)?.generate_to(&shape, &surface, output)
}
