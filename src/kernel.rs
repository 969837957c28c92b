// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API tying planning, assembly and export together

use crate::assembly::{
    AssemblyOutcome, CancellationToken, MeshAssembler, NoProgress, ProgressSink, TiledMesh,
};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::io::{export_stl, ExportOptions};
use crate::layout::{SurfaceSpec, TilePlacement};
use crate::shapes::Shape;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub path: PathBuf,
    pub triangles: usize,
    pub total_tiles: usize,
    pub placed_tiles: usize,
    pub skipped_tiles: usize,
    /// Extent of the written mesh, `None` when no tile was placed
    pub bounds: Option<BoundingBox>,
    /// Set when the skip ratio exceeded the configured threshold
    pub warning: Option<String>,
}

/// How a generation request ended
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Completed(GenerationReport),
    /// Stopped between batches; nothing was written
    Cancelled {
        completed_tiles: usize,
        total_tiles: usize,
    },
}

/// Tiling pipeline bound to one configuration
pub struct TilingKernel {
    config: GeneratorConfig,
    assembler: MeshAssembler,
}

impl TilingKernel {
    /// Create a kernel, validating the configuration and starting its pool
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let assembler = MeshAssembler::new(&config)?;
        Ok(Self { config, assembler })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate inputs and compute placements without building anything
    pub fn plan(&self, shape: &Shape, surface: &SurfaceSpec) -> Result<Vec<TilePlacement>> {
        shape.validate(&self.config)?;
        surface.validate()?;

        let grid = shape.grid();
        let placements = grid.plan(surface)?;
        let (columns, rows) = grid.dimensions(surface);
        info!(
            shape = shape.name(),
            columns,
            rows,
            tiles = placements.len(),
            "planned layout"
        );
        Ok(placements)
    }

    /// Build the combined mesh in memory
    pub fn build(
        &self,
        shape: &Shape,
        surface: &SurfaceSpec,
        progress: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<AssemblyOutcome> {
        let placements = self.plan(shape, surface)?;
        let outcome = self.assembler.assemble(shape, &placements, progress, cancel);
        if let AssemblyOutcome::Completed(tiled) = &outcome {
            if let Some(message) = self.skip_warning(tiled) {
                warn!(
                    ratio = tiled.skip_ratio(),
                    threshold = self.config.skip_warning_ratio,
                    "{}",
                    message
                );
            }
        }
        Ok(outcome)
    }

    /// Validate, plan, assemble and write the STL to `output`
    pub fn generate(
        &self,
        shape: &Shape,
        surface: &SurfaceSpec,
        output: impl AsRef<Path>,
        progress: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome> {
        match self.build(shape, surface, progress, cancel)? {
            AssemblyOutcome::Completed(tiled) => {
                Ok(GenerationOutcome::Completed(self.export(&tiled, output)?))
            }
            AssemblyOutcome::Cancelled {
                completed_tiles,
                total_tiles,
            } => {
                info!(completed_tiles, total_tiles, "generation cancelled");
                Ok(GenerationOutcome::Cancelled {
                    completed_tiles,
                    total_tiles,
                })
            }
        }
    }

    /// Write an assembled mesh to `output` and summarize the run
    pub fn export(&self, tiled: &TiledMesh, output: impl AsRef<Path>) -> Result<GenerationReport> {
        let output = output.as_ref();
        export_stl(
            &tiled.mesh,
            output,
            ExportOptions {
                overwrite: self.config.overwrite,
            },
        )?;

        let bounds = tiled.mesh.bounding_box();
        Ok(GenerationReport {
            path: output.to_path_buf(),
            triangles: tiled.mesh.triangle_count(),
            total_tiles: tiled.total_tiles,
            placed_tiles: tiled.placed_tiles,
            skipped_tiles: tiled.skipped_tiles(),
            bounds: (!bounds.is_empty()).then_some(bounds),
            warning: self.skip_warning(tiled),
        })
    }

    /// Generate without progress reporting or cancellation
    pub fn generate_to(
        &self,
        shape: &Shape,
        surface: &SurfaceSpec,
        output: impl AsRef<Path>,
    ) -> Result<GenerationOutcome> {
        self.generate(shape, surface, output, &mut NoProgress, &CancellationToken::new())
    }

    fn skip_warning(&self, tiled: &TiledMesh) -> Option<String> {
        let ratio = tiled.skip_ratio();
        if tiled.skipped.is_empty() || ratio <= self.config.skip_warning_ratio {
            return None;
        }

        Some(format!(
            "{} of {} tiles could not be built and were left out",
            tiled.skipped_tiles(),
            tiled.total_tiles
        ))
    }
}
