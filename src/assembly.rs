// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel tile assembly using rayon
//!
//! Tiles are built in batches on a dedicated thread pool. Within a batch every
//! tile is independent; the orchestrating thread waits for the batch, appends
//! the finished tiles in placement order, and reports progress before the next
//! batch starts.

use crate::config::GeneratorConfig;
use crate::error::{GeometryError, TilerError};
use crate::geometry::Mesh;
use crate::layout::TilePlacement;
use crate::shapes::Shape;
use nalgebra::Vector3;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tiles processed so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage in `[0, 100]`
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Receives a progress update after every completed batch
pub trait ProgressSink {
    fn batch_completed(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress),
{
    fn batch_completed(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Progress sink that discards updates
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn batch_completed(&mut self, _progress: Progress) {}
}

/// Shared flag a caller sets to stop generation between batches
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A tile that failed to build and was left out of the mesh
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTile {
    pub placement: TilePlacement,
    pub error: GeometryError,
}

/// Combined mesh of every tile that built successfully
#[derive(Debug, Clone)]
pub struct TiledMesh {
    pub mesh: Mesh,
    pub total_tiles: usize,
    pub placed_tiles: usize,
    pub skipped: Vec<SkippedTile>,
}

impl TiledMesh {
    pub fn skipped_tiles(&self) -> usize {
        self.skipped.len()
    }

    /// Fraction of planned tiles that were dropped
    pub fn skip_ratio(&self) -> f64 {
        if self.total_tiles == 0 {
            0.0
        } else {
            self.skipped.len() as f64 / self.total_tiles as f64
        }
    }
}

/// How an assembly run ended
#[derive(Debug, Clone)]
pub enum AssemblyOutcome {
    Completed(TiledMesh),
    /// Stopped at a batch boundary; partial results were discarded
    Cancelled { completed_tiles: usize, total_tiles: usize },
}

/// Builds and merges tiles on a bounded worker pool
pub struct MeshAssembler {
    pool: ThreadPool,
    batch_size: usize,
}

impl MeshAssembler {
    pub fn new(config: &GeneratorConfig) -> Result<Self, TilerError> {
        config.validate()?;

        let workers = config.worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cellgrid-tile-{}", i))
            .build()
            .map_err(|e| TilerError::Config(format!("failed to start worker pool: {}", e)))?;

        debug!(workers, batch_size = config.batch_size, "tile worker pool ready");
        Ok(Self {
            pool,
            batch_size: config.batch_size,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Build one tile per placement and merge them in placement order
    pub fn assemble(
        &self,
        shape: &Shape,
        placements: &[TilePlacement],
        progress: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> AssemblyOutcome {
        let total = placements.len();
        let reserve = shape
            .primitive()
            .triangle_count()
            .and_then(|per_tile| per_tile.checked_mul(total))
            .unwrap_or(0);
        let mut mesh = Mesh::with_capacity(0, reserve);
        let mut skipped = Vec::new();
        let mut completed = 0;

        for (index, batch) in placements.chunks(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                return Self::cancelled(completed, total);
            }

            let results: Vec<Result<Mesh, GeometryError>> = self
                .pool
                .install(|| batch.par_iter().map(|p| build_tile(shape, p)).collect());

            // The batch ran to completion, but a cancel during it still wins
            if cancel.is_cancelled() {
                return Self::cancelled(completed, total);
            }

            for (placement, result) in batch.iter().zip(results) {
                match result {
                    Ok(tile) => mesh.merge(&tile),
                    Err(error) => {
                        warn!(
                            row = placement.row,
                            column = placement.column,
                            %error,
                            "skipping tile"
                        );
                        skipped.push(SkippedTile {
                            placement: *placement,
                            error,
                        });
                    }
                }
            }

            completed += batch.len();
            debug!(batch = index, completed, total, "batch complete");
            progress.batch_completed(Progress { completed, total });
        }

        AssemblyOutcome::Completed(TiledMesh {
            mesh,
            total_tiles: total,
            placed_tiles: total - skipped.len(),
            skipped,
        })
    }

    fn cancelled(completed_tiles: usize, total_tiles: usize) -> AssemblyOutcome {
        debug!(completed_tiles, total_tiles, "assembly cancelled");
        AssemblyOutcome::Cancelled {
            completed_tiles,
            total_tiles,
        }
    }
}

/// Build one cell and move it into place: rotate about z, then translate
pub fn build_tile(shape: &Shape, placement: &TilePlacement) -> Result<Mesh, GeometryError> {
    let mut mesh = shape.generate_mesh()?;
    mesh.place(
        placement.rotation_degrees,
        Vector3::new(placement.x_offset, placement.y_offset, 0.0),
    );
    Ok(mesh)
}
