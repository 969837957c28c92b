// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Grid layout planning
//!
//! Turns a cell footprint and a target surface into the list of tile
//! placements. Placements are produced row by row, left to right.

use crate::error::ValidationError;
use crate::shapes::{check_positive, parse_positive};
use crate::utils::math::whole_steps;
use serde::{Deserialize, Serialize};

/// Rectangular region to tile, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SurfaceSpec {
    pub fn new(width_mm: f64, height_mm: f64) -> Result<Self, ValidationError> {
        let surface = Self {
            width_mm,
            height_mm,
        };
        surface.validate()?;
        Ok(surface)
    }

    /// Parse both dimensions from text
    pub fn parse(width: &str, height: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            width_mm: parse_positive("surface_width_mm", width)?,
            height_mm: parse_positive("surface_height_mm", height)?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_positive("surface_width_mm", self.width_mm)?;
        check_positive("surface_height_mm", self.height_mm)
    }
}

/// Where one tile goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub x_offset: f64,
    pub y_offset: f64,
    pub rotation_degrees: f64,
    pub row: usize,
    pub column: usize,
}

/// Tiling pattern of a cell family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grid {
    /// Offset rows with alternating ±30° rotation
    Honeycomb { horizontal: f64, vertical: f64 },
    /// Square pitch, first cell inset from the origin
    Rectangular { pitch: f64, inset: f64 },
    /// One cell per fixed-size region, anchored at the region origin
    Regions { width: f64, height: f64 },
}

impl Grid {
    /// Column and row pitch
    pub fn pitch(&self) -> (f64, f64) {
        match *self {
            Self::Honeycomb {
                horizontal,
                vertical,
            } => (horizontal, vertical),
            Self::Rectangular { pitch, .. } => (pitch, pitch),
            Self::Regions { width, height } => (width, height),
        }
    }

    /// Number of columns and rows before any per-row trimming
    pub fn dimensions(&self, surface: &SurfaceSpec) -> (usize, usize) {
        let (h, v) = self.pitch();
        (
            whole_steps(surface.width_mm, h),
            whole_steps(surface.height_mm, v),
        )
    }

    /// Compute every tile placement covering `surface`.
    ///
    /// Fails with [`ValidationError::EmptyLayout`] when not a single tile fits.
    pub fn plan(&self, surface: &SurfaceSpec) -> Result<Vec<TilePlacement>, ValidationError> {
        surface.validate()?;

        let (columns, rows) = self.dimensions(surface);
        let placements = match *self {
            Self::Honeycomb {
                horizontal,
                vertical,
            } => honeycomb(surface, columns, rows, horizontal, vertical),
            Self::Rectangular { pitch, inset } => (0..rows)
                .flat_map(|i| {
                    (0..columns).map(move |j| TilePlacement {
                        x_offset: inset + j as f64 * pitch,
                        y_offset: inset + i as f64 * pitch,
                        rotation_degrees: 0.0,
                        row: i,
                        column: j,
                    })
                })
                .collect(),
            Self::Regions { width, height } => (0..rows)
                .flat_map(|i| {
                    (0..columns).map(move |j| TilePlacement {
                        x_offset: j as f64 * width,
                        y_offset: i as f64 * height,
                        rotation_degrees: 0.0,
                        row: i,
                        column: j,
                    })
                })
                .collect(),
        };

        if placements.is_empty() {
            let (pitch_x, pitch_y) = self.pitch();
            return Err(ValidationError::EmptyLayout {
                width_mm: surface.width_mm,
                height_mm: surface.height_mm,
                pitch_x,
                pitch_y,
            });
        }

        Ok(placements)
    }
}

fn honeycomb(
    surface: &SurfaceSpec,
    columns: usize,
    rows: usize,
    horizontal: f64,
    vertical: f64,
) -> Vec<TilePlacement> {
    let mut placements = Vec::with_capacity(columns * rows);

    for i in 0..rows {
        for j in 0..columns {
            let x = j as f64 * horizontal + (i % 2) as f64 * (horizontal / 2.0);
            let y = i as f64 * vertical;

            // Out of bounds ends this row only
            if x >= surface.width_mm || y >= surface.height_mm {
                break;
            }

            placements.push(TilePlacement {
                x_offset: x,
                y_offset: y,
                rotation_degrees: honeycomb_rotation(i, j),
                row: i,
                column: j,
            });
        }
    }

    placements
}

/// +30° on even (row + column) parity, -30° otherwise
fn honeycomb_rotation(row: usize, column: usize) -> f64 {
    if (row + column) % 2 == 0 {
        30.0
    } else {
        -30.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn honeycomb_grid(size: f64, spacing: f64) -> Grid {
        Grid::Honeycomb {
            horizontal: 3f64.sqrt() * size + spacing,
            vertical: 1.5 * size + spacing,
        }
    }

    #[test]
    fn test_honeycomb_ten_by_ten() {
        let surface = SurfaceSpec::new(10.0, 10.0).unwrap();
        let grid = honeycomb_grid(1.0, 0.25);
        assert_eq!(grid.dimensions(&surface), (5, 5));

        let placements = grid.plan(&surface).unwrap();
        assert_eq!(placements.len(), 25);
        assert!(placements
            .iter()
            .all(|p| p.x_offset < 10.0 && p.y_offset < 10.0));
    }

    #[test]
    fn test_honeycomb_rotation_alternates() {
        assert_eq!(honeycomb_rotation(0, 0), 30.0);
        assert_eq!(honeycomb_rotation(0, 1), -30.0);
        assert_eq!(honeycomb_rotation(1, 0), -30.0);
        assert_eq!(honeycomb_rotation(1, 1), 30.0);
    }

    #[test]
    fn test_odd_rows_are_offset_by_half_pitch() {
        let surface = SurfaceSpec::new(30.0, 20.0).unwrap();
        let grid = honeycomb_grid(1.5, 0.5);
        let (h, _) = grid.pitch();

        for p in grid.plan(&surface).unwrap() {
            let expected = p.column as f64 * h + if p.row % 2 == 1 { h / 2.0 } else { 0.0 };
            assert!((p.x_offset - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_row_exit_is_per_row() {
        // Four requested columns on a 7 mm wide surface: even rows stop after
        // three tiles, the shifted odd row after two, and the next row resumes.
        let surface = SurfaceSpec::new(7.0, 6.0).unwrap();
        let placements = honeycomb(&surface, 4, 3, 3.0, 2.0);

        let per_row: Vec<usize> = (0..3)
            .map(|r| placements.iter().filter(|p| p.row == r).count())
            .collect();
        assert_eq!(per_row, vec![3, 2, 3]);
        assert!(placements.iter().all(|p| p.x_offset < 7.0));
    }

    #[test]
    fn test_rectangular_grid() {
        let surface = SurfaceSpec::new(10.0, 10.0).unwrap();
        let grid = Grid::Rectangular {
            pitch: 3.0,
            inset: 1.0,
        };
        let placements = grid.plan(&surface).unwrap();
        assert_eq!(placements.len(), 9);
        assert_eq!(placements[0].x_offset, 1.0);
        assert_eq!(placements[4].x_offset, 4.0);
        assert_eq!(placements[8].y_offset, 7.0);
        assert!(placements.iter().all(|p| p.rotation_degrees == 0.0));
    }

    #[test]
    fn test_regions_grid() {
        let surface = SurfaceSpec::new(10.0, 10.0).unwrap();
        let grid = Grid::Regions {
            width: 3.0,
            height: 3f64.sqrt(),
        };
        let placements = grid.plan(&surface).unwrap();
        assert_eq!(grid.dimensions(&surface), (3, 5));
        assert_eq!(placements.len(), 15);
        assert_eq!(placements[0].x_offset, 0.0);
    }

    #[test]
    fn test_zero_surface_is_rejected() {
        assert_eq!(
            SurfaceSpec::new(0.0, 10.0),
            Err(ValidationError::NotPositive {
                field: "surface_width_mm",
                value: 0.0
            })
        );
        assert!(matches!(
            SurfaceSpec::parse("10", "ten"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_too_small_surface_is_empty_layout() {
        let surface = SurfaceSpec::new(1.0, 1.0).unwrap();
        let grid = Grid::Rectangular {
            pitch: 3.0,
            inset: 1.0,
        };
        assert!(matches!(
            grid.plan(&surface),
            Err(ValidationError::EmptyLayout { .. })
        ));
    }
}
