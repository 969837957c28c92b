// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unit-cell primitive generators
//!
//! Every builder produces one cell centred on the origin with its base on the
//! z = 0 plane. Placement on the surface happens afterwards.

use super::{koch, Mesh};
use crate::error::GeometryError;
use nalgebra::Point3;
use std::f64::consts::PI;

/// Unit-cell primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    HexagonPrism { edge: f64, height: f64 },
    CircularPrism { radius: f64, height: f64, segments: u32 },
    SquarePanel { side: f64 },
    SquareBox { side: f64, height: f64 },
    KochSnowflake { side: f64, iterations: u32 },
}

impl Primitive {
    pub fn to_mesh(&self) -> Result<Mesh, GeometryError> {
        match *self {
            Self::HexagonPrism { edge, height } => generate_hexagon_prism(edge, height),
            Self::CircularPrism {
                radius,
                height,
                segments,
            } => generate_circular_prism(radius, height, segments),
            Self::SquarePanel { side } => generate_square_panel(side),
            Self::SquareBox { side, height } => generate_square_box(side, height),
            Self::KochSnowflake { side, iterations } => koch::generate_snowflake(side, iterations),
        }
    }

    /// Number of triangles `to_mesh` produces, `None` if it overflows `usize`
    pub fn triangle_count(&self) -> Option<usize> {
        match *self {
            Self::HexagonPrism { .. } => Some(20),
            Self::CircularPrism { segments, .. } => (segments as usize).checked_mul(4),
            Self::SquarePanel { .. } => Some(2),
            Self::SquareBox { .. } => Some(12),
            Self::KochSnowflake { iterations, .. } => koch::boundary_len(iterations).map(|n| n / 3),
        }
    }
}

fn generate_hexagon_prism(edge: f64, height: f64) -> Result<Mesh, GeometryError> {
    let mut mesh = Mesh::with_capacity(12, 20);

    // Radius equals the edge length for a regular hexagon
    for z in [0.0, height] {
        for i in 0..6 {
            let angle = (60.0 * i as f64).to_radians();
            mesh.add_vertex(Point3::new(edge * angle.cos(), edge * angle.sin(), z));
        }
    }

    for i in 0..6 {
        let next = (i + 1) % 6;
        mesh.add_triangle([i, next, i + 6])?;
        mesh.add_triangle([next, next + 6, i + 6])?;
    }

    for i in 1..5 {
        mesh.add_triangle([0, i, i + 1])?;
        mesh.add_triangle([6, i + 6, i + 7])?;
    }

    Ok(mesh)
}

fn generate_circular_prism(radius: f64, height: f64, segments: u32) -> Result<Mesh, GeometryError> {
    let n = segments as usize;
    let mut mesh = Mesh::with_capacity(2 * n + 2, 4 * n);

    // Layout: bottom centre, n bottom rim points, top centre, n top rim points
    let mut rims = [Vec::with_capacity(n), Vec::with_capacity(n)];
    let mut centers = [0; 2];
    for (level, z) in [0.0, height].into_iter().enumerate() {
        centers[level] = mesh.add_vertex(Point3::new(0.0, 0.0, z));
        for i in 0..n {
            let theta = 2.0 * PI * i as f64 / n as f64;
            rims[level].push(mesh.add_vertex(Point3::new(
                radius * theta.cos(),
                radius * theta.sin(),
                z,
            )));
        }
    }

    let [bottom, top] = &rims;
    for level in 0..2 {
        for i in 0..n {
            let next = (i + 1) % n;
            mesh.add_triangle([centers[level], rims[level][i], rims[level][next]])?;
        }
    }

    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_triangle([bottom[i], bottom[next], top[next]])?;
        mesh.add_triangle([top[next], top[i], bottom[i]])?;
    }

    Ok(mesh)
}

/// Flat quad at z = 0. The cell height is deliberately not applied here.
fn generate_square_panel(side: f64) -> Result<Mesh, GeometryError> {
    let half = side / 2.0;
    let mut mesh = Mesh::with_capacity(4, 2);

    mesh.add_vertex(Point3::new(-half, -half, 0.0));
    mesh.add_vertex(Point3::new(half, -half, 0.0));
    mesh.add_vertex(Point3::new(half, half, 0.0));
    mesh.add_vertex(Point3::new(-half, half, 0.0));

    mesh.add_triangle([0, 1, 2])?;
    mesh.add_triangle([0, 2, 3])?;
    Ok(mesh)
}

fn generate_square_box(side: f64, height: f64) -> Result<Mesh, GeometryError> {
    let half = side / 2.0;
    let mut mesh = Mesh::with_capacity(8, 12);

    for z in [0.0, height] {
        mesh.add_vertex(Point3::new(-half, -half, z));
        mesh.add_vertex(Point3::new(half, -half, z));
        mesh.add_vertex(Point3::new(half, half, z));
        mesh.add_vertex(Point3::new(-half, half, z));
    }

    // Bottom faces down, top faces up
    mesh.add_triangle([0, 2, 1])?;
    mesh.add_triangle([0, 3, 2])?;
    mesh.add_triangle([4, 5, 6])?;
    mesh.add_triangle([4, 6, 7])?;

    for i in 0..4 {
        let next = (i + 1) % 4;
        mesh.add_triangle([i, next, next + 4])?;
        mesh.add_triangle([i, next + 4, i + 4])?;
    }

    Ok(mesh)
}
