// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Koch snowflake boundary generation
//!
//! The boundary starts as a counter-clockwise equilateral triangle. Each
//! iteration replaces every edge `a -> b` with the polyline
//! `a, p1, apex, p2` where `p1`/`p2` are the thirds of the edge and the apex
//! bulges outward, so the vertex count grows by a factor of four.
//!
//! Triangulation groups consecutive boundary vertices into triples. The result
//! is a flat, self-overlapping fan that approximates the outline; it is not a
//! closed solid.

use super::Mesh;
use crate::error::GeometryError;
use nalgebra::{Point2, Point3, Vector2};

/// Deepest subdivision a snowflake cell may use (`3 * 4^12` boundary points)
pub const MAX_ITERATIONS: u32 = 12;

/// Number of boundary vertices after `iterations` subdivisions (`3 * 4^k`),
/// or `None` if that count does not fit in `usize`
pub fn boundary_len(iterations: u32) -> Option<usize> {
    4usize.checked_pow(iterations)?.checked_mul(3)
}

/// Closed, counter-clockwise Koch boundary for a base triangle of side `side`
pub fn snowflake_boundary(side: f64, iterations: u32) -> Vec<Point2<f64>> {
    let height = side * 3f64.sqrt() / 2.0;
    let mut boundary = vec![
        Point2::new(0.0, height),
        Point2::new(-side / 2.0, 0.0),
        Point2::new(side / 2.0, 0.0),
    ];

    for _ in 0..iterations {
        boundary = subdivide(&boundary);
    }

    boundary
}

fn subdivide(boundary: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut next = Vec::with_capacity(boundary.len() * 4);

    for (i, &start) in boundary.iter().enumerate() {
        let end = boundary[(i + 1) % boundary.len()];
        let third = (end - start) / 3.0;
        let p1 = start + third;
        let p2 = start + third * 2.0;

        // Clockwise quarter turn points outward on a CCW boundary
        let outward = Vector2::new(third.y, -third.x);
        let apex = nalgebra::center(&p1, &p2) + outward * (3f64.sqrt() / 2.0);

        next.extend_from_slice(&[start, p1, apex, p2]);
    }

    next
}

/// Triangulate the boundary by consecutive vertex triples at z = 0
pub fn generate_snowflake(side: f64, iterations: u32) -> Result<Mesh, GeometryError> {
    if iterations > MAX_ITERATIONS {
        return Err(GeometryError::TooManyIterations {
            iterations,
            max: MAX_ITERATIONS,
        });
    }

    let boundary = snowflake_boundary(side, iterations);
    let mut mesh = Mesh::with_capacity(boundary.len(), boundary.len() / 3);

    for point in &boundary {
        mesh.add_vertex(Point3::new(point.x, point.y, 0.0));
    }

    for i in (0..boundary.len() / 3).map(|t| t * 3) {
        mesh.add_triangle([i, i + 1, i + 2])?;
    }

    Ok(mesh)
}
