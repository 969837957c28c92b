// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use crate::error::GeometryError;
use crate::utils::math::{deg_to_rad, triangle_area, triangle_normal, DEGENERATE_AREA_EPSILON};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangular mesh.
///
/// Vertices are never welded: every tile keeps its own vertex buffer, and
/// merging only re-bases indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a triangle, rejecting out-of-range indices, non-finite vertices and
    /// faces whose area falls below [`DEGENERATE_AREA_EPSILON`]
    pub fn add_triangle(&mut self, indices: [usize; 3]) -> Result<(), GeometryError> {
        let len = self.vertices.len();
        for &index in &indices {
            if index >= len {
                return Err(GeometryError::IndexOutOfBounds { index, len });
            }
            if !self.vertices[index].coords.iter().all(|c| c.is_finite()) {
                return Err(GeometryError::NonFiniteVertex { index });
            }
        }

        let [a, b, c] = indices.map(|i| &self.vertices[i]);
        let area = triangle_area(a, b, c);
        if area < DEGENERATE_AREA_EPSILON {
            return Err(GeometryError::DegenerateTriangle { indices, area });
        }

        self.triangles.push(Triangle::new(indices));
        Ok(())
    }

    /// Rotate about the z axis by `degrees`, then translate by `offset`
    pub fn place(&mut self, degrees: f64, offset: Vector3<f64>) {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), deg_to_rad(degrees));
        self.transform(&Isometry3::from_parts(Translation3::from(offset), rotation));
    }

    /// Transform all vertices by a rigid motion
    pub fn transform(&mut self, isometry: &Isometry3<f64>) {
        for vertex in &mut self.vertices {
            *vertex = isometry.transform_point(vertex);
        }
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Positions of the three corners of a triangle
    pub fn corners(&self, triangle: &Triangle) -> [Point3<f64>; 3] {
        triangle.indices.map(|i| self.vertices[i])
    }

    /// Facet normal of a triangle (zero for a degenerate face)
    pub fn facet_normal(&self, triangle: &Triangle) -> Vector3<f64> {
        let [a, b, c] = self.corners(triangle);
        triangle_normal(&a, &b, &c)
    }

    /// Append another mesh, re-basing its indices (simple union without CSG)
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);

        for triangle in &other.triangles {
            self.triangles
                .push(Triangle::new(triangle.indices.map(|i| i + offset)));
        }
    }
}
