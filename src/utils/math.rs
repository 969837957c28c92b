// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Faces with less area than this (mm²) are treated as degenerate
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Unit normal of a triangle, or the zero vector when the triangle is degenerate
pub fn triangle_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    let cross = (p1 - p0).cross(&(p2 - p0));
    let len = cross.norm();
    if len > 2.0 * DEGENERATE_AREA_EPSILON {
        cross / len
    } else {
        Vector3::zeros()
    }
}

/// Area of a triangle
pub fn triangle_area(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Number of whole pitches that fit into `extent`.
///
/// A tiny relative slack keeps exact multiples (10 / 1.25) from losing a tile
/// to rounding.
pub fn whole_steps(extent: f64, pitch: f64) -> usize {
    let steps = extent / pitch;
    (steps + steps * 1e-12).floor().max(0.0) as usize
}
