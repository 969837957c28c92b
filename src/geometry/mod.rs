// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and unit-cell primitives

mod bbox;
pub mod koch;
mod mesh;
mod primitives;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle};
pub use primitives::Primitive;
