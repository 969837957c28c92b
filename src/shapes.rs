// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unit-cell shape variants and parameter validation
//!
//! Parameters arrive as text from whatever front end collects them. They are
//! parsed and checked once, up front, into a [`Shape`]; nothing downstream
//! re-validates.

use crate::config::GeneratorConfig;
use crate::error::{GeometryError, ValidationError};
use crate::geometry::{koch, Mesh, Primitive};
use crate::layout::Grid;
use serde::{Deserialize, Serialize};

/// Hexagonal prism cell laid out as a honeycomb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hexagon {
    pub edge_size: f64,
    pub height: f64,
    pub spacing: f64,
}

/// Cylindrical cell on a rectangular grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    pub height: f64,
    pub spacing: f64,
    pub point_count: u32,
}

/// How square cells are built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStyle {
    /// Two triangles at z = 0; the height is not applied
    #[default]
    Flat,
    /// Closed box extruded to the cell height
    Extruded,
}

/// Square cell on a rectangular grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub side_length: f64,
    pub height: f64,
    pub spacing: f64,
    #[serde(default)]
    pub style: PanelStyle,
}

/// Koch snowflake outline tiled over fixed regions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KochSnowflake {
    pub side_length: f64,
    pub iteration_count: u32,
}

/// Closed family of unit cells, each carrying its own parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Hexagon(Hexagon),
    Circle(Circle),
    Square(Square),
    KochSnowflake(KochSnowflake),
}

impl Hexagon {
    pub fn primitive(&self) -> Primitive {
        Primitive::HexagonPrism {
            edge: self.edge_size,
            height: self.height,
        }
    }

    pub fn generate_mesh(&self) -> Result<Mesh, GeometryError> {
        self.primitive().to_mesh()
    }
}

impl Circle {
    pub fn primitive(&self) -> Primitive {
        Primitive::CircularPrism {
            radius: self.radius,
            height: self.height,
            segments: self.point_count,
        }
    }

    pub fn generate_mesh(&self) -> Result<Mesh, GeometryError> {
        self.primitive().to_mesh()
    }
}

impl Square {
    pub fn primitive(&self) -> Primitive {
        match self.style {
            PanelStyle::Flat => Primitive::SquarePanel {
                side: self.side_length,
            },
            PanelStyle::Extruded => Primitive::SquareBox {
                side: self.side_length,
                height: self.height,
            },
        }
    }

    pub fn generate_mesh(&self) -> Result<Mesh, GeometryError> {
        self.primitive().to_mesh()
    }
}

impl KochSnowflake {
    pub fn primitive(&self) -> Primitive {
        Primitive::KochSnowflake {
            side: self.side_length,
            iterations: self.iteration_count,
        }
    }

    pub fn generate_mesh(&self) -> Result<Mesh, GeometryError> {
        self.primitive().to_mesh()
    }
}

impl Shape {
    /// Short lowercase name of the variant
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hexagon(_) => "hexagon",
            Self::Circle(_) => "circle",
            Self::Square(_) => "square",
            Self::KochSnowflake(_) => "koch_snowflake",
        }
    }

    /// Build one cell at the origin
    pub fn generate_mesh(&self) -> Result<Mesh, GeometryError> {
        match self {
            Self::Hexagon(hexagon) => hexagon.generate_mesh(),
            Self::Circle(circle) => circle.generate_mesh(),
            Self::Square(square) => square.generate_mesh(),
            Self::KochSnowflake(koch) => koch.generate_mesh(),
        }
    }

    pub fn primitive(&self) -> Primitive {
        match self {
            Self::Hexagon(hexagon) => hexagon.primitive(),
            Self::Circle(circle) => circle.primitive(),
            Self::Square(square) => square.primitive(),
            Self::KochSnowflake(koch) => koch.primitive(),
        }
    }

    /// Grid this cell is tiled on
    pub fn grid(&self) -> Grid {
        match *self {
            Self::Hexagon(Hexagon {
                edge_size, spacing, ..
            }) => Grid::Honeycomb {
                horizontal: 3f64.sqrt() * edge_size + spacing,
                vertical: 1.5 * edge_size + spacing,
            },
            Self::Circle(Circle {
                radius, spacing, ..
            }) => Grid::Rectangular {
                pitch: 2.0 * radius + spacing,
                inset: radius,
            },
            Self::Square(Square {
                side_length,
                spacing,
                ..
            }) => Grid::Rectangular {
                pitch: side_length + spacing,
                inset: side_length / 2.0,
            },
            Self::KochSnowflake(KochSnowflake { side_length, .. }) => Grid::Regions {
                width: 3.0 * side_length,
                height: 3f64.sqrt() * side_length,
            },
        }
    }

    /// Check invariants of programmatically built parameters
    pub fn validate(&self, config: &GeneratorConfig) -> Result<(), ValidationError> {
        match *self {
            Self::Hexagon(Hexagon {
                edge_size,
                height,
                spacing,
            }) => {
                check_positive("edge_size", edge_size)?;
                check_positive("height", height)?;
                check_positive("spacing", spacing)?;
            }
            Self::Circle(Circle {
                radius,
                height,
                spacing,
                point_count,
            }) => {
                check_positive("radius", radius)?;
                check_positive("height", height)?;
                check_positive("spacing", spacing)?;
                if point_count < 3 {
                    return Err(ValidationError::TooFewPoints { count: point_count });
                }
            }
            Self::Square(Square {
                side_length,
                height,
                spacing,
                ..
            }) => {
                check_positive("side_length", side_length)?;
                check_positive("height", height)?;
                check_positive("spacing", spacing)?;
            }
            Self::KochSnowflake(KochSnowflake {
                side_length,
                iteration_count,
            }) => {
                check_positive("side_length", side_length)?;
                let max = config.max_koch_iterations.min(koch::MAX_ITERATIONS);
                if iteration_count > max {
                    return Err(ValidationError::TooManyIterations {
                        count: iteration_count,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Shape parameters as entered by a user, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeInput {
    Hexagon {
        edge_size: String,
        height: String,
        spacing: String,
    },
    Circle {
        radius: String,
        height: String,
        spacing: String,
        point_count: Option<String>,
    },
    Square {
        side_length: String,
        height: String,
        spacing: String,
    },
    KochSnowflake {
        side_length: String,
        iteration_count: String,
    },
}

impl ShapeInput {
    /// Parse every field and check the resulting shape
    pub fn parse(&self, config: &GeneratorConfig) -> Result<Shape, ValidationError> {
        let shape = match self {
            Self::Hexagon {
                edge_size,
                height,
                spacing,
            } => Shape::Hexagon(Hexagon {
                edge_size: parse_positive("edge_size", edge_size)?,
                height: parse_positive("height", height)?,
                spacing: parse_positive("spacing", spacing)?,
            }),
            Self::Circle {
                radius,
                height,
                spacing,
                point_count,
            } => Shape::Circle(Circle {
                radius: parse_positive("radius", radius)?,
                height: parse_positive("height", height)?,
                spacing: parse_positive("spacing", spacing)?,
                point_count: match point_count {
                    Some(text) => parse_count("point_count", text)?,
                    None => config.default_circle_points,
                },
            }),
            Self::Square {
                side_length,
                height,
                spacing,
            } => Shape::Square(Square {
                side_length: parse_positive("side_length", side_length)?,
                height: parse_positive("height", height)?,
                spacing: parse_positive("spacing", spacing)?,
                style: if config.extrude_square_panels {
                    PanelStyle::Extruded
                } else {
                    PanelStyle::Flat
                },
            }),
            Self::KochSnowflake {
                side_length,
                iteration_count,
            } => Shape::KochSnowflake(KochSnowflake {
                side_length: parse_positive("side_length", side_length)?,
                iteration_count: parse_count("iteration_count", iteration_count)?,
            }),
        };

        shape.validate(config)?;
        Ok(shape)
    }
}

/// Parse a strictly positive, finite decimal number
pub fn parse_positive(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: text.to_string(),
        })?;
    check_positive(field, value)?;
    Ok(value)
}

/// Parse a non-negative integer count
pub fn parse_count(field: &'static str, text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| {
        let negative = trimmed
            .strip_prefix('-')
            .is_some_and(|digits| digits.parse::<u64>().is_ok());
        if negative {
            ValidationError::NegativeCount {
                field,
                value: text.to_string(),
            }
        } else {
            ValidationError::NotANumber {
                field,
                value: text.to_string(),
            }
        }
    })
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}
