// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output file names that echo the generation parameters

use crate::shapes::ShapeInput;

/// Build a name such as
/// `honeycomb_grid_surface_10x10_size_1_height_1_spacing_0.25.stl`.
///
/// Fields are used as typed so the name matches what the user entered.
pub fn descriptive_file_name(
    input: &ShapeInput,
    surface_width: &str,
    surface_height: &str,
) -> String {
    let (prefix, fields): (&str, Vec<(&str, &str)>) = match input {
        ShapeInput::Hexagon {
            edge_size,
            height,
            spacing,
        } => (
            "honeycomb_grid",
            vec![
                ("size", edge_size.as_str()),
                ("height", height.as_str()),
                ("spacing", spacing.as_str()),
            ],
        ),
        ShapeInput::Circle {
            radius,
            height,
            spacing,
            point_count,
        } => {
            let mut fields = vec![
                ("radius", radius.as_str()),
                ("height", height.as_str()),
                ("spacing", spacing.as_str()),
            ];
            if let Some(points) = point_count {
                fields.push(("points", points.as_str()));
            }
            ("circle_grid", fields)
        }
        ShapeInput::Square {
            side_length,
            height,
            spacing,
        } => (
            "square_grid",
            vec![
                ("side", side_length.as_str()),
                ("height", height.as_str()),
                ("spacing", spacing.as_str()),
            ],
        ),
        ShapeInput::KochSnowflake {
            side_length,
            iteration_count,
        } => (
            "koch_grid",
            vec![
                ("side", side_length.as_str()),
                ("iterations", iteration_count.as_str()),
            ],
        ),
    };

    let mut name = format!(
        "{}_surface_{}x{}",
        prefix,
        clean(surface_width),
        clean(surface_height)
    );
    for (label, value) in fields {
        name.push('_');
        name.push_str(label);
        name.push('_');
        name.push_str(&clean(value));
    }
    name.push_str(".stl");
    name
}

/// Keep a field safe to embed in a file name
fn clean(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' => '-',
            c => c,
        })
        .collect()
}
