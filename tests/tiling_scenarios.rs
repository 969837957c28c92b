// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end tiling scenarios

use anyhow::Result;
use approx::assert_relative_eq;
use cellgrid::assembly::{CancellationToken, Progress};
use cellgrid::{
    generate, GenerationOutcome, GenerationReport, GeneratorConfig, Shape, ShapeInput,
    SurfaceSpec, TilerError, TilingKernel, ValidationError,
};
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

fn completed(outcome: GenerationOutcome) -> Result<GenerationReport> {
    match outcome {
        GenerationOutcome::Completed(report) => Ok(report),
        other => anyhow::bail!("expected a completed run, got {:?}", other),
    }
}

fn read_back(path: &Path) -> Result<stl_io::IndexedMesh> {
    Ok(stl_io::read_stl(&mut File::open(path)?)?)
}

#[test]
fn test_honeycomb_ten_by_ten() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("honeycomb.stl");
    let input = ShapeInput::Hexagon {
        edge_size: "1.0".into(),
        height: "1.0".into(),
        spacing: "0.25".into(),
    };

    let report = completed(generate(&input, "10", "10", &path, GeneratorConfig::default())?)?;
    assert_eq!(report.total_tiles, 25);
    assert_eq!(report.placed_tiles, 25);
    assert_eq!(report.triangles, 25 * 20);
    assert_eq!(report.path, path);

    let mesh = read_back(&path)?;
    for v in &mesh.vertices {
        assert!(v[2] == 0.0 || v[2] == 1.0, "vertex off the cap planes: {}", v[2]);
    }

    Ok(())
}

#[test]
fn test_circle_grid() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("circles.stl");
    let input = ShapeInput::Circle {
        radius: "1".into(),
        height: "1".into(),
        spacing: "1".into(),
        point_count: Some("30".into()),
    };

    let report = completed(generate(&input, "10", "10", &path, GeneratorConfig::default())?)?;
    assert_eq!(report.placed_tiles, 9);
    assert_eq!(report.triangles, 1080);
    assert_eq!(read_back(&path)?.faces.len(), 1080);

    Ok(())
}

#[test]
fn test_circle_rim_radius() -> Result<()> {
    let config = GeneratorConfig::default();
    let shape = ShapeInput::Circle {
        radius: "2.5".into(),
        height: "1".into(),
        spacing: "1".into(),
        point_count: None,
    }
    .parse(&config)?;
    let mesh = shape.generate_mesh()?;

    // Centres sit on the axis, every other vertex on the rim
    let mut rim = 0;
    for v in &mesh.vertices {
        let r = (v.x * v.x + v.y * v.y).sqrt();
        if r > 1e-12 {
            assert_relative_eq!(r, 2.5, epsilon = 1e-9);
            rim += 1;
        }
    }
    assert_eq!(rim, 60);
    assert_eq!(mesh.triangle_count(), 120);

    Ok(())
}

#[test]
fn test_flat_square_panels() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("squares.stl");
    let input = ShapeInput::Square {
        side_length: "1.0".into(),
        height: "1.0".into(),
        spacing: "0.25".into(),
    };

    let report = completed(generate(&input, "10", "10", &path, GeneratorConfig::default())?)?;
    assert_eq!(report.placed_tiles, 64);
    assert_eq!(report.triangles, 128);

    let mesh = read_back(&path)?;
    assert!(mesh.vertices.iter().all(|v| v[2] == 0.0));

    Ok(())
}

#[test]
fn test_zero_width_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("never.stl");
    let input = ShapeInput::Hexagon {
        edge_size: "1.0".into(),
        height: "1.0".into(),
        spacing: "0.25".into(),
    };

    let err = generate(&input, "0", "10", &path, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        TilerError::Validation(ValidationError::NotPositive {
            field: "surface_width_mm",
            ..
        })
    ));
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_cancel_before_first_batch() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cancelled.stl");
    let kernel = TilingKernel::new(GeneratorConfig::default())?;
    let shape = ShapeInput::Square {
        side_length: "1".into(),
        height: "1".into(),
        spacing: "0.25".into(),
    }
    .parse(kernel.config())?;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut updates = 0;
    let mut sink = |_: Progress| updates += 1;
    let outcome = kernel.generate(
        &shape,
        &SurfaceSpec::new(10.0, 10.0)?,
        &path,
        &mut sink,
        &cancel,
    )?;

    assert_eq!(
        outcome,
        GenerationOutcome::Cancelled {
            completed_tiles: 0,
            total_tiles: 64
        }
    );
    assert_eq!(updates, 0);
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_progress_reaches_one_hundred() -> Result<()> {
    let dir = tempdir()?;
    let kernel = TilingKernel::new(GeneratorConfig {
        batch_size: 10,
        ..GeneratorConfig::default()
    })?;
    let shape: Shape = ShapeInput::Hexagon {
        edge_size: "1.0".into(),
        height: "1.0".into(),
        spacing: "0.25".into(),
    }
    .parse(kernel.config())?;

    let mut seen = Vec::new();
    let mut sink = |p: Progress| seen.push(p.percent());
    kernel.generate(
        &shape,
        &SurfaceSpec::new(10.0, 10.0)?,
        dir.path().join("progress.stl"),
        &mut sink,
        &CancellationToken::new(),
    )?;

    assert_eq!(seen, vec![40.0, 80.0, 100.0]);

    Ok(())
}

#[test]
fn test_overwrite_follows_config() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("grid.stl");
    let input = ShapeInput::KochSnowflake {
        side_length: "1".into(),
        iteration_count: "1".into(),
    };

    generate(&input, "10", "10", &path, GeneratorConfig::default())?;
    let second = generate(&input, "10", "10", &path, GeneratorConfig::default());
    assert!(matches!(second, Err(TilerError::Export(_))));

    let config = GeneratorConfig {
        overwrite: true,
        ..GeneratorConfig::default()
    };
    completed(generate(&input, "10", "10", &path, config)?)?;

    Ok(())
}

#[test]
fn test_deep_koch_is_rejected_not_built() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("deep.stl");
    let input = ShapeInput::KochSnowflake {
        side_length: "1".into(),
        iteration_count: "33".into(),
    };
    let config = GeneratorConfig {
        max_koch_iterations: 40,
        ..GeneratorConfig::default()
    };

    let err = generate(&input, "10", "10", &path, config).unwrap_err();
    assert!(matches!(
        err,
        TilerError::Validation(ValidationError::TooManyIterations { count: 33, max: 12 })
    ));
    assert!(!path.exists());

    // The kernel refuses the uncapped config outright
    let config = GeneratorConfig {
        max_koch_iterations: 40,
        ..GeneratorConfig::default()
    };
    assert!(matches!(TilingKernel::new(config), Err(TilerError::Config(_))));

    Ok(())
}
