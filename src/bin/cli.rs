// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cellgrid CLI

use anyhow::{Context, Result};
use cellgrid::assembly::{AssemblyOutcome, CancellationToken};
use cellgrid::cli::{descriptive_file_name, BarProgress, Reporter};
use cellgrid::{GeneratorConfig, PreviewBuffers, ShapeInput, SurfaceSpec, TilingKernel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellgrid")]
#[command(about = "Tile procedural unit cells across a surface and export STL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output STL file
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Name the output after the parameters (ignored when --output is given)
    #[arg(long, global = true)]
    descriptive_name: bool,

    /// Replace an existing output file
    #[arg(short, long, global = true)]
    force: bool,

    /// Generator config file (defaults to ./cellgrid.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Also write flattened preview buffers as JSON
    #[arg(long, value_name = "FILE", global = true)]
    preview_json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SurfaceArgs {
    /// Surface width in mm
    #[arg(long, default_value = "10.0", global = true)]
    width: String,

    /// Surface height in mm
    #[arg(long, default_value = "10.0", global = true)]
    height: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Honeycomb of hexagonal prisms
    Hexagon {
        /// Hexagon edge length in mm
        #[arg(long, default_value = "1.0")]
        size: String,

        /// Prism height in mm
        #[arg(long = "cell-height", default_value = "1.0")]
        cell_height: String,

        /// Gap between cells in mm
        #[arg(long, default_value = "0.25")]
        spacing: String,
    },

    /// Rectangular grid of cylinders
    Circle {
        /// Circle radius in mm
        #[arg(long, default_value = "1.0")]
        radius: String,

        /// Cylinder height in mm
        #[arg(long = "cell-height", default_value = "1.0")]
        cell_height: String,

        /// Gap between cells in mm
        #[arg(long, default_value = "1.0")]
        spacing: String,

        /// Boundary points per circle
        #[arg(long)]
        points: Option<String>,
    },

    /// Rectangular grid of square panels
    Square {
        /// Side length in mm
        #[arg(long, default_value = "1.0")]
        side: String,

        /// Cell height in mm (used when panels are extruded)
        #[arg(long = "cell-height", default_value = "1.0")]
        cell_height: String,

        /// Gap between cells in mm
        #[arg(long, default_value = "0.25")]
        spacing: String,
    },

    /// Koch snowflakes, one per region
    Koch {
        /// Side length of the starting triangle in mm
        #[arg(long, default_value = "1.0")]
        side: String,

        /// Subdivision iterations
        #[arg(long, default_value = "3")]
        iterations: String,
    },
}

impl Commands {
    fn to_input(&self) -> ShapeInput {
        match self {
            Commands::Hexagon {
                size,
                cell_height,
                spacing,
            } => ShapeInput::Hexagon {
                edge_size: size.clone(),
                height: cell_height.clone(),
                spacing: spacing.clone(),
            },
            Commands::Circle {
                radius,
                cell_height,
                spacing,
                points,
            } => ShapeInput::Circle {
                radius: radius.clone(),
                height: cell_height.clone(),
                spacing: spacing.clone(),
                point_count: points.clone(),
            },
            Commands::Square {
                side,
                cell_height,
                spacing,
            } => ShapeInput::Square {
                side_length: side.clone(),
                height: cell_height.clone(),
                spacing: spacing.clone(),
            },
            Commands::Koch { side, iterations } => ShapeInput::KochSnowflake {
                side_length: side.clone(),
                iteration_count: iterations.clone(),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = GeneratorConfig::from_file(path)?;
            config.apply_env_overrides()?;
            config
        }
        None => GeneratorConfig::load()?,
    };
    if cli.force {
        config.overwrite = true;
    }

    let input = cli.command.to_input();
    let shape = input.parse(&config)?;
    let surface = SurfaceSpec::parse(&cli.surface.width, &cli.surface.height)?;

    let output = match &cli.output {
        Some(path) => path.clone(),
        None if cli.descriptive_name => PathBuf::from(descriptive_file_name(
            &input,
            &cli.surface.width,
            &cli.surface.height,
        )),
        None => PathBuf::from(format!("{}_grid.stl", shape.name())),
    };

    let kernel = TilingKernel::new(config)?;
    if cli.verbose {
        Reporter::report_info(&format!(
            "Tiling {} cells on {} worker(s)",
            shape.name(),
            kernel.config().worker_count()
        ));
    }

    let start = Instant::now();
    let mut progress = BarProgress::new();
    let outcome = kernel.build(&shape, &surface, &mut progress, &CancellationToken::new())?;
    progress.finish();

    let tiled = match outcome {
        AssemblyOutcome::Completed(tiled) => tiled,
        AssemblyOutcome::Cancelled {
            completed_tiles,
            total_tiles,
        } => {
            Reporter::report_cancelled(completed_tiles, total_tiles);
            return Ok(());
        }
    };

    let report = kernel.export(&tiled, &output)?;

    if let Some(preview) = &cli.preview_json {
        PreviewBuffers::from_mesh(&tiled.mesh)?
            .write_json(preview)
            .with_context(|| format!("Failed to write preview for {}", output.display()))?;
        if cli.verbose {
            Reporter::success(&format!("Preview buffers written to {}", preview.display()));
        }
    }

    Reporter::report_generation(shape.name(), &report, start.elapsed());
    Ok(())
}
