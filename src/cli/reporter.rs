// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::kernel::GenerationReport;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a finished generation
    pub fn report_generation(shape: &str, report: &GenerationReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {}",
            "Generated:".bold(),
            report.path.display().to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
        println!("  {} {}", "Shape:".bright_black(), shape.cyan());
        println!(
            "  {} {} of {}",
            "Tiles:".bright_black(),
            report.placed_tiles.to_string().cyan(),
            report.total_tiles
        );
        if report.skipped_tiles > 0 {
            println!(
                "  {} {}",
                "Skipped:".bright_black(),
                report.skipped_tiles.to_string().red()
            );
        }
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            report.triangles.to_string().cyan()
        );
        if let Some(bounds) = report.bounds {
            let size = bounds.size();
            println!(
                "  {} {}",
                "Extent:".bright_black(),
                format!("{:.2} x {:.2} x {:.2} mm", size.x, size.y, size.z).cyan()
            );
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());

        if let Some(ref warning) = report.warning {
            Self::report_warning(warning);
        }
    }

    /// Report a run stopped before completion
    pub fn report_cancelled(completed: usize, total: usize) {
        println!(
            "\n{} {}",
            "⏹".yellow(),
            format!("Cancelled after {} of {} tiles, nothing written", completed, total).yellow()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
