// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Generator configuration system

use crate::error::TilerError;
use crate::geometry::koch;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "cellgrid.toml";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Worker threads for tile generation (auto-detect when unset)
    pub workers: Option<usize>,
    /// Tiles per batch between progress reports
    pub batch_size: usize,
    /// Skipped/total ratio above which the run is flagged with a warning
    pub skip_warning_ratio: f64,
    /// Upper bound on Koch snowflake iterations
    pub max_koch_iterations: u32,
    /// Boundary points for circles when none are given
    pub default_circle_points: u32,
    /// Extrude square cells into boxes instead of flat panels
    pub extrude_square_panels: bool,
    /// Replace an existing output file
    pub overwrite: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            workers: None,
            batch_size: 100,
            skip_warning_ratio: 0.0,
            max_koch_iterations: 6,
            default_circle_points: 30,
            extrude_square_panels: false,
            overwrite: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: GeneratorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `CELLGRID_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(workers) = std::env::var("CELLGRID_WORKERS") {
            self.workers = Some(
                workers
                    .parse()
                    .with_context(|| format!("CELLGRID_WORKERS is not a count: {}", workers))?,
            );
        }

        if let Ok(batch) = std::env::var("CELLGRID_BATCH_SIZE") {
            self.batch_size = batch
                .parse()
                .with_context(|| format!("CELLGRID_BATCH_SIZE is not a count: {}", batch))?;
        }

        if let Ok(overwrite) = std::env::var("CELLGRID_OVERWRITE") {
            self.overwrite = parse_flag(&overwrite)
                .with_context(|| format!("CELLGRID_OVERWRITE is not a flag: {}", overwrite))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject settings the assembler cannot run with
    pub fn validate(&self) -> std::result::Result<(), TilerError> {
        if self.batch_size == 0 {
            return Err(TilerError::Config("batch_size must be at least 1".into()));
        }
        if self.workers == Some(0) {
            return Err(TilerError::Config("workers must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.skip_warning_ratio) {
            return Err(TilerError::Config(format!(
                "skip_warning_ratio must be within [0, 1], got {}",
                self.skip_warning_ratio
            )));
        }
        if self.max_koch_iterations > koch::MAX_ITERATIONS {
            return Err(TilerError::Config(format!(
                "max_koch_iterations must be at most {}, got {}",
                koch::MAX_ITERATIONS,
                self.max_koch_iterations
            )));
        }
        if self.default_circle_points < 3 {
            return Err(TilerError::Config(
                "default_circle_points must be at least 3".into(),
            ));
        }
        Ok(())
    }

    /// Worker pool size: the configured value, or half the available cores
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            let cores = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            (cores / 2).max(1)
        })
    }
}

/// Parse an on/off environment value
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true/false, 1/0, yes/no or on/off, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.worker_count() >= 1);
        assert!(!config.extrude_square_panels);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GeneratorConfig = toml::from_str("batch_size = 25\nworkers = 3").unwrap();
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.default_circle_points, 30);
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let file = NamedTempFile::with_suffix(".toml")?;
        let config = GeneratorConfig {
            extrude_square_panels: true,
            max_koch_iterations: 4,
            ..GeneratorConfig::default()
        };

        config.save(file.path())?;
        assert_eq!(GeneratorConfig::from_file(file.path())?, config);
        Ok(())
    }

    #[test]
    fn test_rejects_zero_workers_and_bad_ratio() {
        let zero_workers = GeneratorConfig {
            workers: Some(0),
            ..GeneratorConfig::default()
        };
        assert!(matches!(zero_workers.validate(), Err(TilerError::Config(_))));

        for ratio in [-0.1, 1.5, f64::NAN] {
            let config = GeneratorConfig {
                skip_warning_ratio: ratio,
                ..GeneratorConfig::default()
            };
            assert!(matches!(config.validate(), Err(TilerError::Config(_))), "{}", ratio);
        }
    }

    #[test]
    fn test_koch_iteration_cap() {
        let at_cap = GeneratorConfig {
            max_koch_iterations: koch::MAX_ITERATIONS,
            ..GeneratorConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        let config: GeneratorConfig = toml::from_str("max_koch_iterations = 40").unwrap();
        assert!(matches!(config.validate(), Err(TilerError::Config(_))));
    }

    #[test]
    fn test_parse_flag() {
        for on in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(on).unwrap(), "{}", on);
        }
        for off in ["0", "false", "No", "off"] {
            assert!(!parse_flag(off).unwrap(), "{}", off);
        }
        assert!(parse_flag("maybe").is_err());
        assert!(parse_flag("").is_err());
    }

    #[test]
    fn test_rejects_zero_batch() {
        let config = GeneratorConfig {
            batch_size: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(TilerError::Config(_))));
    }
}
