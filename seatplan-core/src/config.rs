//! Configuration parsing and management.

use crate::allocator::{Allocator, ContinuationMode};
use crate::grid::{SeatGrid, DEFAULT_COLS, DEFAULT_ROWS, SAFETY_ROW_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error(
        "Invalid theater dimensions {rows}x{cols}: both must be at least 1 and the grid at most {MAX_GRID_CELLS} cells"
    )]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Upper bound on `rows * cols` accepted from a config file
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Main configuration struct matching the seatplan.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theater: TheaterConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub allocation: AllocationConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TheaterConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,

    #[serde(default = "default_cols")]
    pub cols: usize,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub dump_grid: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("Output.txt")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default)]
    pub continuation: ContinuationMode,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    ///
    /// Use [`Config::from_file`] when the path was supplied explicitly and a
    /// missing file is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rows = self.theater.rows;
        let cols = self.theater.cols;
        let cells = rows.checked_mul(cols).filter(|n| *n <= MAX_GRID_CELLS);
        if rows == 0 || cols == 0 || cells.is_none() {
            return Err(ConfigError::InvalidDimensions {
                rows: self.theater.rows,
                cols: self.theater.cols,
            });
        }
        Ok(())
    }

    /// Fresh grid with the configured dimensions
    pub fn build_grid(&self) -> SeatGrid {
        SeatGrid::new(self.theater.rows, self.theater.cols, SAFETY_ROW_WIDTH)
    }

    /// Fresh allocator over a fresh grid
    pub fn build_allocator(&self) -> Allocator {
        Allocator::new(self.build_grid()).with_continuation(self.allocation.continuation)
    }

    /// Get the output file path, resolved relative to config file
    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.output.path)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TheaterConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            dump_grid: default_true(),
        }
    }
}
