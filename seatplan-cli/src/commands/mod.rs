//! CLI command implementations.

pub mod init;
pub mod reserve;

pub use init::init_project;
pub use reserve::{reserve_seats, ReserveOptions};

use anyhow::{Context, Result};
use seatplan_core::Config;
use std::path::Path;

/// Config file picked up from the working directory when --config is absent
pub const DEFAULT_CONFIG_FILE: &str = "seatplan.yml";

/// Load the explicit config file, or the default one if it exists
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::from_file(path).with_context(|| format!("Failed to load config {:?}", path))
        }
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load config {:?}", DEFAULT_CONFIG_FILE)),
    }
}
