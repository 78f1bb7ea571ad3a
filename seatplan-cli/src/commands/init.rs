//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../seatplan.yml.example");

/// Initialize a new seatplan project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    write_sample_requests(root)?;

    println!("✓ seatplan initialized in {}", root.display());
    println!("  - Edit seatplan.yml to change the theater size or output file");
    println!("  - Run `seatplan reserve requests.txt` to allocate seats");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join(super::DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        println!(
            "{} already exists at {}",
            super::DEFAULT_CONFIG_FILE,
            config_path.display()
        );
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {}", config_path.display());
    Ok(())
}

fn write_sample_requests(root: &Path) -> Result<()> {
    let sample = root.join("requests.txt");
    if sample.exists() {
        return Ok(());
    }

    fs::write(&sample, "R001 5\nR002 3\nR003 1\nR004 1\n")
        .with_context(|| format!("Failed to write {:?}", sample))?;
    println!("Created {}", sample.display());
    Ok(())
}
