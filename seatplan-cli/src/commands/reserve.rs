//! Reserve command: run a request file through the allocator.

use super::load_config;
use anyhow::{Context, Result};
use seatplan_core::{BatchReport, BatchRunner};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ReserveOptions {
    pub output: Option<PathBuf>,
    pub json: bool,
    pub no_dump: bool,
}

#[derive(Serialize)]
struct ReserveReport<'a> {
    output: &'a Path,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// Allocate seats for each line of `input`, write the output file, then
/// print the final grid and the output location.
pub fn reserve_seats(config_path: Option<&Path>, input: &Path, opts: ReserveOptions) -> Result<()> {
    let config = load_config(config_path)?;
    let requests = fs::read_to_string(input)
        .with_context(|| format!("Failed to read request file {:?}", input))?;

    let mut runner = BatchRunner::new(config.build_allocator());
    runner
        .process_all(&requests)
        .context("Seat allocation aborted")?;

    let output_path = opts.output.unwrap_or_else(|| config.output_path());
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&output_path, runner.output())
        .with_context(|| format!("Failed to write {:?}", output_path))?;
    let output_path = fs::canonicalize(&output_path).unwrap_or(output_path);

    tracing::debug!("Wrote results to {:?}", output_path);

    let grid_dump = runner.allocator().grid().to_string();
    let report = runner.finish();

    if opts.json {
        let payload = serde_json::to_string_pretty(&ReserveReport {
            output: &output_path,
            report: &report,
        })?;
        println!("{}", payload);
        return Ok(());
    }

    if config.output.dump_grid && !opts.no_dump {
        println!("{}", grid_dump);
    }
    println!("{}", output_path.display());

    Ok(())
}
