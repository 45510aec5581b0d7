//! `typebridge check`

use crate::project;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(config: Option<PathBuf>) -> Result<()> {
    let path = project::config_path(config);
    println!("Checking configuration: {}", path.display());

    let pipeline = project::load(Some(path))?;
    let report = pipeline.check().context("Root validation failed")?;

    println!("✓ Snapshot types: {}", report.types);
    println!("✓ Roots: {}", report.roots);
    for key in &report.unused_renames {
        println!("! Rename entry matches no type: {key}");
    }
    println!("\nConfiguration is valid!");

    Ok(())
}
