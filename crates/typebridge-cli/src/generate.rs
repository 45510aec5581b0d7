//! `typebridge generate`

use crate::project;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(config: Option<PathBuf>, output: Option<PathBuf>, no_docs: bool) -> Result<()> {
    let mut pipeline = project::load(config)?;
    if let Some(output) = output {
        pipeline = pipeline.with_output(output);
    }
    if no_docs {
        pipeline = pipeline.without_docs();
    }

    let report = pipeline.generate().context("Generation failed")?;

    println!("✓ Types: {}", report.nodes);
    println!(
        "✓ Files written: {} to {}",
        report.written.len(),
        report.output_dir.display()
    );
    if report.removed > 0 {
        println!("✓ Stale files removed: {}", report.removed);
    }

    Ok(())
}
