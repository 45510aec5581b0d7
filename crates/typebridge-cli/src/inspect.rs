//! `typebridge inspect`

use crate::project;
use anyhow::{Context, Result};
use std::path::PathBuf;
use typebridge::TypeKey;

pub fn run(key: &str, config: Option<PathBuf>) -> Result<()> {
    let pipeline = project::load(config)?;
    let code = pipeline
        .inspect(&TypeKey::new(key))
        .with_context(|| format!("Failed to inspect {key}"))?;

    print!("{code}");
    Ok(())
}
