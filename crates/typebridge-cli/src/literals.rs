//! `typebridge literals`

use crate::project;
use anyhow::{Context, Result};
use std::path::PathBuf;
use typebridge::{Extraction, TypeKey};

pub fn run(key: &str, config: Option<PathBuf>) -> Result<()> {
    let pipeline = project::load(config)?;
    let extraction = pipeline
        .literals(&TypeKey::new(key))
        .with_context(|| format!("Failed to recover literals of {key}"))?;

    print!("{}", format_extraction(key, &extraction));
    Ok(())
}

/// Human-readable listing of an extraction.
pub fn format_extraction(key: &str, extraction: &Extraction) -> String {
    let mut out = String::new();

    if extraction.literals.is_empty() {
        out.push_str(&format!("{key}: no literals found, falls back to Schema.String\n"));
    } else {
        out.push_str(&format!("{key}: {} literal(s)\n", extraction.literals.len()));
        for literal in &extraction.literals {
            out.push_str(&format!("  {} = {:?}\n", literal.name, literal.value));
        }
    }

    if !extraction.skipped.is_empty() {
        out.push_str(&format!(
            "Skipped untyped constants: {}\n",
            extraction.skipped.join(", ")
        ));
    }

    out
}
