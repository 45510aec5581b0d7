//! Literal extraction for named string types.
//!
//! The declaring package is located, every non-test source file whose
//! package clause matches the declaring package's name is scanned (or, when
//! none does, the directory's one package), and constants explicitly typed
//! with the target name and initialized with a string literal are collected
//! in file and declaration order.

use crate::decl::{SourceFile, scan_file};
use crate::error::{ScanError, ScanResult};
use crate::lexer::tokenize;
use crate::locator::{PackageLocator, SearchPathLocator};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use typebridge_core::{BoxError, Literal, LiteralSource};

/// Result of scanning one named string type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Typed string constants, in order.
    pub literals: Vec<Literal>,

    /// String constants without an explicit type that share a declaration
    /// group with typed ones. They inherit nothing and are not collected.
    pub skipped: Vec<String>,
}

/// Scans package sources for the constant set of named string types.
///
/// Parsed packages are cached for the extractor's lifetime.
pub struct LiteralExtractor<L = SearchPathLocator> {
    locator: L,
    packages: HashMap<String, Vec<SourceFile>>,
}

impl<L: PackageLocator> LiteralExtractor<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            packages: HashMap::new(),
        }
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Collect the constants of `type_name` declared in `package`, whose
    /// files carry the package clause `package_name`.
    pub fn extract(
        &mut self,
        package: &str,
        package_name: &str,
        type_name: &str,
    ) -> ScanResult<Extraction> {
        if !self.packages.contains_key(package) {
            let files = self.parse_package(package, package_name)?;
            self.packages.insert(package.to_string(), files);
        }
        let files = self
            .packages
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut extraction = Extraction::default();
        for block in files.iter().flat_map(|file| &file.blocks) {
            let mut typed_in_block = false;
            let mut untyped_strings = Vec::new();

            for spec in &block.specs {
                if spec.type_name.as_deref() == Some(type_name) {
                    typed_in_block = true;
                    extraction.literals.extend(
                        spec.string_values()
                            .map(|(name, value)| Literal::new(name, value)),
                    );
                } else if !spec.typed {
                    untyped_strings.extend(spec.string_values().map(|(name, _)| name.to_string()));
                }
            }

            if typed_in_block {
                extraction.skipped.extend(untyped_strings);
            }
        }

        debug!(
            package,
            type_name,
            literals = extraction.literals.len(),
            "Extracted literals"
        );
        Ok(extraction)
    }

    fn parse_package(&self, package: &str, package_name: &str) -> ScanResult<Vec<SourceFile>> {
        let dir = self.locator.locate(package)?;

        let mut parsed = Vec::new();
        for path in source_files(&dir)? {
            let content =
                std::fs::read_to_string(&path).map_err(|e| ScanError::io(&path, e))?;
            let tokens = tokenize(&content).map_err(|e| ScanError::Syntax {
                path: path.clone(),
                line: e.line,
                message: e.message,
            })?;
            parsed.push((path, scan_file(&tokens)));
        }

        let clause = package_clause(&parsed, package_name);
        if clause != package_name {
            debug!(
                package,
                expected = package_name,
                clause,
                "Using the directory's own package clause"
            );
        }
        let clause = clause.to_string();

        let mut files = Vec::new();
        for (path, file) in parsed {
            if file.package == clause {
                files.push(file);
            } else {
                debug!(path = %path.display(), package = %file.package, "Skipping file of another package");
            }
        }

        debug!(package, dir = %dir.display(), files = files.len(), "Parsed package sources");
        Ok(files)
    }
}

/// Package clause to scan: `expected` when any file declares it, otherwise the
/// clause shared by the directory's remaining files. External test packages
/// (`name_test`) are never chosen.
fn package_clause<'a>(parsed: &'a [(PathBuf, SourceFile)], expected: &'a str) -> &'a str {
    let mut clauses = parsed
        .iter()
        .map(|(_, file)| file.package.as_str())
        .filter(|clause| !clause.is_empty() && !clause.ends_with("_test"));

    if parsed.iter().any(|(_, file)| file.package == expected) {
        return expected;
    }
    match clauses.next() {
        Some(first) if clauses.all(|clause| clause == first) => first,
        _ => expected,
    }
}

impl<L: PackageLocator> LiteralSource for LiteralExtractor<L> {
    fn extract_literals(
        &mut self,
        package: &str,
        package_name: &str,
        type_name: &str,
    ) -> Result<Vec<Literal>, BoxError> {
        let extraction = self.extract(package, package_name, type_name)?;

        if !extraction.skipped.is_empty() {
            warn!(
                package,
                type_name,
                skipped = %extraction.skipped.join(", "),
                "Untyped string constants in a typed group were not collected"
            );
        }

        Ok(extraction.literals)
    }
}

/// Non-test `.go` files of a directory, sorted by file name.
fn source_files(dir: &Path) -> ScanResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ScanError::io(dir, e))?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.ends_with(".go") && !name.ends_with("_test.go") && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
