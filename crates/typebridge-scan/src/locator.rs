//! Package directory resolution

use crate::error::{ScanError, ScanResult};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Finds the directory holding a package's source files.
pub trait PackageLocator {
    fn locate(&self, package: &str) -> ScanResult<PathBuf>;
}

/// Looks a package up under a list of search roots (`<root>/<package path>`),
/// with explicit per-package overrides taking precedence.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLocator {
    roots: Vec<PathBuf>,
    overrides: IndexMap<String, PathBuf>,
}

impl SearchPathLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            overrides: IndexMap::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.overrides.insert(package.into(), dir.into());
        self
    }

    pub fn with_packages(mut self, packages: IndexMap<String, PathBuf>) -> Self {
        self.overrides.extend(packages);
        self
    }
}

impl PackageLocator for SearchPathLocator {
    fn locate(&self, package: &str) -> ScanResult<PathBuf> {
        let candidates: Vec<PathBuf> = match self.overrides.get(package) {
            Some(dir) => vec![dir.clone()],
            None => self.roots.iter().map(|root| root.join(package)).collect(),
        };

        match candidates.iter().find(|dir| dir.is_dir()) {
            Some(dir) => Ok(dir.clone()),
            None => Err(ScanError::PackageNotFound {
                package: package.to_string(),
                searched: candidates,
            }),
        }
    }
}

#[cfg(test)]
#[path = "locator/locator_tests.rs"]
mod locator_tests;
