//! Generation pipeline: configuration to output files.
//!
//! [`Pipeline`] owns everything one run needs (validated configuration, the
//! introspection snapshot and the resolution tables) and wires the literal
//! extractor, the reflector and the emitter together.

use crate::error::{PipelineError, PipelineResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use typebridge_core::{GeneratorConfig, ResolutionTables, SourceType, TypeKey, TypeUniverse};
use typebridge_emit::{
    CacheDirFetcher, DocLinkResolver, Emitter, HttpFetcher, PageResolver, WriteSummary,
};
use typebridge_reflect::{Reflector, Registry};
use typebridge_scan::{Extraction, LiteralExtractor, SearchPathLocator};

/// Outcome of [`Pipeline::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub roots: usize,
    pub types: usize,
    /// Rename entries whose key is not in the snapshot.
    pub unused_renames: Vec<String>,
}

/// Outcome of [`Pipeline::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub nodes: usize,
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub removed: usize,
}

/// One configured generation run.
pub struct Pipeline {
    config: GeneratorConfig,
    universe: TypeUniverse,
    tables: ResolutionTables,
}

impl Pipeline {
    /// Load `typebridge.toml` and the snapshot it names.
    pub fn load(config_path: impl AsRef<Path>) -> PipelineResult<Self> {
        let config = GeneratorConfig::from_file(config_path)?;
        let snapshot = config.snapshot_path();
        let universe = TypeUniverse::from_file(&snapshot)?;
        info!(snapshot = %snapshot.display(), types = universe.len(), "Loaded snapshot");
        Self::new(config, universe)
    }

    /// Validate `config` and build the lookup tables.
    pub fn new(config: GeneratorConfig, universe: TypeUniverse) -> PipelineResult<Self> {
        config.validate()?;
        let tables = config.tables()?;
        Ok(Self {
            config,
            universe,
            tables,
        })
    }

    /// Write into `dir` instead of the configured output directory.
    pub fn with_output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.generator.output = dir.into();
        self
    }

    /// Skip documentation links.
    pub fn without_docs(mut self) -> Self {
        self.config.docs.enabled = false;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn universe(&self) -> &TypeUniverse {
        &self.universe
    }

    pub fn tables(&self) -> &ResolutionTables {
        &self.tables
    }

    /// Verify every root names a struct in the snapshot.
    pub fn check(&self) -> PipelineResult<CheckReport> {
        let roots = self.config.root_keys();

        for key in &roots {
            if let Some(replacement) = self.tables.replacement(key) {
                return Err(PipelineError::InvalidRoot {
                    key: key.clone(),
                    reason: format!("replaced by {}, nothing to generate", replacement.schema),
                });
            }

            let named = self.universe.lookup(key)?;
            let shape = self.universe.underlying(&named.underlying)?;
            if !matches!(shape, SourceType::Struct { .. }) {
                return Err(PipelineError::InvalidRoot {
                    key: key.clone(),
                    reason: format!("underlying kind is {}, expected struct", shape.kind_name()),
                });
            }
        }

        let unused_renames: Vec<String> = self
            .tables
            .renames()
            .filter(|(key, _)| !self.universe.contains(key))
            .map(|(key, _)| key.to_string())
            .collect();
        for key in &unused_renames {
            warn!(key = %key, "Rename entry does not match any type in the snapshot");
        }

        Ok(CheckReport {
            roots: roots.len(),
            types: self.universe.len(),
            unused_renames,
        })
    }

    /// Literal extractor over the configured source roots.
    pub fn extractor(&self) -> LiteralExtractor<SearchPathLocator> {
        let locator = SearchPathLocator::new(self.config.source_roots())
            .with_packages(self.config.package_dirs());
        LiteralExtractor::new(locator)
    }

    /// Recovered constant set of a named string type.
    pub fn literals(&self, key: &TypeKey) -> PipelineResult<Extraction> {
        let named = self.universe.lookup(key)?;
        Ok(self.extractor().extract(&named.package, named.package_name(), &named.name)?)
    }

    /// Reflect `roots` and everything reachable from them.
    pub fn reflect(&self, roots: &[TypeKey]) -> PipelineResult<Registry> {
        let mut extractor = self.extractor();
        let mut reflector = Reflector::new(&self.universe, &self.tables, &mut extractor)
            .with_embed(self.config.generator.embed);

        reflector.reflect_all(roots)?;
        Ok(reflector.finish()?)
    }

    /// Render the module of one type without writing anything. Documentation
    /// links are omitted.
    pub fn inspect(&self, key: &TypeKey) -> PipelineResult<String> {
        let registry = self.reflect(std::slice::from_ref(key))?;
        let node = registry
            .get(key)
            .ok_or_else(|| PipelineError::InvalidRoot {
                key: key.clone(),
                reason: "type is replaced and has no generated class".to_string(),
            })?;

        Ok(self.emitter().render_node(node)?.contents)
    }

    /// Run the whole pipeline with the configured documentation source.
    pub fn generate(&self) -> PipelineResult<GenerateReport> {
        if !self.config.docs.enabled {
            return self.generate_with(None);
        }

        match self.config.docs_cache_dir() {
            Some(dir) => {
                let mut docs = PageResolver::new(CacheDirFetcher::new(dir), self.config.docs.clone());
                self.generate_with(Some(&mut docs))
            }
            None => {
                let mut docs = PageResolver::new(HttpFetcher::new(), self.config.docs.clone());
                self.generate_with(Some(&mut docs))
            }
        }
    }

    /// Run the whole pipeline with an explicit documentation resolver.
    pub fn generate_with(
        &self,
        docs: Option<&mut dyn DocLinkResolver>,
    ) -> PipelineResult<GenerateReport> {
        self.check()?;
        let registry = self.reflect(&self.config.root_keys())?;

        let mut emitter = self.emitter();
        if let Some(docs) = docs {
            emitter = emitter.with_docs(docs);
        }

        let output_dir = self.config.output_dir();
        let WriteSummary { written, removed } = emitter.emit(&registry, &output_dir)?;

        info!(
            nodes = registry.len(),
            written = written.len(),
            dir = %output_dir.display(),
            "Generation complete"
        );
        Ok(GenerateReport {
            nodes: registry.len(),
            output_dir,
            written,
            removed,
        })
    }

    fn emitter<'a>(&self) -> Emitter<'a> {
        Emitter::new(self.config.generator.extension.as_str())
            .with_namespaces(self.config.namespaces.clone())
    }
}

#[cfg(test)]
#[path = "pipeline/pipeline_tests.rs"]
mod pipeline_tests;
