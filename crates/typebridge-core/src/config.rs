//! Generator configuration (`typebridge.toml`)

use crate::error::{CoreError, CoreResult};
use crate::source::{PrimitiveKind, TypeKey};
use crate::syntax::is_identifier;
use crate::tables::{EmbedStrategy, PrimitiveMapping, Replacement, ResolutionTables};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "typebridge.toml";

/// typebridge.toml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub generator: GeneratorSection,

    /// Disambiguation table: source type key -> target name.
    #[serde(default)]
    pub rename: IndexMap<String, String>,

    /// Skip/replace table: source type key -> hand-maintained schema.
    #[serde(default)]
    pub replace: IndexMap<String, Replacement>,

    /// Overrides of the default primitive table, keyed by kind name.
    #[serde(default)]
    pub primitives: IndexMap<String, PrimitiveMapping>,

    /// Helper namespaces imported when a rendered file mentions them.
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<NamespaceImport>,

    #[serde(default)]
    pub sources: SourcesSection,

    #[serde(default)]
    pub docs: DocsSection,

    /// Directory relative paths resolve against.
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Introspection snapshot (JSON).
    pub snapshot: PathBuf,

    /// Output directory for generated files.
    pub output: PathBuf,

    /// Extension of generated files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub embed: EmbedStrategy,

    /// Root type keys, reflected in order.
    #[serde(default)]
    pub roots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceImport {
    pub name: String,
    pub from: String,
}

impl NamespaceImport {
    pub fn new(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
        }
    }
}

/// Where declaring packages' source files live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesSection {
    /// Search roots; a package `a/b` is looked up as `<root>/a/b`.
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Explicit package path -> directory overrides.
    #[serde(default)]
    pub packages: IndexMap<String, PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Offline page cache directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Explicit package path -> page URL overrides.
    #[serde(default)]
    pub pages: IndexMap<String, String>,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            cache_dir: None,
            pages: IndexMap::new(),
        }
    }
}

impl DocsSection {
    /// Documentation page of a package.
    pub fn page_url(&self, package: &str) -> String {
        match self.pages.get(package) {
            Some(url) => url.clone(),
            None => format!("{}/{package}", self.base_url.trim_end_matches('/')),
        }
    }
}

fn default_namespaces() -> Vec<NamespaceImport> {
    vec![NamespaceImport::new("MobySchemas", "../schemas/index.js")]
}

fn default_extension() -> String {
    "ts".to_string()
}

fn default_base_url() -> String {
    "https://pkg.go.dev".to_string()
}

fn default_true() -> bool {
    true
}

impl GeneratorConfig {
    /// Load configuration from a file; relative paths resolve against the
    /// file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut config = Self::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from a string; relative paths resolve against the
    /// current directory.
    pub fn from_str(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a configured path against the configuration directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.resolve(&self.generator.snapshot)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.generator.output)
    }

    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.sources
            .roots
            .iter()
            .map(|root| self.resolve(root))
            .collect()
    }

    pub fn package_dirs(&self) -> IndexMap<String, PathBuf> {
        self.sources
            .packages
            .iter()
            .map(|(package, dir)| (package.clone(), self.resolve(dir)))
            .collect()
    }

    pub fn docs_cache_dir(&self) -> Option<PathBuf> {
        self.docs.cache_dir.as_deref().map(|dir| self.resolve(dir))
    }

    pub fn root_keys(&self) -> Vec<TypeKey> {
        self.generator
            .roots
            .iter()
            .map(|root| TypeKey::new(root.as_str()))
            .collect()
    }

    /// Build the lookup tables the reflector consults.
    pub fn tables(&self) -> CoreResult<ResolutionTables> {
        let mut tables = ResolutionTables::new();

        for (key, target) in &self.rename {
            tables = tables.with_rename(key.as_str(), target.as_str());
        }
        for (key, replacement) in &self.replace {
            tables = tables.with_replacement(key.as_str(), replacement.schema.as_str());
        }
        for (kind, mapping) in &self.primitives {
            let kind = PrimitiveKind::parse(kind).ok_or_else(|| {
                CoreError::InvalidConfig(format!("unknown primitive kind `{kind}`"))
            })?;
            tables = tables.with_primitive(kind, mapping.clone());
        }

        Ok(tables)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |message: String| Err(CoreError::InvalidConfig(message));

        if self.generator.roots.is_empty() {
            return invalid("at least one root type is required".to_string());
        }
        if let Some(root) = self.generator.roots.iter().find(|root| root.trim().is_empty()) {
            return invalid(format!("root type key cannot be empty: {root:?}"));
        }

        let extension = &self.generator.extension;
        if extension.is_empty() || extension.starts_with('.') {
            return invalid(format!(
                "extension must be non-empty and given without a dot, got {extension:?}"
            ));
        }

        let mut targets = HashSet::new();
        for (key, target) in &self.rename {
            if target.is_empty() {
                return invalid(format!("rename target for `{key}` cannot be empty"));
            }
            if !is_identifier(target) {
                return invalid(format!(
                    "rename target `{target}` for `{key}` is not a valid identifier"
                ));
            }
            if !targets.insert(target.as_str()) {
                return invalid(format!("rename target `{target}` is used more than once"));
            }
        }

        for (key, replacement) in &self.replace {
            if replacement.schema.trim().is_empty() {
                return invalid(format!("replacement schema for `{key}` cannot be empty"));
            }
        }

        for namespace in &self.namespaces {
            if !is_identifier(&namespace.name) {
                return invalid(format!(
                    "namespace `{}` is not a valid identifier",
                    namespace.name
                ));
            }
        }

        if self.docs.enabled && self.docs.base_url.is_empty() && self.docs.pages.is_empty() {
            return invalid("docs.base_url cannot be empty when docs are enabled".to_string());
        }

        self.tables().map(|_| ())
    }
}
