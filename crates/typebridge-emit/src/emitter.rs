//! Code emitter: registry to output files.
//!
//! Rendering and writing are separate steps. [`Emitter::render`] produces
//! every file in memory, resolving documentation links along the way, so a
//! fatal error leaves the output directory untouched. [`Emitter::emit`] then
//! hands the files to an [`OutputWriter`].

use crate::docs::DocLinkResolver;
use crate::error::{EmitError, EmitResult};
use crate::imports::module_extension;
use crate::render::{render_class, render_index};
use crate::writer::{OutputWriter, RenderedFile, WriteSummary};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};
use typebridge_core::{NamespaceImport, TypeNode};
use typebridge_reflect::Registry;

/// Renders and writes one generation run's output.
pub struct Emitter<'a> {
    extension: String,
    namespaces: Vec<NamespaceImport>,
    docs: Option<&'a mut dyn DocLinkResolver>,
}

impl<'a> Emitter<'a> {
    /// Emitter for files ending in `.<extension>`, without documentation
    /// links or helper namespaces.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            namespaces: Vec::new(),
            docs: None,
        }
    }

    pub fn with_namespaces(mut self, namespaces: Vec<NamespaceImport>) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn with_docs(mut self, docs: &'a mut dyn DocLinkResolver) -> Self {
        self.docs = Some(docs);
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Render one node's module.
    pub fn render_node(&mut self, node: &TypeNode) -> EmitResult<RenderedFile> {
        if !node.is_complete() {
            return Err(EmitError::IncompleteNode {
                key: node.source_key.clone(),
                state: node.state.to_string(),
            });
        }

        let documentation = match self.docs.as_deref_mut() {
            Some(docs) => Some(docs.resolve(node.package(), node.source_name())?),
            None => None,
        };

        let contents = render_class(
            node,
            documentation.as_deref(),
            &self.namespaces,
            module_extension(&self.extension),
        );
        debug!(name = %node.target_name, title = %node.source_title, "Rendered class");

        Ok(RenderedFile::new(
            format!("{}.generated.{}", node.target_name, self.extension),
            contents,
        ))
    }

    /// Render every node plus the index, in target-name order. Documentation
    /// pages for all packages are fetched before the first class renders.
    pub fn render(&mut self, registry: &Registry) -> EmitResult<Vec<RenderedFile>> {
        let nodes = registry.sorted_by_name();

        if let Some(docs) = self.docs.as_deref_mut() {
            let packages: BTreeSet<&str> = nodes.iter().map(|node| node.package()).collect();
            let packages: Vec<&str> = packages.into_iter().collect();
            docs.prefetch(&packages)?;
        }

        let mut files = Vec::with_capacity(nodes.len() + 1);
        for node in &nodes {
            files.push(self.render_node(node)?);
        }

        let names: Vec<&str> = nodes.iter().map(|node| node.target_name.as_str()).collect();
        files.push(RenderedFile::new(
            format!("index.{}", self.extension),
            render_index(&names, module_extension(&self.extension)),
        ));

        Ok(files)
    }

    /// Render everything, then replace the generated files in `output_dir`.
    pub fn emit(&mut self, registry: &Registry, output_dir: &Path) -> EmitResult<WriteSummary> {
        let files = self.render(registry)?;

        let writer = OutputWriter::new(output_dir, self.extension.as_str());
        let summary = writer.write_all(&files)?;

        info!(
            dir = %output_dir.display(),
            written = summary.written.len(),
            removed = summary.removed,
            "Emitted generated files"
        );
        Ok(summary)
    }
}
