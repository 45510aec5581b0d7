//! Documentation link resolution.
//!
//! Every emitted class links to its source type's documentation. A link is
//! `<package page>#<Symbol>` and only counts as resolved when the fetched page
//! actually carries an anchor for the symbol; a missing anchor usually means a
//! rename entry no longer matches the documented library version.

use crate::error::{EmitError, EmitResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use typebridge_core::DocsSection;

/// Resolves a source symbol to a documentation URL.
pub trait DocLinkResolver {
    /// Fetch the pages of the given packages before any file is written.
    fn prefetch(&mut self, _packages: &[&str]) -> EmitResult<()> {
        Ok(())
    }

    /// `<page URL>#<symbol>` for `symbol` declared in `package`.
    fn resolve(&mut self, package: &str, symbol: &str) -> EmitResult<String>;
}

/// Source of documentation page HTML.
pub trait PageFetcher {
    fn fetch(&self, package: &str, url: &str) -> EmitResult<String>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, _package: &str, url: &str) -> EmitResult<String> {
        let failed = |source: reqwest::Error| EmitError::DocFetch {
            url: url.to_string(),
            source: Box::new(source),
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(failed)?;
        response.text().map_err(failed)
    }
}

/// Reads pages saved as `<dir>/<package path>.html`.
pub struct CacheDirFetcher {
    dir: PathBuf,
}

impl CacheDirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, package: &str) -> PathBuf {
        self.dir.join(format!("{package}.html"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageFetcher for CacheDirFetcher {
    fn fetch(&self, package: &str, url: &str) -> EmitResult<String> {
        let path = self.page_path(package);
        std::fs::read_to_string(&path).map_err(|e| EmitError::DocFetch {
            url: url.to_string(),
            source: format!("{}: {e}", path.display()).into(),
        })
    }
}

struct Page {
    url: String,
    html: String,
}

/// Fetches each package page once per run and checks anchors against it.
pub struct PageResolver<F = HttpFetcher> {
    fetcher: F,
    docs: DocsSection,
    pages: HashMap<String, Page>,
}

impl<F: PageFetcher> PageResolver<F> {
    pub fn new(fetcher: F, docs: DocsSection) -> Self {
        Self {
            fetcher,
            docs,
            pages: HashMap::new(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Number of pages fetched so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self, package: &str) -> EmitResult<&Page> {
        if !self.pages.contains_key(package) {
            let url = self.docs.page_url(package);
            debug!(package, url = %url, "Fetching documentation page");
            let html = self.fetcher.fetch(package, &url)?;
            self.pages.insert(package.to_string(), Page { url, html });
        }

        self.pages
            .get(package)
            .ok_or_else(|| EmitError::DocFetch {
                url: self.docs.page_url(package),
                source: "page missing from cache after fetch".into(),
            })
    }
}

impl<F: PageFetcher> DocLinkResolver for PageResolver<F> {
    fn prefetch(&mut self, packages: &[&str]) -> EmitResult<()> {
        for package in packages {
            self.page(package)?;
        }
        info!(pages = self.pages.len(), "Documentation pages ready");
        Ok(())
    }

    fn resolve(&mut self, package: &str, symbol: &str) -> EmitResult<String> {
        let page = self.page(package)?;

        if has_anchor(&page.html, symbol) {
            Ok(format!("{}#{symbol}", page.url))
        } else {
            Err(EmitError::MissingAnchor {
                package: package.to_string(),
                symbol: symbol.to_string(),
                url: page.url.clone(),
            })
        }
    }
}

/// Whether `html` declares or links to an anchor named `symbol`.
pub fn has_anchor(html: &str, symbol: &str) -> bool {
    html.contains(&format!("id=\"{symbol}\"")) || html.contains(&format!("href=\"#{symbol}\""))
}
