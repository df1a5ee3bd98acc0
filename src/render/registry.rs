//! Pluggable output formats.
//!
//! A [`DocumentRenderer`] turns a finished [`Document`] into bytes of one
//! output format. The [`RendererRegistry`] maps format names and file
//! extensions to renderers so callers can dispatch on either.
//!
//! # Example
//!
//! ```
//! use specdoc::render::{RenderOptions, RendererRegistry};
//! use specdoc::model::{Document, Metadata, StyleSheet};
//!
//! let registry = RendererRegistry::with_defaults();
//! let renderer = registry.get_by_extension("md").unwrap();
//! let doc = Document::new(Metadata::default(), StyleSheet::default());
//! let output = renderer.render(&doc, &RenderOptions::default()).unwrap();
//! assert!(output.is_empty());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Document;

use super::{to_json, to_markdown, to_text, JsonFormat, RenderOptions};

/// Trait for output formats.
///
/// Implement this trait to add support for a new output format.
pub trait DocumentRenderer: Send + Sync {
    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Get the file extensions this renderer writes.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["md"]`).
    /// The first one is the default for output files.
    fn extensions(&self) -> &[&str];

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Render a document.
    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<String>;

    /// Check if this renderer writes the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Markdown output.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormat;

impl DocumentRenderer for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<String> {
        to_markdown(doc, options)
    }
}

impl DocumentRenderer for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<String> {
        to_json(doc, *self)
    }
}

/// Plain text output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl DocumentRenderer for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<String> {
        to_text(doc, options)
    }
}

/// Registry for renderers.
pub struct RendererRegistry {
    by_extension: HashMap<String, Arc<dyn DocumentRenderer>>,
    by_name: HashMap<String, Arc<dyn DocumentRenderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the Markdown, JSON and text renderers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MarkdownFormat));
        registry.register(Arc::new(JsonFormat::Pretty));
        registry.register(Arc::new(TextFormat));
        registry
    }

    /// Register a renderer under its name and all its extensions.
    ///
    /// A later registration replaces an earlier one for the same key.
    pub fn register(&mut self, renderer: Arc<dyn DocumentRenderer>) {
        for ext in renderer.extensions() {
            self.by_extension
                .insert(ext.to_lowercase(), renderer.clone());
        }
        self.by_name
            .insert(renderer.name().to_lowercase(), renderer);
    }

    /// Get a renderer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentRenderer>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Get a renderer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentRenderer>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get a renderer by name, falling back to extension.
    pub fn lookup(&self, key: &str) -> Result<Arc<dyn DocumentRenderer>> {
        self.get_by_name(key)
            .or_else(|| self.get_by_extension(key.trim_start_matches('.')))
            .ok_or_else(|| Error::UnknownRenderer(key.to_string()))
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Get all registered renderer names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Render a document with the renderer registered under `key`.
    pub fn render(&self, key: &str, doc: &Document, options: &RenderOptions) -> Result<String> {
        self.lookup(key)?.render(doc, options)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
