//! End-to-end conversion: load a specification, build the document tree,
//! render it with a registered output format.
//!
//! # Example
//!
//! ```no_run
//! use specdoc::convert::{ConvertOptions, Converter};
//!
//! fn main() -> specdoc::Result<()> {
//!     let converter = Converter::new();
//!     let options = ConvertOptions::new().with_format("markdown");
//!     let result = converter.convert_file("openapi.yaml", &options)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod batch;

pub use batch::{convert_batch, BatchItem, BatchSummary};

use std::path::Path;

use crate::builder::build_document;
use crate::error::Result;
use crate::loader::{LoadOptions, SpecLoader};
use crate::model::{Document, Metadata};
use crate::render::{DocumentStats, RenderOptions, RendererRegistry};
use crate::settings::RenderSettings;
use crate::spec::Specification;

/// Options for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Specification loading options
    pub load: LoadOptions,

    /// Document settings snapshot
    pub settings: RenderSettings,

    /// Rendering options
    pub render: RenderOptions,

    /// Renderer name or extension
    pub format: String,
}

impl ConvertOptions {
    /// Create new conversion options (Markdown output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set loading options.
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.load = options;
        self
    }

    /// Set the document settings.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the output format by renderer name or extension.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            settings: RenderSettings::default(),
            render: RenderOptions::default(),
            format: "markdown".to_string(),
        }
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered content
    pub content: String,

    /// Document metadata
    pub metadata: Metadata,

    /// Block counts of the built document
    pub stats: DocumentStats,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Default file extension of the output
    pub extension: String,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Runs the load, build and render stages against a renderer registry.
pub struct Converter {
    registry: RendererRegistry,
}

impl Converter {
    /// Create a converter with the default renderers.
    pub fn new() -> Self {
        Self::with_registry(RendererRegistry::with_defaults())
    }

    /// Create a converter over a custom registry.
    pub fn with_registry(registry: RendererRegistry) -> Self {
        Self { registry }
    }

    /// Access the renderer registry.
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Convert a specification file.
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let spec = SpecLoader::open_with_options(path, options.load.clone())?.load()?;
        self.convert_spec(&spec, options)
    }

    /// Convert specification bytes (JSON or YAML).
    pub fn convert_bytes(&self, data: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let spec = SpecLoader::from_bytes_with_options(data, options.load.clone())?.load()?;
        self.convert_spec(&spec, options)
    }

    /// Convert an already loaded specification.
    pub fn convert_spec(
        &self,
        spec: &Specification,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        // Resolve the renderer before building so an unknown format fails fast.
        let renderer = self.registry.lookup(&options.format)?;
        let document = build_document(spec, &options.settings);
        let content = renderer.render(&document, &options.render)?;

        Ok(ConvertResult {
            stats: stats_for(&document, &content),
            metadata: document.metadata,
            content,
            mime_type: renderer.mime_type(),
            extension: renderer
                .extensions()
                .first()
                .copied()
                .unwrap_or("out")
                .to_string(),
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

fn stats_for(document: &Document, content: &str) -> DocumentStats {
    let mut stats = DocumentStats::from_document(document);
    stats.count_text(content);
    stats
}
