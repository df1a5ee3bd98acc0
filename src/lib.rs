//! # specdoc
//!
//! Turn OpenAPI 3.x specifications into structured API reference documents.
//!
//! A specification is loaded into an object graph, walked once by the
//! [`DocumentBuilder`], and turned into an immutable document tree of
//! headings, paragraphs, tables, code blocks and page directives. Renderers
//! serialize that tree to Markdown, JSON or plain text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use specdoc::{load_file, build_document, render, RenderSettings};
//!
//! fn main() -> specdoc::Result<()> {
//!     let spec = load_file("openapi.yaml")?;
//!
//!     let settings = RenderSettings::new().with_title("Pet Store API");
//!     let doc = build_document(&spec, &settings);
//!
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reference resolution**: `$ref` and `allOf` schemas, cycle safe
//! - **Example synthesis**: parameter defaults, sample payloads, response examples
//! - **curl invocations**: one ready-to-paste command per operation
//! - **Directionality**: right-to-left layouts with per-table column order
//! - **Multiple output formats**: Markdown, plain text, JSON
//! - **Parallel batches**: Uses Rayon to convert many specifications at once

pub mod builder;
pub mod convert;
pub mod detect;
pub mod error;
pub mod labels;
pub mod loader;
pub mod model;
pub mod render;
pub mod resolve;
pub mod settings;
pub mod spec;
pub mod synth;

// Re-export commonly used types
pub use builder::{build_document, DocumentBuilder};
pub use convert::{convert_batch, ConvertOptions, ConvertResult, Converter};
pub use detect::{
    detect_dialect, detect_format_from_bytes, detect_format_from_path, SpecDialect, SpecFormat,
};
pub use error::{Error, Result};
pub use labels::{Labels, Language};
pub use loader::{ErrorMode, LoadOptions, SpecLoader};
pub use model::{Alignment, Block, ColumnOrder, Document, Metadata, Table, TableCell, TableRow};
pub use render::{DocumentRenderer, DocumentStats, JsonFormat, RenderOptions, RendererRegistry};
pub use resolve::SchemaResolver;
pub use settings::{RenderSettings, TextDirection};
pub use spec::{HttpMethod, Operation, Schema, Specification};
pub use synth::CurlSynthesizer;

use std::io::Read;
use std::path::Path;

/// Load a specification file (JSON or YAML).
///
/// # Example
///
/// ```no_run
/// use specdoc::load_file;
///
/// let spec = load_file("openapi.json").unwrap();
/// println!("Operations: {}", spec.operation_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Specification> {
    SpecLoader::open(path)?.load()
}

/// Load a specification file with custom options.
///
/// # Example
///
/// ```no_run
/// use specdoc::{load_file_with_options, LoadOptions};
///
/// let options = LoadOptions::new().lenient().with_path_parameters(false);
/// let spec = load_file_with_options("openapi.yaml", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(
    path: P,
    options: LoadOptions,
) -> Result<Specification> {
    SpecLoader::open_with_options(path, options)?.load()
}

/// Load a specification from bytes.
pub fn load_bytes(data: &[u8]) -> Result<Specification> {
    SpecLoader::from_bytes(data)?.load()
}

/// Load a specification from bytes with custom options.
pub fn load_bytes_with_options(data: &[u8], options: LoadOptions) -> Result<Specification> {
    SpecLoader::from_bytes_with_options(data, options)?.load()
}

/// Load a specification from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Specification> {
    SpecLoader::from_reader(reader)?.load()
}

/// Convert a specification file to Markdown.
///
/// # Example
///
/// ```no_run
/// use specdoc::{to_markdown, RenderSettings};
///
/// let markdown = to_markdown("openapi.yaml", &RenderSettings::default()).unwrap();
/// std::fs::write("api.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P, settings: &RenderSettings) -> Result<String> {
    let spec = load_file(path)?;
    let doc = build_document(&spec, settings);
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a specification file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, settings: &RenderSettings) -> Result<String> {
    let spec = load_file(path)?;
    let doc = build_document(&spec, settings);
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a specification file to the JSON form of its document tree.
pub fn to_json<P: AsRef<Path>>(
    path: P,
    settings: &RenderSettings,
    format: JsonFormat,
) -> Result<String> {
    let spec = load_file(path)?;
    let doc = build_document(&spec, settings);
    render::to_json(&doc, format)
}

/// Builder for loading specifications and producing documents.
///
/// # Example
///
/// ```no_run
/// use specdoc::Specdoc;
///
/// let markdown = Specdoc::new()
///     .lenient()
///     .right_to_left(true)
///     .with_title("راهنمای API")
///     .with_frontmatter()
///     .load("openapi.yaml")?
///     .to_markdown()?;
/// # Ok::<(), specdoc::Error>(())
/// ```
pub struct Specdoc {
    load_options: LoadOptions,
    settings: RenderSettings,
    render_options: RenderOptions,
}

impl Specdoc {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            load_options: LoadOptions::default(),
            settings: RenderSettings::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Accept documents without a version field.
    pub fn lenient(mut self) -> Self {
        self.load_options = self.load_options.lenient();
        self
    }

    /// Replace the settings snapshot.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings = self.settings.with_title(title);
        self
    }

    /// Force the layout direction.
    pub fn right_to_left(mut self, rtl: bool) -> Self {
        self.settings = self.settings.with_right_to_left(rtl);
        self
    }

    /// Select the label preset.
    pub fn with_language(mut self, language: Language) -> Self {
        self.settings = self.settings.with_language(language);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Number headings in Markdown output.
    pub fn with_numbering(mut self) -> Self {
        self.render_options = self.render_options.with_numbering(true);
        self
    }

    /// Load a specification file and build its document.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<SpecdocResult> {
        let spec = load_file_with_options(path, self.load_options.clone())?;
        Ok(self.finish(&spec))
    }

    /// Load a specification from bytes and build its document.
    pub fn load_bytes(self, data: &[u8]) -> Result<SpecdocResult> {
        let spec = load_bytes_with_options(data, self.load_options.clone())?;
        Ok(self.finish(&spec))
    }

    fn finish(self, spec: &Specification) -> SpecdocResult {
        SpecdocResult {
            document: build_document(spec, &self.settings),
            render_options: self.render_options,
        }
    }
}

impl Default for Specdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A built document ready to render.
pub struct SpecdocResult {
    /// The document tree
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl SpecdocResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Block counts of the document.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &[u8] = br#"{"openapi":"3.0.0","info":{"title":"T","version":"1"},"paths":{}}"#;

    #[test]
    fn test_specdoc_builder() {
        let builder = Specdoc::new().lenient().with_frontmatter().right_to_left(false);

        assert!(matches!(builder.load_options.error_mode, ErrorMode::Lenient));
        assert!(builder.render_options.include_frontmatter);
        assert!(!builder.settings.is_right_to_left());
    }

    #[test]
    fn test_load_bytes_empty_data() {
        assert!(load_bytes(b"").is_err());
    }

    #[test]
    fn test_load_bytes_swagger() {
        let result = load_bytes(br#"{"swagger":"2.0","info":{},"paths":{}}"#);
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_specdoc_load_bytes() {
        let result = Specdoc::new()
            .right_to_left(false)
            .with_frontmatter()
            .load_bytes(MINIMAL)
            .unwrap();

        let markdown = result.to_markdown().unwrap();
        assert!(markdown.starts_with("---\ntitle: \"API Documentation\""));
        assert_eq!(result.document().metadata.api_title.as_deref(), Some("T"));

        let stats = result.stats();
        assert_eq!(stats.code_block_count, 0);
        assert!(stats.table_count >= 2);
    }

    #[test]
    fn test_specdoc_rtl_language() {
        let result = Specdoc::new()
            .with_language(Language::Persian)
            .load_bytes(MINIMAL)
            .unwrap();
        assert!(result.document().metadata.right_to_left);
    }

    #[test]
    fn test_json_format_variants() {
        let result = Specdoc::new().load_bytes(MINIMAL).unwrap();
        let pretty = result.to_json(JsonFormat::Pretty).unwrap();
        let compact = result.to_json(JsonFormat::Compact).unwrap();
        assert!(pretty.len() > compact.len());
    }
}
