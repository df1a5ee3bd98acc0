//! Integration tests for the converter module.

use std::fs;
use std::sync::Arc;

use specdoc::convert::{convert_batch, BatchSummary, ConvertOptions, Converter};
use specdoc::error::Result;
use specdoc::model::{Block, Document};
use specdoc::render::{DocumentRenderer, RenderOptions, RendererRegistry};
use specdoc::{Error, RenderSettings};

const SPEC: &str = r#"{
  "openapi": "3.0.2",
  "info": {"title": "Inventory", "version": "0.9"},
  "paths": {
    "/items": {
      "get": {"summary": "List items", "responses": {"200": {"description": "OK"}}},
      "post": {"summary": "Add item", "responses": {"201": {"description": "Created"}}}
    }
  }
}"#;

/// Renderer that reports the operation headings it sees.
struct OutlineRenderer;

impl DocumentRenderer for OutlineRenderer {
    fn name(&self) -> &str {
        "outline"
    }

    fn extensions(&self) -> &[&str] {
        &["outline"]
    }

    fn mime_type(&self) -> &'static str {
        "text/x-outline"
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<String> {
        let lines: Vec<&str> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) if h.level == 2 => Some(h.text.as_str()),
                _ => None,
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

fn ltr_options() -> ConvertOptions {
    ConvertOptions::new().with_settings(RenderSettings::new().with_right_to_left(false))
}

#[test]
fn test_registry_defaults() {
    let registry = RendererRegistry::with_defaults();

    assert_eq!(registry.names(), vec!["json", "markdown", "text"]);
    assert!(registry.supports("MD"));
    assert!(registry.supports("txt"));
    assert!(!registry.supports("docx"));
    assert_eq!(registry.lookup(".json").unwrap().name(), "json");
    assert_eq!(registry.lookup("text").unwrap().mime_type(), "text/plain");
}

#[test]
fn test_custom_renderer() {
    let mut registry = RendererRegistry::with_defaults();
    registry.register(Arc::new(OutlineRenderer));
    let converter = Converter::with_registry(registry);

    let result = converter
        .convert_bytes(SPEC.as_bytes(), &ltr_options().with_format("outline"))
        .unwrap();

    assert_eq!(result.content, "/items\n/items");
    assert_eq!(result.extension, "outline");
    assert_eq!(result.mime_type, "text/x-outline");
}

#[test]
fn test_convert_json_output() {
    let converter = Converter::new();
    let result = converter
        .convert_bytes(SPEC.as_bytes(), &ltr_options().with_format("json"))
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["metadata"]["api_title"], "Inventory");
    assert_eq!(value["metadata"]["operation_count"], 2);
    assert_eq!(result.extension, "json");
}

#[test]
fn test_convert_text_output() {
    let converter = Converter::new();
    let result = converter
        .convert_bytes(SPEC.as_bytes(), &ltr_options().with_format("txt"))
        .unwrap();

    assert!(result.content.contains("List items"));
    assert!(result.content.contains("curl -X POST \"[baseUrl]/items\""));
    assert!(!result.content.contains('|'));
}

#[test]
fn test_convert_markdown_rtl() {
    let converter = Converter::new();
    let options = ConvertOptions::new()
        .with_settings(RenderSettings::new().with_right_to_left(true))
        .with_render_options(RenderOptions::default().with_frontmatter(true));
    let result = converter.convert_bytes(SPEC.as_bytes(), &options).unwrap();

    assert!(result.content.starts_with("---\n"));
    assert!(result.content.contains("<div dir=\"rtl\">"));
    assert!(result.metadata.right_to_left);
}

#[test]
fn test_convert_file_and_batch() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.yaml");
    let broken = dir.path().join("broken.yaml");
    fs::write(&first, SPEC).unwrap();
    fs::write(
        &second,
        "openapi: 3.1.0\ninfo:\n  title: Second\npaths:\n  /ping:\n    get:\n      responses: {}\n",
    )
    .unwrap();
    fs::write(&broken, "swagger: '2.0'\n").unwrap();

    let converter = Converter::new();
    let single = converter.convert_file(&first, &ltr_options()).unwrap();
    assert_eq!(single.metadata.operation_count, 2);

    let items = convert_batch(
        &converter,
        &[first.clone(), second.clone(), broken.clone()],
        &ltr_options(),
    );
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].input, second);
    assert_eq!(
        items[1].result.as_ref().unwrap().metadata.api_title.as_deref(),
        Some("Second")
    );
    assert!(matches!(items[2].result, Err(Error::UnsupportedVersion(_))));
    assert_eq!(
        BatchSummary::of(&items),
        BatchSummary {
            succeeded: 2,
            failed: 1
        }
    );
}
