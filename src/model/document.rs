//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Block, Heading, StyleSheet, Table};

/// A generated API reference document.
///
/// Built once by [`crate::builder::DocumentBuilder`] and handed whole to a
/// renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Document-wide styles
    pub styles: StyleSheet,

    /// Body blocks in emission order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(metadata: Metadata, styles: StyleSheet) -> Self {
        Self {
            metadata,
            styles,
            blocks: Vec::new(),
        }
    }

    /// Append blocks.
    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    /// Iterate over headings.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading(h) => Some(h),
            _ => None,
        })
    }

    /// Iterate over tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: String,

    /// Title declared by the API itself
    pub api_title: Option<String>,

    /// API version
    pub api_version: Option<String>,

    /// Declared OpenAPI version
    pub openapi_version: Option<String>,

    /// Number of documented operations
    pub operation_count: usize,

    /// Whether the layout is right-to-left
    pub right_to_left: bool,

    /// Label preset name
    pub language: String,

    /// Generation time
    pub generated: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("title: \"{}\"", escape_yaml(&self.title)));
        if let Some(ref api_title) = self.api_title {
            lines.push(format!("api_title: \"{}\"", escape_yaml(api_title)));
        }
        if let Some(ref version) = self.api_version {
            lines.push(format!("api_version: \"{}\"", escape_yaml(version)));
        }
        if let Some(ref openapi) = self.openapi_version {
            lines.push(format!("openapi: \"{}\"", escape_yaml(openapi)));
        }
        lines.push(format!("operations: {}", self.operation_count));
        lines.push(format!(
            "direction: {}",
            if self.right_to_left { "rtl" } else { "ltr" }
        ));
        lines.push(format!("language: {}", self.language));
        if let Some(ref generated) = self.generated {
            lines.push(format!("generated: {}", generated.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
