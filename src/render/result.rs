//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, JSON, text)
    pub content: String,

    /// Document metadata (copied from the document)
    pub metadata: Metadata,

    /// Document statistics
    pub stats: DocumentStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: DocumentStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: DocumentStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Block counts of a document tree plus rendered text counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs, title included
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table rows, header rows included
    pub table_row_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of forced page breaks
    pub page_break_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading(_) => self.heading_count += 1,
            Block::Paragraph(_) => self.paragraph_count += 1,
            Block::Table(t) => {
                self.table_count += 1;
                self.table_row_count += t.row_count() as u32;
            }
            Block::CodeBlock(_) => self.code_block_count += 1,
            Block::PageBreak => self.page_break_count += 1,
            Block::TableOfContents(_) | Block::PageNumber(_) | Block::PageSetup(_) => {}
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.code_block_count += other.code_block_count;
        self.page_break_count += other.page_break_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, StyleSheet};

    #[test]
    fn test_stats_count_text() {
        let mut stats = DocumentStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_stats_from_document() {
        let mut doc = Document::new(Metadata::default(), StyleSheet::default());
        doc.extend([
            Block::heading(1, "Intro", Alignment::Left),
            Block::paragraph("text", Alignment::Left),
            Block::PageBreak,
            Block::PageBreak,
        ]);

        let stats = DocumentStats::from_document(&doc);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.page_break_count, 2);
        assert_eq!(stats.table_count, 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = DocumentStats {
            table_count: 2,
            table_row_count: 7,
            ..Default::default()
        };
        let b = DocumentStats {
            table_count: 1,
            table_row_count: 3,
            code_block_count: 4,
            ..Default::default()
        };

        a.merge(&b);
        assert_eq!(a.table_count, 3);
        assert_eq!(a.table_row_count, 10);
        assert_eq!(a.code_block_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("# Hello".to_string());
        assert_eq!(result.content_len(), 7);
        assert_eq!(result.stats, DocumentStats::default());
    }
}
