//! Plain text rendering for document trees.

use crate::error::Result;
use crate::model::{Block, Document};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Table cells are tab-separated; page breaks become form feeds when page
/// break rules are enabled.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for block in &doc.blocks {
        match block {
            Block::Heading(h) => {
                output.push_str(h.text.trim());
                output.push_str("\n\n");
            }
            Block::Paragraph(p) => {
                let text = p.text.trim();
                if !text.is_empty() {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
            }
            Block::Table(t) => {
                output.push_str(&t.plain_text());
                output.push_str("\n\n");
            }
            Block::CodeBlock(c) => {
                output.push_str(&c.code);
                output.push_str("\n\n");
            }
            Block::PageBreak if options.page_break_rules => output.push_str("\u{000C}\n"),
            Block::PageBreak
            | Block::TableOfContents(_)
            | Block::PageNumber(_)
            | Block::PageSetup(_) => {}
        }
    }

    Ok(output.trim().to_string())
}
