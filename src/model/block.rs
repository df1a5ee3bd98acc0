//! Block-level nodes.

use serde::{Deserialize, Serialize};

use super::{PageSetup, Table};

/// A node in the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A numbered outline heading
    Heading(Heading),

    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table with a styled header row
    Table(Table),

    /// Monospaced code
    CodeBlock(CodeBlock),

    /// A forced page break
    PageBreak,

    /// A table of contents field instruction
    TableOfContents(FieldInstruction),

    /// A page number footer field instruction
    PageNumber(FieldInstruction),

    /// Page border and margin directive for the whole document
    PageSetup(PageSetup),
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>, alignment: Alignment) -> Self {
        Block::Heading(Heading {
            level: level.clamp(1, 3),
            text: text.into(),
            alignment,
        })
    }

    /// Create a body paragraph block.
    pub fn paragraph(text: impl Into<String>, alignment: Alignment) -> Self {
        Block::Paragraph(Paragraph::new(text, alignment))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }

    /// Alignment of the block, if it carries one.
    pub fn alignment(&self) -> Option<Alignment> {
        match self {
            Block::Heading(h) => Some(h.alignment),
            Block::Paragraph(p) => Some(p.alignment),
            Block::Table(t) => Some(t.alignment),
            Block::CodeBlock(c) => Some(c.alignment),
            Block::TableOfContents(f) | Block::PageNumber(f) => Some(f.alignment),
            Block::PageBreak | Block::PageSetup(_) => None,
        }
    }
}

/// A heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Outline level (1-3)
    pub level: u8,

    /// Heading text
    pub text: String,

    /// Text alignment
    pub alignment: Alignment,
}

impl Heading {
    /// Style identifier for this level (`Heading1`..`Heading3`).
    pub fn style_id(&self) -> String {
        format!("Heading{}", self.level)
    }
}

/// A paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,

    /// Style identifier (`Normal` unless set)
    pub style_id: String,

    /// Text alignment
    pub alignment: Alignment,
}

impl Paragraph {
    /// Create a paragraph in the `Normal` style.
    pub fn new(text: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            style_id: "Normal".to_string(),
            alignment,
        }
    }

    /// Set the style identifier and return self.
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = style_id.into();
        self
    }

    /// Check if this paragraph uses the title style.
    pub fn is_title(&self) -> bool {
        self.style_id == "Title"
    }
}

/// A code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Code text
    pub code: String,

    /// Monospaced font family
    pub font: String,

    /// Font size in points
    pub size: i32,

    /// Text alignment
    pub alignment: Alignment,
}

/// A field the renderer evaluates (table of contents, page number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInstruction {
    /// Field code, e.g. `TOC \o "1-3" \h \z \u` or ` PAGE `
    pub instruction: String,

    /// Text shown until the field is updated
    pub placeholder: Option<String>,

    /// Alignment of the carrying paragraph
    pub alignment: Alignment,
}

impl FieldInstruction {
    /// Table of contents over heading levels 1-3 with hyperlinks.
    pub fn table_of_contents(placeholder: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            instruction: r#"TOC \o "1-3" \h \z \u"#.to_string(),
            placeholder: Some(placeholder.into()),
            alignment,
        }
    }

    /// Centered page number field.
    pub fn page_number() -> Self {
        Self {
            instruction: " PAGE ".to_string(),
            placeholder: None,
            alignment: Alignment::Center,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Reading-direction alignment.
    pub fn for_direction(right_to_left: bool) -> Self {
        if right_to_left {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        match Block::heading(7, "Deep", Alignment::Left) {
            Block::Heading(h) => {
                assert_eq!(h.level, 3);
                assert_eq!(h.style_id(), "Heading3");
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_alignment_for_direction() {
        assert_eq!(Alignment::for_direction(true), Alignment::Right);
        assert_eq!(Alignment::for_direction(false), Alignment::Left);
    }

    #[test]
    fn test_block_serialization_tag() {
        let json = serde_json::to_value(Block::PageBreak).unwrap();
        assert_eq!(json["type"], "page_break");

        let json = serde_json::to_value(Block::paragraph("hi", Alignment::Right)).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["alignment"], "right");
        assert_eq!(json["style_id"], "Normal");
    }

    #[test]
    fn test_page_number_field() {
        let field = FieldInstruction::page_number();
        assert_eq!(field.instruction, " PAGE ");
        assert_eq!(field.alignment, Alignment::Center);
    }
}
