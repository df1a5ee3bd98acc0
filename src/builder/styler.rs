//! Shared styling and block construction helpers.

use crate::model::{
    Alignment, Block, CodeBlock, ColumnOrder, FieldInstruction, HeadingStyle, Margins,
    NumberingLevel, PageBorder, PageSetup, Paragraph, StyleSheet, Table, TableStyle, EMPTY_CELL,
};
use crate::settings::RenderSettings;

/// Monospaced font for code blocks.
pub const CODE_FONT: &str = "Consolas";

/// Applies one settings snapshot uniformly to every block it creates.
#[derive(Debug, Clone)]
pub struct Styler {
    right_to_left: bool,
    alignment: Alignment,
    table_style: TableStyle,
    code_size: i32,
}

impl Styler {
    /// Create a styler from normalized settings.
    pub fn new(settings: &RenderSettings) -> Self {
        let right_to_left = settings.is_right_to_left();
        Self {
            right_to_left,
            alignment: Alignment::for_direction(right_to_left),
            table_style: TableStyle {
                header_bold: true,
                header_text_color: "#FFFFFF".to_string(),
                header_fill: settings.border_color.clone(),
                border_size: settings.border_size.max(1),
                font: settings.font.clone(),
                font_size: settings.body_size,
            },
            code_size: (settings.body_size - 2).max(10),
        }
    }

    /// Whether the layout is right-to-left.
    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }

    /// Alignment shared by every paragraph, heading and table.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn heading(&self, level: u8, text: impl Into<String>) -> Block {
        Block::heading(level, text, self.alignment)
    }

    pub fn paragraph(&self, text: impl Into<String>) -> Block {
        Block::paragraph(text, self.alignment)
    }

    /// Paragraph that shows `-` when the text is absent or blank.
    pub fn paragraph_or_dash(&self, text: Option<&str>) -> Block {
        self.paragraph(or_dash(text))
    }

    pub fn title(&self, text: impl Into<String>) -> Block {
        Block::Paragraph(Paragraph::new(text, self.alignment).with_style("Title"))
    }

    pub fn code(&self, code: impl Into<String>) -> Block {
        Block::CodeBlock(CodeBlock {
            code: code.into(),
            font: CODE_FONT.to_string(),
            size: self.code_size,
            alignment: self.alignment,
        })
    }

    pub fn table(&self, header: &[&str], body: Vec<Vec<String>>, order: ColumnOrder) -> Block {
        Block::Table(Table::new(
            header.iter().map(|s| s.to_string()).collect(),
            body,
            order,
            self.right_to_left,
            self.table_style.clone(),
        ))
    }

    pub fn table_of_contents(&self, placeholder: &str) -> Block {
        Block::TableOfContents(FieldInstruction::table_of_contents(
            placeholder,
            self.alignment,
        ))
    }
}

/// Text, or `-` when absent or blank.
pub fn or_dash(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Heading styles, body style and numbering scheme.
pub fn style_sheet(settings: &RenderSettings) -> StyleSheet {
    StyleSheet {
        font: settings.font.clone(),
        body_size: settings.body_size,
        headings: vec![
            HeadingStyle::new(1, settings.h1_size, &settings.head_color),
            HeadingStyle::new(2, settings.h2_size, &settings.head_color),
            HeadingStyle::new(3, settings.h3_size, &settings.head_color),
        ],
        numbering: NumberingLevel::decimal_outline(),
    }
}

/// Page border and margins.
pub fn page_setup(settings: &RenderSettings) -> PageSetup {
    PageSetup {
        border: PageBorder {
            style: "single".to_string(),
            size: settings.border_size.max(1),
            space: 4,
            color: settings.border_color.clone(),
        },
        margins: Margins {
            top: settings.margin_top,
            bottom: settings.margin_bottom,
            left: settings.margin_left,
            right: settings.margin_right,
            header: 450,
            footer: 450,
            gutter: 0,
        },
    }
}
