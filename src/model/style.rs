//! Style sheet and page setup types.

use serde::{Deserialize, Serialize};

/// Document-wide styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Base font family
    pub font: String,

    /// Size of the `Normal` style in points
    pub body_size: i32,

    /// Heading styles, level 1 first
    pub headings: Vec<HeadingStyle>,

    /// Outline numbering levels
    pub numbering: Vec<NumberingLevel>,
}

impl StyleSheet {
    /// Style for a heading level, if defined.
    pub fn heading(&self, level: u8) -> Option<&HeadingStyle> {
        self.headings.iter().find(|h| h.level == level)
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            font: "Tahoma".to_string(),
            body_size: 12,
            headings: Vec::new(),
            numbering: NumberingLevel::decimal_outline(),
        }
    }
}

/// A heading paragraph style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingStyle {
    /// Heading level (1-3)
    pub level: u8,

    /// Style identifier (`Heading1`..)
    pub style_id: String,

    /// Display name (`Heading 1`..)
    pub name: String,

    /// Font size in points
    pub size: i32,

    /// Bold run
    pub bold: bool,

    /// Text colour (`#RRGGBB`)
    pub color: String,

    /// Outline level (0-based)
    pub outline_level: u8,

    /// Style the heading is based on
    pub based_on: String,
}

impl HeadingStyle {
    /// Create a bold heading style for a level.
    pub fn new(level: u8, size: i32, color: impl Into<String>) -> Self {
        Self {
            level,
            style_id: format!("Heading{}", level),
            name: format!("Heading {}", level),
            size,
            bold: true,
            color: color.into(),
            outline_level: level.saturating_sub(1),
            based_on: "Normal".to_string(),
        }
    }
}

/// One level of the outline numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingLevel {
    /// Level index (0-based)
    pub index: u8,

    /// Number format (`decimal`)
    pub format: String,

    /// Level text pattern, e.g. `%1.%2.`
    pub text: String,
}

impl NumberingLevel {
    /// Two-level decimal scheme: `%1.` then `%1.%2.`.
    pub fn decimal_outline() -> Vec<NumberingLevel> {
        vec![
            NumberingLevel {
                index: 0,
                format: "decimal".to_string(),
                text: "%1.".to_string(),
            },
            NumberingLevel {
                index: 1,
                format: "decimal".to_string(),
                text: "%1.%2.".to_string(),
            },
        ]
    }
}

/// Table header and border styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Header row text is bold
    pub header_bold: bool,

    /// Header row text colour
    pub header_text_color: String,

    /// Header row fill colour
    pub header_fill: String,

    /// Border width in eighths of a point (at least 1)
    pub border_size: i32,

    /// Cell font family
    pub font: String,

    /// Cell font size in points
    pub font_size: i32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_bold: true,
            header_text_color: "#FFFFFF".to_string(),
            header_fill: "#2B579A".to_string(),
            border_size: 8,
            font: "Tahoma".to_string(),
            font_size: 12,
        }
    }
}

/// Page border and margins applied to every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Border drawn around each page
    pub border: PageBorder,

    /// Page margins
    pub margins: Margins,
}

/// A single-line page border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBorder {
    /// Line style
    pub style: String,

    /// Width in eighths of a point
    pub size: i32,

    /// Distance from text in points
    pub space: i32,

    /// Colour (`#RRGGBB`)
    pub color: String,
}

/// Page margins in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
    pub header: i32,
    pub footer: i32,
    pub gutter: i32,
}
