//! Rendering options and configuration.

/// Options for rendering a document tree.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Prefix headings with outline numbers from the style sheet
    pub number_headings: bool,

    /// Replace the table-of-contents field with a list of headings
    pub materialize_toc: bool,

    /// Deepest heading level listed in a materialized table of contents (1-3)
    pub toc_depth: u8,

    /// Offset added to heading levels so the title can own `#`
    pub heading_offset: u8,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Wrap right-to-left documents in `<div dir="rtl">`
    pub direction_wrapper: bool,

    /// Emit a thematic break for each page break
    pub page_break_rules: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable heading numbering.
    pub fn with_numbering(mut self, number: bool) -> Self {
        self.number_headings = number;
        self
    }

    /// Enable or disable table-of-contents materialization.
    pub fn with_toc(mut self, materialize: bool) -> Self {
        self.materialize_toc = materialize;
        self
    }

    /// Set the table-of-contents depth.
    pub fn with_toc_depth(mut self, depth: u8) -> Self {
        self.toc_depth = depth.clamp(1, 3);
        self
    }

    /// Set the heading level offset.
    pub fn with_heading_offset(mut self, offset: u8) -> Self {
        self.heading_offset = offset.min(3);
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable the right-to-left wrapper.
    pub fn with_direction_wrapper(mut self, wrap: bool) -> Self {
        self.direction_wrapper = wrap;
        self
    }

    /// Enable or disable page break rules.
    pub fn with_page_break_rules(mut self, rules: bool) -> Self {
        self.page_break_rules = rules;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            number_headings: false,
            materialize_toc: true,
            toc_depth: 3,
            heading_offset: 1,
            escape_special_chars: true,
            direction_wrapper: true,
            page_break_rules: false,
        }
    }
}
