//! Markdown rendering for document trees.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Alignment, Block, Document, FieldInstruction, Heading, Paragraph, Table};

use super::{DocumentStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let wrap = doc.metadata.right_to_left && self.options.direction_wrapper;
        if wrap {
            output.push_str("<div dir=\"rtl\">\n\n");
        }

        let outline = Outline::new(doc, self.options.number_headings);
        let mut heading_index = 0;
        for block in &doc.blocks {
            match block {
                Block::Heading(h) => {
                    self.render_heading(&mut output, h, outline.label(heading_index));
                    heading_index += 1;
                }
                Block::TableOfContents(field) => {
                    self.render_toc(&mut output, field, &outline, heading_index);
                }
                other => self.render_block(&mut output, other),
            }
        }

        let mut output = output.trim_end().to_string();
        if wrap {
            output.push_str("\n\n</div>");
        }
        Ok(output.trim().to_string())
    }

    /// Render a document to Markdown with document statistics.
    pub fn render_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        let content = self.render(doc)?;
        let mut stats = DocumentStats::from_document(doc);
        stats.count_text(&content);
        Ok(RenderResult::new(content, doc.metadata.clone(), stats))
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Paragraph(p) => self.render_paragraph(output, p),
            Block::Table(t) => self.render_table(output, t),
            Block::CodeBlock(c) => {
                let language = if c.code.trim_start().starts_with("curl") {
                    "bash"
                } else {
                    ""
                };
                let fence = code_fence(&c.code);
                output.push_str(&format!("{}{}\n{}\n{}\n\n", fence, language, c.code, fence));
            }
            Block::PageBreak => {
                if self.options.page_break_rules {
                    output.push_str("---\n\n");
                } else if !output.is_empty() && !output.ends_with("\n\n") {
                    output.push_str("\n\n");
                }
            }
            // Container-level directives have no Markdown form.
            Block::PageNumber(_) | Block::PageSetup(_) => {}
            Block::Heading(_) | Block::TableOfContents(_) => {}
        }
    }

    fn render_heading(&self, output: &mut String, heading: &Heading, number: Option<&str>) {
        let level = (heading.level + self.options.heading_offset).min(6);
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
        if let Some(number) = number {
            output.push_str(number);
            output.push(' ');
        }
        output.push_str(&self.escape(&heading.text));
        output.push_str("\n\n");
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        let text = para.text.trim();
        if text.is_empty() {
            return;
        }
        if para.is_title() {
            output.push_str("# ");
        }
        output.push_str(&self.escape(text));
        output.push_str("\n\n");
    }

    /// Headings that follow the field, nested by level.
    fn render_toc(
        &self,
        output: &mut String,
        field: &FieldInstruction,
        outline: &Outline,
        first_heading: usize,
    ) {
        if !self.options.materialize_toc {
            if let Some(ref placeholder) = field.placeholder {
                let placeholder = placeholder.trim();
                if !placeholder.is_empty() {
                    output.push_str(&format!("*{}*\n\n", self.escape(placeholder)));
                }
            }
            return;
        }

        let mut slugs = SlugCounter::default();
        for (i, entry) in outline.entries.iter().enumerate() {
            let title = entry.display(self.options.number_headings);
            let slug = slugs.next(&title);
            if i < first_heading || entry.level > self.options.toc_depth {
                continue;
            }
            output.push_str(&"  ".repeat(entry.level.saturating_sub(1) as usize));
            output.push_str(&format!("- [{}](#{})\n", self.escape(&title), slug));
        }
        output.push('\n');
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        let Some(header) = table.header() else {
            return;
        };
        if table.column_count() == 0 {
            return;
        }

        output.push('|');
        for cell in &header.cells {
            output.push_str(&format!(" {} |", self.cell_text(&cell.text)));
        }
        output.push('\n');

        output.push('|');
        for cell in &header.cells {
            output.push_str(match cell.alignment {
                Alignment::Left => " --- |",
                Alignment::Center => " :---: |",
                Alignment::Right => " ---: |",
            });
        }
        output.push('\n');

        for row in table.body() {
            output.push('|');
            for cell in &row.cells {
                output.push_str(&format!(" {} |", self.cell_text(&cell.text)));
            }
            output.push('\n');
        }

        output.push('\n');
    }

    fn cell_text(&self, text: &str) -> String {
        let text = text.trim().replace("\r\n", "\n");
        let text = if self.options.escape_special_chars {
            escape_markdown(&text)
        } else {
            text.replace('|', "\\|")
        };
        text.replace('\n', "<br>")
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Heading entries with their outline numbers, in document order.
struct Outline {
    entries: Vec<OutlineEntry>,
}

struct OutlineEntry {
    level: u8,
    text: String,
    number: Option<String>,
}

impl OutlineEntry {
    fn display(&self, numbered: bool) -> String {
        match (&self.number, numbered) {
            (Some(n), true) => format!("{} {}", n, self.text),
            _ => self.text.clone(),
        }
    }
}

impl Outline {
    fn new(doc: &Document, numbered: bool) -> Self {
        let mut counters = [0u32; 3];
        let entries = doc
            .headings()
            .map(|h| {
                let depth = h.level.clamp(1, 3) as usize;
                counters[depth - 1] += 1;
                for deeper in counters.iter_mut().skip(depth) {
                    *deeper = 0;
                }
                let number = numbered
                    .then(|| {
                        doc.styles
                            .numbering
                            .get(depth - 1)
                            .map(|level| expand_level_text(&level.text, &counters))
                    })
                    .flatten();
                OutlineEntry {
                    level: h.level,
                    text: h.text.clone(),
                    number,
                }
            })
            .collect();
        Self { entries }
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).and_then(|e| e.number.as_deref())
    }
}

/// Substitute `%1`..`%3` in a numbering pattern.
fn expand_level_text(pattern: &str, counters: &[u32; 3]) -> String {
    let mut text = pattern.to_string();
    for (i, value) in counters.iter().enumerate() {
        text = text.replace(&format!("%{}", i + 1), &value.to_string());
    }
    text
}

/// GitHub-style anchor slugs, numbered on repetition.
#[derive(Default)]
struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    fn next(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

fn slugify(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Escape special Markdown characters.
/// Only characters that could be misinterpreted as inline syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// A backtick fence longer than any backtick run inside `code`.
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}
