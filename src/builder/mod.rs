//! Document construction.
//!
//! [`DocumentBuilder`] walks a loaded [`Specification`] once and produces
//! an immutable [`Document`] tree. Sections are emitted in a fixed order:
//!
//! 1. style sheet
//! 2. title
//! 3. table of contents (optional)
//! 4. general information table
//! 5. introduction
//! 6. method index
//! 7. changelog
//! 8. shared response model and shared errors
//! 9. one subsection per operation
//! 10. page border and margins
//! 11. page number footer (optional)
//!
//! A single direction flag drives alignment and column order for every
//! block in one build.

mod changelog;
mod endpoint;
mod styler;

pub use changelog::{changelog_blocks, parse_changelog, ChangelogEntry};
pub use styler::{or_dash, page_setup, style_sheet, Styler, CODE_FONT};

use crate::labels::Labels;
use crate::model::{Block, ColumnOrder, Document, FieldInstruction, Metadata, EMPTY_CELL};
use crate::resolve::SchemaResolver;
use crate::settings::RenderSettings;
use crate::spec::Specification;
use crate::synth::CurlSynthesizer;

use endpoint::EndpointSection;

/// Builds a document tree from a specification and one settings snapshot.
pub struct DocumentBuilder<'a> {
    spec: &'a Specification,
    settings: RenderSettings,
    labels: &'static Labels,
    styler: Styler,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder. Settings are normalized first.
    pub fn new(spec: &'a Specification, settings: &RenderSettings) -> Self {
        let settings = settings.normalized();
        let labels = settings.labels();
        let styler = Styler::new(&settings);
        Self {
            spec,
            settings,
            labels,
            styler,
        }
    }

    /// The normalized settings this builder applies.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Build the document.
    pub fn build(&self) -> Document {
        let mut document = Document::new(self.metadata(), style_sheet(&self.settings));

        document.extend(self.title_block());
        if self.settings.include_table_of_contents {
            document.extend(self.table_of_contents());
        }
        document.extend(self.info_section());
        document.extend(self.intro_section());
        document.extend(self.index_section());
        document.extend(self.changelog_section());
        document.extend(self.shared_sections());
        document.extend(self.endpoints());
        document.extend([Block::PageSetup(page_setup(&self.settings))]);
        if self.settings.include_page_numbers {
            document.extend([Block::PageNumber(FieldInstruction::page_number())]);
        }

        log::debug!(
            "Built document: {} blocks, {} tables, {} operations",
            document.blocks.len(),
            document.tables().count(),
            self.spec.operation_count()
        );

        document
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            title: self.title().to_string(),
            api_title: self.spec.info.title.clone(),
            api_version: self.spec.info.version.clone(),
            openapi_version: self.spec.openapi.clone(),
            operation_count: self.spec.operation_count(),
            right_to_left: self.styler.right_to_left(),
            language: self.settings.language.to_string(),
            generated: None,
        }
    }

    fn title(&self) -> &str {
        self.settings
            .title
            .as_deref()
            .unwrap_or(self.labels.document_title)
    }

    /// Heading text for a section: the configured override or the preset.
    fn section_title<'s>(&'s self, configured: &'s Option<String>, preset: &'s str) -> &'s str {
        configured.as_deref().unwrap_or(preset)
    }

    fn title_block(&self) -> Vec<Block> {
        vec![self.styler.title(self.title())]
    }

    fn table_of_contents(&self) -> Vec<Block> {
        let l = self.labels;
        vec![
            self.styler.heading(
                1,
                self.section_title(&self.settings.table_of_contents_title, l.toc_title),
            ),
            self.styler.table_of_contents(l.toc_placeholder),
            Block::PageBreak,
        ]
    }

    fn info_section(&self) -> Vec<Block> {
        let l = self.labels;
        let s = &self.styler;
        let release_date = self
            .settings
            .release_date
            .map(|d| d.format("%Y-%m-%d").to_string());

        let rows = vec![
            vec![l.info_base_url.to_string(), or_dash(self.spec.first_server_url())],
            vec![l.info_version.to_string(), or_dash(self.spec.info.version.as_deref())],
            vec![l.info_api_type.to_string(), l.info_api_type_value.to_string()],
            vec![l.info_rate_limiting.to_string(), EMPTY_CELL.to_string()],
            vec![l.info_usage.to_string(), EMPTY_CELL.to_string()],
            vec![l.info_release_date.to_string(), or_dash(release_date.as_deref())],
            vec![l.info_limitations.to_string(), EMPTY_CELL.to_string()],
        ];
        let api_title = or_dash(self.spec.info.title.as_deref());

        vec![
            s.heading(1, self.section_title(&self.settings.info_title, l.info_title)),
            s.table(&[l.info_name, &api_title], rows, ColumnOrder::Natural),
            Block::PageBreak,
        ]
    }

    fn intro_section(&self) -> Vec<Block> {
        let s = &self.styler;
        vec![
            s.heading(
                1,
                self.section_title(&self.settings.intro_title, self.labels.intro_title),
            ),
            s.paragraph_or_dash(self.settings.intro_text.as_deref()),
            Block::PageBreak,
        ]
    }

    fn index_section(&self) -> Vec<Block> {
        let l = self.labels;
        let s = &self.styler;
        let rows = self
            .spec
            .operations()
            .map(|(path, method, op)| {
                vec![
                    path.to_string(),
                    method.as_str().to_string(),
                    or_dash(op.summary.as_deref()),
                    or_dash(op.description.as_deref()),
                ]
            })
            .collect();

        vec![
            s.heading(1, self.section_title(&self.settings.index_title, l.index_title)),
            s.table(
                &[l.address, l.method, l.summary, l.description],
                rows,
                ColumnOrder::Natural,
            ),
            Block::PageBreak,
        ]
    }

    fn changelog_section(&self) -> Vec<Block> {
        let l = self.labels;
        let mut blocks = vec![self.styler.heading(
            1,
            self.section_title(&self.settings.changelog_title, l.changelog_title),
        )];
        blocks.extend(changelog_blocks(
            self.settings.changelog.as_deref(),
            &self.styler,
            l,
        ));
        blocks.push(Block::PageBreak);
        blocks
    }

    fn shared_sections(&self) -> Vec<Block> {
        let l = self.labels;
        let s = &self.styler;
        vec![
            s.heading(
                1,
                self.section_title(&self.settings.shared_model_title, l.shared_model_title),
            ),
            s.paragraph_or_dash(self.settings.shared_model_text.as_deref()),
            Block::PageBreak,
            s.heading(
                1,
                self.section_title(&self.settings.shared_errors_title, l.shared_errors_title),
            ),
            s.paragraph_or_dash(self.settings.shared_errors_text.as_deref()),
            Block::PageBreak,
        ]
    }

    fn endpoints(&self) -> Vec<Block> {
        let components = &self.spec.components;
        let curl = CurlSynthesizer::from_settings(components, &self.settings);
        let section = EndpointSection {
            styler: &self.styler,
            labels: self.labels,
            settings: &self.settings,
            resolver: SchemaResolver::new(components),
            curl: &curl,
        };

        let mut blocks = vec![self.styler.heading(
            1,
            self.section_title(&self.settings.endpoints_title, self.labels.endpoints_title),
        )];
        for (path, method, op) in self.spec.operations() {
            blocks.extend(section.build(path, method, op));
        }
        blocks
    }
}

/// Build a document from a specification and settings.
pub fn build_document(spec: &Specification, settings: &RenderSettings) -> Document {
    DocumentBuilder::new(spec, settings).build()
}
