//! Per-operation subsection.

use crate::labels::Labels;
use crate::model::{Block, ColumnOrder, EMPTY_CELL};
use crate::resolve::SchemaResolver;
use crate::settings::RenderSettings;
use crate::spec::{HttpMethod, Operation, Parameter, ParameterLocation, Schema, SchemaType};
use crate::synth::{default_value, example_from_response, value_to_string, CurlSynthesizer};

use super::styler::{or_dash, Styler};

/// Builds the blocks describing one operation.
pub(crate) struct EndpointSection<'a> {
    pub styler: &'a Styler,
    pub labels: &'a Labels,
    pub settings: &'a RenderSettings,
    pub resolver: SchemaResolver<'a>,
    pub curl: &'a CurlSynthesizer<'a>,
}

impl EndpointSection<'_> {
    /// Description, general table, parameter, body and response tables,
    /// invocation and trailing page break.
    pub fn build(&self, path: &str, method: HttpMethod, op: &Operation) -> Vec<Block> {
        let s = self.styler;
        let l = self.labels;

        let mut blocks = vec![
            s.heading(2, path),
            s.paragraph(l.description_label),
            s.paragraph_or_dash(op.description.as_deref()),
        ];

        let needs_token = op.requires_security() || self.settings.auth_required;
        blocks.push(s.table(
            &[l.field, l.explanation],
            vec![
                vec![l.url.to_string(), path.to_string()],
                vec![l.http_method.to_string(), method.as_str().to_string()],
                vec![l.needs_token.to_string(), yes_no(l, needs_token)],
                vec![l.usage.to_string(), or_dash(op.summary.as_deref())],
            ],
            ColumnOrder::Natural,
        ));

        blocks.extend(self.header_parameters(op));
        blocks.extend(self.query_parameters(op));
        blocks.extend(self.body_parameters(op));
        blocks.extend(self.responses(op));

        blocks.push(s.heading(3, l.curl));
        blocks.push(s.code(self.curl.synthesize(path, method, op)));
        blocks.push(Block::PageBreak);

        blocks
    }

    fn header_parameters(&self, op: &Operation) -> Vec<Block> {
        let l = self.labels;
        let mut rows: Vec<Vec<String>> = op
            .parameters_in(ParameterLocation::Header)
            .map(|p| self.parameter_row(p))
            .collect();

        if self.settings.auth_required {
            let auth = Parameter::new(&self.settings.auth_header_name, ParameterLocation::Header)
                .with_required(true)
                .with_description(EMPTY_CELL)
                .with_schema(
                    Schema::of_type(SchemaType::String)
                        .with_default(self.settings.auth_header_value.clone().into()),
                );
            rows.push(self.parameter_row(&auth));
        }

        self.parameter_table(l.header_parameters, l.header, rows)
    }

    fn query_parameters(&self, op: &Operation) -> Vec<Block> {
        let l = self.labels;
        let rows = op
            .parameters_in(ParameterLocation::Query)
            .map(|p| self.parameter_row(p))
            .collect();
        self.parameter_table(l.query_parameters, l.parameter, rows)
    }

    /// Listed with the name last; never reversed.
    fn parameter_table(&self, heading: &str, name_column: &str, rows: Vec<Vec<String>>) -> Vec<Block> {
        let s = self.styler;
        let l = self.labels;
        let body = if rows.is_empty() {
            s.paragraph(EMPTY_CELL)
        } else {
            s.table(
                &[l.example, l.description, l.required, l.data_type, name_column],
                rows,
                ColumnOrder::PreReversed,
            )
        };
        vec![s.heading(3, heading), body]
    }

    fn parameter_row(&self, p: &Parameter) -> Vec<String> {
        let resolved = self.resolver.resolve_opt(p.schema.as_ref());
        let schema = resolved.as_deref();
        vec![
            default_value(schema),
            or_dash(p.description.as_deref()),
            yes_no(self.labels, p.required),
            or_dash(schema.and_then(Schema::type_name)),
            or_dash(Some(p.name.as_str())),
        ]
    }

    fn body_parameters(&self, op: &Operation) -> Vec<Block> {
        let s = self.styler;
        let l = self.labels;

        let body = match op.request_body().filter(|b| !b.content.is_empty()) {
            Some(body) => body,
            None => return vec![s.heading(3, l.body_parameters), s.paragraph(EMPTY_CELL)],
        };

        let mut blocks = Vec::new();
        for (media_type, media) in &body.content {
            blocks.push(s.heading(3, l.body_parameters));
            blocks.push(s.paragraph(format!(" {} {}", l.body_type, media_type)));

            let schema = self.resolver.resolve_opt(media.schema.as_ref());
            match schema.filter(|resolved| resolved.has_properties()) {
                Some(schema) => {
                    let rows = schema
                        .properties
                        .iter()
                        .map(|(name, prop)| {
                            let prop = self.resolver.resolve(prop);
                            vec![
                                name.clone(),
                                or_dash(prop.type_name()),
                                or_dash(prop.description.as_deref()),
                                prop.example
                                    .as_ref()
                                    .map(value_to_string)
                                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
                                if schema.is_required(name) { "*" } else { "" }.to_string(),
                                EMPTY_CELL.to_string(),
                            ]
                        })
                        .collect();
                    blocks.push(s.table(
                        &[l.field, l.data_type, l.description, l.example, l.required, l.validation],
                        rows,
                        ColumnOrder::Natural,
                    ));
                }
                None => blocks.push(s.paragraph(EMPTY_CELL)),
            }
        }
        blocks
    }

    fn responses(&self, op: &Operation) -> Vec<Block> {
        let s = self.styler;
        let l = self.labels;

        if op.responses().next().is_none() {
            return vec![s.heading(3, l.response_empty), s.paragraph(EMPTY_CELL)];
        }

        let codes = op
            .responses()
            .map(|(code, r)| {
                vec![
                    example_from_response(r),
                    or_dash(r.description.as_deref()),
                    code.to_string(),
                    code.to_string(),
                ]
            })
            .collect();

        let mut fields = Vec::new();
        for (_, response) in op.responses() {
            for media in response.content.values() {
                let Some(schema) = self.resolver.resolve_opt(media.schema.as_ref()) else {
                    continue;
                };
                for (name, prop) in &schema.properties {
                    let prop = self.resolver.resolve(prop);
                    let example = prop.example.as_ref().or(schema.example.as_ref());
                    fields.push(vec![
                        example
                            .map(value_to_string)
                            .unwrap_or_else(|| EMPTY_CELL.to_string()),
                        or_dash(prop.description.as_deref()),
                        or_dash(prop.type_name()),
                        name.clone(),
                    ]);
                }
            }
        }

        vec![
            s.heading(3, l.http_codes),
            s.table(
                &[l.example_response, l.description, l.error_code, l.http_code],
                codes,
                ColumnOrder::Natural,
            ),
            s.heading(3, l.response),
            s.table(
                &[l.example, l.description, l.data_type, l.field],
                fields,
                ColumnOrder::PreReversed,
            ),
        ]
    }
}

fn yes_no(labels: &Labels, flag: bool) -> String {
    let text = if flag { labels.yes } else { labels.no };
    text.to_string()
}
