//! Changelog section.

use serde_json::Value;

use crate::labels::Labels;
use crate::model::{Block, ColumnOrder, EMPTY_CELL};
use crate::synth::value_to_string;

use super::styler::Styler;

/// One changelog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: String,
    pub developer: String,
    pub notes: String,
}

/// Parse changelog text as a JSON array of entry objects.
///
/// Returns `None` for invalid JSON, a non-array root or any non-object item.
/// Missing or null fields become `-`.
pub fn parse_changelog(text: &str) -> Option<Vec<ChangelogEntry>> {
    let items = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::debug!("Changelog is not a JSON array; rendering as text");
            return None;
        }
        Err(e) => {
            log::debug!("Changelog is not valid JSON ({}); rendering as text", e);
            return None;
        }
    };

    items
        .iter()
        .map(|item| {
            let object = item.as_object()?;
            let field = |key: &str| match object.get(key) {
                None | Some(Value::Null) => EMPTY_CELL.to_string(),
                Some(value) => value_to_string(value),
            };
            Some(ChangelogEntry {
                version: field("version"),
                date: field("date"),
                developer: field("developer"),
                notes: field("notes"),
            })
        })
        .collect()
}

/// Blocks for the changelog body (heading and page break excluded).
pub fn changelog_blocks(text: Option<&str>, styler: &Styler, labels: &Labels) -> Vec<Block> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return vec![styler.paragraph(EMPTY_CELL)],
    };

    match parse_changelog(text) {
        Some(entries) => {
            let rows = entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| vec![(i + 1).to_string(), e.version, e.date, e.developer, e.notes])
                .collect();
            vec![styler.table(
                &[
                    labels.row,
                    labels.version,
                    labels.date,
                    labels.developer,
                    labels.notes,
                ],
                rows,
                ColumnOrder::Natural,
            )]
        }
        None => vec![styler.paragraph(text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RenderSettings;

    #[test]
    fn test_parse_changelog() {
        let entries = parse_changelog(
            r#"[{"version": 2, "date": "2024-02-01", "developer": null, "notes": "fix"}]"#,
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![ChangelogEntry {
                version: "2".into(),
                date: "2024-02-01".into(),
                developer: "-".into(),
                notes: "fix".into(),
            }]
        );
    }

    #[test]
    fn test_parse_changelog_mismatch() {
        assert!(parse_changelog("not json").is_none());
        assert!(parse_changelog(r#"{"version": "1"}"#).is_none());
        assert!(parse_changelog(r#"[{"version": "1"}, "loose"]"#).is_none());
        assert_eq!(parse_changelog("[]"), Some(vec![]));
    }

    #[test]
    fn test_blank_changelog() {
        let styler = Styler::new(&RenderSettings::new().normalized());
        let blocks = changelog_blocks(Some("   "), &styler, &Labels::default());
        assert_eq!(blocks, vec![styler.paragraph("-")]);
    }
}
