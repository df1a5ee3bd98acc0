//! Parallel conversion of many specification files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;

use super::{ConvertOptions, ConvertResult, Converter};

/// Outcome of converting one input.
#[derive(Debug)]
pub struct BatchItem {
    /// Input path
    pub input: PathBuf,

    /// Conversion result
    pub result: Result<ConvertResult>,
}

impl BatchItem {
    /// Check if the conversion succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Success and failure counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Tally a batch.
    pub fn of(items: &[BatchItem]) -> Self {
        let succeeded = items.iter().filter(|i| i.is_ok()).count();
        Self {
            succeeded,
            failed: items.len() - succeeded,
        }
    }
}

/// Convert every input in parallel.
///
/// Each job loads its own specification and builds with its own copy of the
/// settings. Results keep input order; a failing input never aborts the
/// others.
pub fn convert_batch<P: AsRef<Path> + Sync>(
    converter: &Converter,
    inputs: &[P],
    options: &ConvertOptions,
) -> Vec<BatchItem> {
    inputs
        .par_iter()
        .map(|input| {
            let input = input.as_ref();
            let job = options.clone();
            let result = converter.convert_file(input, &job);
            if let Err(ref e) = result {
                log::warn!("Failed to convert {}: {}", input.display(), e);
            }
            BatchItem {
                input: input.to_path_buf(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_convert_batch_mixed() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        let missing = dir.path().join("missing.yaml");
        fs::write(
            &good,
            r#"{"openapi":"3.0.1","info":{"title":"A","version":"1"},"paths":{}}"#,
        )
        .unwrap();
        fs::write(&bad, "{ broken").unwrap();

        let converter = Converter::new();
        let items = convert_batch(
            &converter,
            &[good.clone(), bad.clone(), missing.clone()],
            &ConvertOptions::new(),
        );

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].input, good);
        assert!(items[0].is_ok());
        assert!(!items[1].is_ok());
        assert!(!items[2].is_ok());
        assert_eq!(
            BatchSummary::of(&items),
            BatchSummary {
                succeeded: 1,
                failed: 2
            }
        );
    }
}
