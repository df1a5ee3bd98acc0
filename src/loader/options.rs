//! Loading options and configuration.

use crate::detect::SpecFormat;

/// Options for loading specifications.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Force a container format instead of sniffing it
    pub format: Option<SpecFormat>,

    /// Resolve component-backed parameters, bodies and responses after loading
    pub link_components: bool,

    /// Merge path-level parameters into each operation
    pub merge_path_parameters: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (accept documents without a version field).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Force the container format.
    pub fn with_format(mut self, format: SpecFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enable or disable component linking.
    pub fn with_linking(mut self, link: bool) -> Self {
        self.link_components = link;
        self
    }

    /// Enable or disable path-level parameter merging.
    pub fn with_path_parameters(mut self, merge: bool) -> Self {
        self.merge_path_parameters = merge;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            format: None,
            link_components: true,
            merge_path_parameters: true,
        }
    }
}

/// Error handling mode during loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Require an `openapi` version field
    #[default]
    Strict,
    /// Accept documents that do not declare a version
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new()
            .lenient()
            .with_format(SpecFormat::Yaml)
            .with_linking(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.format, Some(SpecFormat::Yaml));
        assert!(!options.link_components);
        assert!(options.merge_path_parameters);
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.link_components);
        assert!(options.format.is_none());
    }
}
