//! Error types for specdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for specdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading a specification or producing a document.
///
/// Only load-time failures abort a build. Unresolved references, unparseable
/// changelogs and missing examples degrade locally and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither JSON nor YAML.
    #[error("Unknown file format: not a JSON or YAML document")]
    UnknownFormat,

    /// The specification dialect or version is not supported.
    #[error("Unsupported specification version: {0}")]
    UnsupportedVersion(String),

    /// The specification could not be parsed into the object model.
    #[error("Failed to load specification: {0}")]
    SpecLoad(String),

    /// A settings file could not be parsed.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// No renderer is registered under the requested name.
    #[error("No renderer registered for: {0}")]
    UnknownRenderer(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SpecLoad(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SpecLoad(err.to_string())
    }
}
