//! Specification format detection.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

/// Serialization container of a specification or settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecFormat::Json => f.write_str("JSON"),
            SpecFormat::Yaml => f.write_str("YAML"),
        }
    }
}

/// Dialect declared by the document's version field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecDialect {
    /// `openapi: 3.x`
    OpenApi3(String),
    /// `swagger: 2.0`
    Swagger2(String),
    /// No version field found in the header
    Undeclared,
}

/// Number of bytes inspected when sniffing the header.
const SNIFF_LEN: usize = 4096;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)(?:^|[{,])\s*"?(openapi|swagger)"?\s*:\s*["']?([0-9][0-9A-Za-z.\-]*)"#)
            .expect("version regex is valid")
    })
}

/// Detect the container format from a file path.
///
/// The extension decides when it is `.json`, `.yaml` or `.yml`; otherwise
/// the leading bytes are inspected.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SpecFormat> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => return Ok(SpecFormat::Json),
        Some("yaml") | Some("yml") => return Ok(SpecFormat::Yaml),
        _ => {}
    }

    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the container format from the leading bytes of a document.
///
/// A document whose first non-whitespace character is `{` is JSON. Any other
/// non-empty UTF-8 text is treated as YAML.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SpecFormat> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let first = data.iter().find(|b| !b.is_ascii_whitespace());

    match first {
        None => Err(Error::UnknownFormat),
        Some(b'{') => Ok(SpecFormat::Json),
        Some(b'[') => Err(Error::UnknownFormat),
        Some(_) => {
            let head = &data[..data.len().min(SNIFF_LEN)];
            if std::str::from_utf8(head).is_err() && !is_truncated_utf8(head) {
                return Err(Error::UnknownFormat);
            }
            Ok(SpecFormat::Yaml)
        }
    }
}

/// Detect the declared dialect from the leading bytes of a document.
pub fn detect_dialect(data: &[u8]) -> SpecDialect {
    let head = String::from_utf8_lossy(&data[..data.len().min(SNIFF_LEN)]);

    match version_regex().captures(&head) {
        Some(caps) => {
            let version = caps[2].to_string();
            if &caps[1] == "swagger" {
                SpecDialect::Swagger2(version)
            } else {
                SpecDialect::OpenApi3(version)
            }
        }
        None => SpecDialect::Undeclared,
    }
}

/// Check if bytes look like a loadable specification container.
pub fn is_spec_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// A sniffed prefix may cut a multi-byte character in half.
fn is_truncated_utf8(head: &[u8]) -> bool {
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json() {
        let data = b"  \n{\"openapi\": \"3.0.0\"}";
        assert_eq!(detect_format_from_bytes(data).unwrap(), SpecFormat::Json);
    }

    #[test]
    fn test_detect_yaml() {
        let data = b"openapi: 3.1.0\ninfo:\n  title: Demo\n";
        assert_eq!(detect_format_from_bytes(data).unwrap(), SpecFormat::Yaml);
    }

    #[test]
    fn test_detect_empty() {
        assert!(matches!(
            detect_format_from_bytes(b"   \n"),
            Err(Error::UnknownFormat)
        ));
        assert!(!is_spec_bytes(b""));
    }

    #[test]
    fn test_detect_binary() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0xFF, 0xFE, 0x00, 0x81];
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_bom() {
        let data = b"\xEF\xBB\xBF{\"openapi\": \"3.0.0\"}";
        assert_eq!(detect_format_from_bytes(data).unwrap(), SpecFormat::Json);
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(
            detect_dialect(b"{\"openapi\": \"3.0.3\", \"info\": {}}"),
            SpecDialect::OpenApi3("3.0.3".into())
        );
        assert_eq!(
            detect_dialect(b"swagger: '2.0'\ninfo: {}\n"),
            SpecDialect::Swagger2("2.0".into())
        );
        assert_eq!(detect_dialect(b"info:\n  title: x\n"), SpecDialect::Undeclared);
    }

    #[test]
    fn test_detect_from_path_extension() {
        assert_eq!(
            detect_format_from_path("api.JSON").unwrap(),
            SpecFormat::Json
        );
        assert_eq!(detect_format_from_path("api.yml").unwrap(), SpecFormat::Yaml);
    }
}
