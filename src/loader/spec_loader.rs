//! OpenAPI document loader using serde_json and serde_yaml.

use std::io::Read;
use std::path::Path;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::detect::{detect_dialect, detect_format_from_bytes, SpecDialect, SpecFormat};
use crate::error::{Error, Result};
use crate::spec::Specification;

use super::link::{has_linkable_components, link_specification};
use super::options::{ErrorMode, LoadOptions};

/// OpenAPI document loader.
pub struct SpecLoader {
    data: Vec<u8>,
    format: SpecFormat,
    options: LoadOptions,
}

impl SpecLoader {
    /// Open a specification file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, LoadOptions::default())
    }

    /// Open a specification file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        // Extension wins over sniffing for files
        let options = match (options.format, path.extension().and_then(|e| e.to_str())) {
            (None, Some(ext)) if ext.eq_ignore_ascii_case("json") => {
                options.with_format(SpecFormat::Json)
            }
            (None, Some(ext)) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                options.with_format(SpecFormat::Yaml)
            }
            _ => options,
        };

        log::debug!("Loading specification from {}", path.display());
        Self::from_vec(data, options)
    }

    /// Load a specification from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, LoadOptions::default())
    }

    /// Load a specification from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: LoadOptions) -> Result<Self> {
        Self::from_vec(data.to_vec(), options)
    }

    /// Load a specification from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, LoadOptions::default())
    }

    /// Load a specification from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: LoadOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data, options)
    }

    fn from_vec(data: Vec<u8>, options: LoadOptions) -> Result<Self> {
        let format = match options.format {
            Some(format) => format,
            None => detect_format_from_bytes(&data)?,
        };

        Ok(Self {
            data,
            format,
            options,
        })
    }

    /// Container format of the loaded bytes.
    pub fn format(&self) -> SpecFormat {
        self.format
    }

    /// Dialect declared in the document header.
    pub fn dialect(&self) -> SpecDialect {
        detect_dialect(&self.data)
    }

    /// Parse the document into a linked [`Specification`].
    pub fn load(&self) -> Result<Specification> {
        if let SpecDialect::Swagger2(version) = self.dialect() {
            return Err(Error::UnsupportedVersion(format!("swagger {}", version)));
        }

        let value = match self.format {
            SpecFormat::Json => serde_json::from_slice::<Value>(strip_bom(&self.data))?,
            SpecFormat::Yaml => {
                let yaml: YamlValue = serde_yaml::from_slice(strip_bom(&self.data))?;
                yaml_to_json(yaml)?
            }
        };

        if !value.is_object() {
            return Err(Error::SpecLoad(
                "document root must be a mapping".to_string(),
            ));
        }

        let mut spec: Specification = serde_json::from_value(value)?;
        self.check_version(&spec)?;

        if self.options.link_components || self.options.merge_path_parameters {
            if self.options.link_components && !has_linkable_components(&spec.components) {
                log::debug!("No component parameters, request bodies or responses to link");
            }
            link_specification(&mut spec, &self.options);
        }

        log::info!(
            "Loaded {} specification {} ({} paths, {} operations, {} schemas)",
            self.format,
            spec.openapi.as_deref().unwrap_or("(undeclared)"),
            spec.paths.len(),
            spec.operation_count(),
            spec.components.schemas.len()
        );

        Ok(spec)
    }

    fn check_version(&self, spec: &Specification) -> Result<()> {
        match spec.openapi.as_deref() {
            Some(version) if version.trim_start().starts_with('3') => Ok(()),
            Some(version) => Err(Error::UnsupportedVersion(format!("openapi {}", version))),
            None if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Specification declares no openapi version; continuing in lenient mode");
                Ok(())
            }
            None => Err(Error::SpecLoad(
                "missing required field `openapi`".to_string(),
            )),
        }
    }
}

/// Load a specification file without blocking the runtime.
#[cfg(feature = "async")]
pub async fn load_file_async<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Specification> {
    let data = tokio::fs::read(path.as_ref()).await?;
    SpecLoader::from_vec(data, options)?.load()
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}

/// Convert a YAML tree into a JSON tree.
///
/// Scalar mapping keys are stringified so that status codes written as bare
/// integers (`200:`) still match string-keyed maps.
fn yaml_to_json(value: YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(Error::SpecLoad(format!(
            "unsupported mapping key: {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::HttpMethod;

    const YAML_SPEC: &str = r#"
openapi: 3.0.3
info:
  title: Pets
  version: "1.2"
paths:
  /pets:
    get:
      summary: List pets
      responses:
        200:
          description: OK
"#;

    #[test]
    fn test_load_yaml_with_integer_status_keys() {
        let loader = SpecLoader::from_bytes(YAML_SPEC.as_bytes()).unwrap();
        assert_eq!(loader.format(), SpecFormat::Yaml);

        let spec = loader.load().unwrap();
        assert_eq!(spec.info.title.as_deref(), Some("Pets"));
        let op = &spec.paths["/pets"].operations[&HttpMethod::Get];
        assert_eq!(op.responses().next().map(|(code, _)| code), Some("200"));
    }

    #[test]
    fn test_load_json() {
        let data = br#"{"openapi": "3.1.0", "info": {"title": "X"}, "paths": {}}"#;
        let spec = SpecLoader::from_bytes(data).unwrap().load().unwrap();
        assert_eq!(spec.openapi.as_deref(), Some("3.1.0"));
    }

    #[test]
    fn test_swagger_rejected() {
        let data = b"swagger: '2.0'\ninfo:\n  title: Old\npaths: {}\n";
        let err = SpecLoader::from_bytes(data).unwrap().load().unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(_)));
    }

    #[test]
    fn test_missing_version_strict_vs_lenient() {
        let data = b"info:\n  title: Bare\npaths: {}\n";

        let err = SpecLoader::from_bytes(data).unwrap().load().unwrap_err();
        assert!(matches!(err, Error::SpecLoad(_)));

        let spec = SpecLoader::from_bytes_with_options(data, LoadOptions::new().lenient())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(spec.info.title.as_deref(), Some("Bare"));
    }

    #[test]
    fn test_malformed_json_is_load_failure() {
        let err = SpecLoader::from_bytes(b"{\"openapi\": ")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::SpecLoad(_)));
    }

    #[test]
    fn test_scalar_root_rejected() {
        let err = SpecLoader::from_bytes(b"just a string")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::SpecLoad(_)));
    }

    #[test]
    fn test_from_reader() {
        let cursor = std::io::Cursor::new(YAML_SPEC.as_bytes().to_vec());
        let spec = SpecLoader::from_reader(cursor).unwrap().load().unwrap();
        assert_eq!(spec.operation_count(), 1);
    }
}
