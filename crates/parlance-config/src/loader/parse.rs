//! Per-source parsing into raw value trees
//!
//! Each source is evaluated independently: read, parsed by format, and
//! checked to be a mapping at the top level. Every failure carries the
//! identity of the offending source.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::source::{ConfigFormat, ConfigSource, SourceId};
use crate::core::value::{Map, Value};

/// Evaluate one source into its raw top-level mapping.
pub(crate) fn parse_source(source: &ConfigSource) -> ConfigResult<Map> {
    let id = source.id();
    let value = match source {
        ConfigSource::File(path) => {
            let text = read_file(path, &id)?;
            parse_text(&text, &ConfigFormat::from_path(path), &id)?
        }
        ConfigSource::Inline { format, text, .. } => parse_text(text, format, &id)?,
    };
    debug!(source = %id, "configuration source evaluated");
    into_top_level_map(value, &id)
}

fn read_file(path: &Path, id: &SourceId) -> ConfigResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ConfigError::source_not_found(id.clone()))
        }
        Err(e) => Err(ConfigError::read(id.clone(), e.to_string())),
    }
}

// ==================== Standalone parsing functions ====================

/// Parse configuration text based on format.
pub(crate) fn parse_text(text: &str, format: &ConfigFormat, id: &SourceId) -> ConfigResult<Value> {
    match format {
        ConfigFormat::Json => {
            let json: serde_json::Value = serde_json::from_str(text)
                .map_err(|e| ConfigError::evaluation(id.clone(), format!("JSON parse error: {e}")))?;
            Ok(Value::from_json(json))
        }
        ConfigFormat::Toml => {
            let json: serde_json::Value = toml::from_str(text)
                .map_err(|e| ConfigError::evaluation(id.clone(), format!("TOML parse error: {e}")))?;
            Ok(Value::from_json(json))
        }
        ConfigFormat::Yaml => parse_yaml(text, id),
        ConfigFormat::Unknown(ext) => Err(ConfigError::evaluation(
            id.clone(),
            format!("unsupported configuration format: {ext}"),
        )),
    }
}

/// Parse YAML text into a value tree.
fn parse_yaml(text: &str, id: &SourceId) -> ConfigResult<Value> {
    use yaml_rust2::YamlLoader;

    let docs = YamlLoader::load_from_str(text)
        .map_err(|e| ConfigError::evaluation(id.clone(), format!("YAML parse error: {e}")))?;

    // An empty document reads as an empty mapping, like an empty TOML file.
    if docs.is_empty() {
        return Ok(Value::Map(Map::new()));
    }

    yaml_to_value(&docs[0], id)
}

/// Convert a YAML node to a configuration value.
fn yaml_to_value(yaml: &yaml_rust2::Yaml, id: &SourceId) -> ConfigResult<Value> {
    use yaml_rust2::Yaml;

    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Boolean(b) => Ok(Value::Bool(*b)),
        Yaml::Integer(i) => Ok(Value::Integer(*i)),
        Yaml::Real(s) => {
            if let Ok(num) = s.parse::<f64>() {
                Ok(Value::Float(num))
            } else {
                Ok(Value::String(s.clone()))
            }
        }
        Yaml::String(s) => Ok(Value::String(s.clone())),
        Yaml::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(yaml_to_value(item, id)?);
            }
            Ok(Value::Array(values))
        }
        Yaml::Hash(hash) => {
            let mut map = Map::with_capacity(hash.len());
            for (key, value) in hash {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Integer(i) => i.to_string(),
                    _ => {
                        return Err(ConfigError::evaluation(
                            id.clone(),
                            "invalid key type in YAML mapping",
                        ));
                    }
                };
                map.insert(key, yaml_to_value(value, id)?);
            }
            Ok(Value::Map(map))
        }
        Yaml::BadValue => Err(ConfigError::evaluation(
            id.clone(),
            "bad YAML value encountered",
        )),
        _ => Err(ConfigError::evaluation(id.clone(), "unsupported YAML type")),
    }
}

fn into_top_level_map(value: Value, id: &SourceId) -> ConfigResult<Map> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(ConfigError::invalid_format(id.clone(), other.kind())),
    }
}
