//! Configuration source definitions

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Stable identity of a configuration source, used in errors and logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Create a source identifier from any displayable name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&Path> for SourceId {
    fn from(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

/// Configuration source type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Configuration file; format detected from the extension
    File(PathBuf),

    /// Inline configuration text with an explicit format
    Inline {
        /// Name reported in errors and logs
        name: String,
        /// Format of the inline text
        format: ConfigFormat,
        /// The configuration text itself
        text: String,
    },
}

impl ConfigSource {
    /// Create a file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Create an inline source with an explicit format.
    pub fn inline(
        name: impl Into<String>,
        format: ConfigFormat,
        text: impl Into<String>,
    ) -> Self {
        Self::Inline {
            name: name.into(),
            format,
            text: text.into(),
        }
    }

    /// Check if this source is file-based.
    pub fn is_file_based(&self) -> bool {
        matches!(self, ConfigSource::File(_))
    }

    /// Identity of this source for errors and logs.
    pub fn id(&self) -> SourceId {
        match self {
            ConfigSource::File(path) => SourceId::from(path.as_path()),
            ConfigSource::Inline { name, .. } => SourceId::new(name.clone()),
        }
    }

    /// Format this source will be parsed as.
    pub fn format(&self) -> ConfigFormat {
        match self {
            ConfigSource::File(path) => ConfigFormat::from_path(path),
            ConfigSource::Inline { format, .. } => format.clone(),
        }
    }

    /// Get the source kind name for display.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigSource::File(_) => "file",
            ConfigSource::Inline { .. } => "inline",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "file: {}", path.display()),
            ConfigSource::Inline { name, format, .. } => {
                write!(f, "inline: {name} ({format})")
            }
        }
    }
}

/// Configuration format
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// JSON format
    Json,

    /// TOML format
    Toml,

    /// YAML format
    Yaml,

    /// Unknown format
    Unknown(String),
}

impl ConfigFormat {
    /// Get file extension for this format.
    pub fn extension(&self) -> &str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yml",
            ConfigFormat::Unknown(ext) => ext,
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => ConfigFormat::Json,
            "toml" => ConfigFormat::Toml,
            "yml" | "yaml" => ConfigFormat::Yaml,
            _ => ConfigFormat::Unknown(ext.to_string()),
        }
    }

    /// Detect format from file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(ConfigFormat::Unknown("no_extension".to_string()))
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Unknown(s) => write!(f, "Unknown ({s})"),
        }
    }
}
