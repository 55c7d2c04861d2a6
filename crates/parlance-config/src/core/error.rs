//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

use crate::core::source::SourceId;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error raised by configuration loading and path resolution.
///
/// Every variant surfaces synchronously from [`crate::ConfigLoader::load`] or
/// the [`crate::ProjectContext`] helpers; nothing is retried internally and no
/// partial configuration escapes a failed load.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration source missing
    #[error("configuration source not found: {source_id}")]
    SourceNotFound {
        /// Identity of the missing source
        source_id: SourceId,
    },

    /// Configuration source exists but could not be read
    #[error("failed to read configuration source {source_id}: {message}")]
    Read {
        /// Identity of the unreadable source
        source_id: SourceId,
        /// Underlying I/O error message
        message: String,
    },

    /// Configuration source could not be evaluated into data
    #[error("failed to evaluate {source_id}: {message}")]
    Evaluation {
        /// Identity of the offending source
        source_id: SourceId,
        /// Underlying cause (parser message, unknown format, bad option value)
        message: String,
    },

    /// Top-level value of a source is not a mapping
    #[error("configuration source {source_id} must evaluate to a mapping at the top level, found {found}")]
    InvalidFormat {
        /// Identity of the offending source
        source_id: SourceId,
        /// Kind of value actually found at the top level
        found: &'static str,
    },

    /// Project root or path resolution failed
    #[error("path resolution failed: {message}")]
    Resolution {
        /// What could not be resolved
        message: String,
        /// Path involved, when one exists
        path: Option<PathBuf>,
    },
}

impl ConfigError {
    /// Create a source not found error.
    pub fn source_not_found(source_id: impl Into<SourceId>) -> Self {
        Self::SourceNotFound {
            source_id: source_id.into(),
        }
    }

    /// Create a read error.
    pub fn read(source_id: impl Into<SourceId>, message: impl Into<String>) -> Self {
        Self::Read {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create an evaluation error.
    pub fn evaluation(source_id: impl Into<SourceId>, message: impl Into<String>) -> Self {
        Self::Evaluation {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(source_id: impl Into<SourceId>, found: &'static str) -> Self {
        Self::InvalidFormat {
            source_id: source_id.into(),
            found,
        }
    }

    /// Create a resolution error.
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            path: None,
        }
    }

    /// Create a resolution error carrying the offending path.
    pub fn resolution_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Resolution {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Check if the error is due to a missing source.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, ConfigError::SourceNotFound { .. })
    }

    /// Identity of the source that produced this error, when one exists.
    pub fn source_id(&self) -> Option<&SourceId> {
        match self {
            ConfigError::SourceNotFound { source_id }
            | ConfigError::Read { source_id, .. }
            | ConfigError::Evaluation { source_id, .. }
            | ConfigError::InvalidFormat { source_id, .. } => Some(source_id),
            ConfigError::Resolution { .. } => None,
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::SourceNotFound { .. } => ErrorCategory::MissingSource,
            ConfigError::Read { .. } => ErrorCategory::Io,
            ConfigError::Evaluation { .. } => ErrorCategory::Evaluation,
            ConfigError::InvalidFormat { .. } => ErrorCategory::Format,
            ConfigError::Resolution { .. } => ErrorCategory::Resolution,
        }
    }
}

/// Error category for grouping errors
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Source file or module missing
    MissingSource,
    /// I/O error
    Io,
    /// Source could not be evaluated into data
    Evaluation,
    /// Top-level shape is wrong
    Format,
    /// Path or project root resolution failed
    Resolution,
}
