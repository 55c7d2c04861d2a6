//! Project-rooted path resolution
//!
//! Path resolution is an explicit context value handed to the loader, not
//! ambient process state: construct a [`ProjectContext`] once and pass it
//! where it is needed. [`ProjectContext::as_project_path`] is the helper
//! surface external collaborators use to anchor project-relative paths.

use std::env;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::source::ConfigSource;

/// Environment variable naming the project root for [`ProjectContext::from_env`].
pub const PROJECT_ROOT_ENV: &str = "PARLANCE_ROOT";

/// Explicit project-root context for path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    /// Create a context rooted at `root`.
    ///
    /// Relative roots are anchored at the current working directory. The root
    /// is normalized lexically; no I/O is performed and the directory does
    /// not have to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> ConfigResult<Self> {
        let root = root.into();
        let absolute = if root.is_absolute() {
            root
        } else {
            let cwd = env::current_dir().map_err(|e| {
                ConfigError::resolution(format!("cannot determine current directory: {e}"))
            })?;
            cwd.join(root)
        };
        let root = normalize(&absolute);
        debug!(root = %root.display(), "project context created");
        Ok(Self { root })
    }

    /// Create a context from the `PARLANCE_ROOT` environment variable.
    pub fn from_env() -> ConfigResult<Self> {
        match env::var(PROJECT_ROOT_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Err(ConfigError::resolution(format!(
                "project root cannot be determined: {PROJECT_ROOT_ENV} is undefined or empty"
            ))),
        }
    }

    /// The absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build an absolute path from a project-root-relative one.
    ///
    /// Pure path computation: no I/O, no existence check. An absolute input
    /// is returned normalized, unanchored.
    #[must_use]
    pub fn as_project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        normalize(&self.root.join(relative.as_ref()))
    }

    /// [`Self::as_project_path`] plus an existence check on the result.
    pub fn as_existing_project_path(&self, relative: impl AsRef<Path>) -> ConfigResult<PathBuf> {
        let path = self.as_project_path(relative);
        if path.exists() {
            Ok(path)
        } else {
            Err(ConfigError::resolution_at(
                "resolved project path does not exist",
                path,
            ))
        }
    }

    /// Absolute directory that anchors relative references for `source`.
    ///
    /// For file sources this is the canonicalized directory containing the
    /// file; inline sources have no containing directory, so the project root
    /// anchors them.
    pub(crate) fn base_dir_of(&self, source: &ConfigSource) -> ConfigResult<PathBuf> {
        match source {
            ConfigSource::File(path) => {
                let parent = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                if let Ok(canonical) = parent.canonicalize() {
                    return Ok(canonical);
                }
                let absolute = if parent.is_absolute() {
                    parent
                } else {
                    let cwd = env::current_dir().map_err(|e| {
                        ConfigError::resolution(format!(
                            "cannot determine current directory: {e}"
                        ))
                    })?;
                    cwd.join(parent)
                };
                Ok(normalize(&absolute))
            }
            ConfigSource::Inline { .. } => Ok(self.root.clone()),
        }
    }
}

/// Lexical path cleanup: drops `.` segments and folds `..` into the segment
/// before it. Never touches the filesystem, so symlinks are not resolved.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
