//! Configuration loading pipeline
//!
//! [`ConfigLoader::load`] takes an ordered list of sources and produces one
//! immutable [`Configuration`]: each source is evaluated independently into a
//! raw mapping, the mappings deep-merge left to right (later sources override
//! earlier ones at the exact leaf), path references and capability bindings
//! resolve structurally, and the placeholder token is substituted once using
//! the absolute directory of the last — most specific — source. The
//! operation is synchronous and atomic: on any failure the caller gets an
//! error and no partial configuration.

mod merge;
mod parse;
mod resolve;
mod substitute;

pub use resolve::{CONFIG_PATH_KEY, PROJECT_PATH_KEY};
pub use substitute::{CFG_ABS_PATH_TOKEN, substitute};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::binding::{Binding, ProviderRegistry, TYPE_KEY};
use crate::core::context::ProjectContext;
use crate::core::error::{ConfigError, ConfigResult};
use crate::core::hooks::{EXCEPTHOOK_KEY_PATH, ExceptionHookConfig};
use crate::core::path;
use crate::core::source::{ConfigSource, SourceId};
use crate::core::value::{Map, Value};

/// Loads ordered configuration sources into a merged [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    context: ProjectContext,
    registry: ProviderRegistry,
    defaults: Option<Map>,
}

impl ConfigLoader {
    /// Create a loader resolving paths through `context`.
    pub fn new(context: ProjectContext) -> Self {
        Self {
            context,
            registry: ProviderRegistry::new(),
            defaults: None,
        }
    }

    /// Set the provider registry used to resolve capability bindings.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set a defaults mapping merged below the first source.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_defaults(mut self, defaults: Map) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// The project context this loader resolves paths through.
    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    /// Load and merge `sources` in order, later sources overriding earlier
    /// ones at the leaf level.
    ///
    /// Fails with [`ConfigError::SourceNotFound`] for a missing file,
    /// [`ConfigError::Evaluation`] when a source cannot be evaluated into
    /// data, [`ConfigError::InvalidFormat`] when a source's top level is not
    /// a mapping, and [`ConfigError::Resolution`] when nothing was given to
    /// load or a path cannot be resolved.
    pub fn load(&self, sources: &[ConfigSource]) -> ConfigResult<Configuration> {
        if sources.is_empty() && self.defaults.is_none() {
            return Err(ConfigError::resolution(
                "no configuration sources were given",
            ));
        }

        let mut merged = self.defaults.clone().unwrap_or_default();
        let mut source_ids = Vec::with_capacity(sources.len());
        for source in sources {
            let raw = parse::parse_source(source)?;
            debug!(source = %source.id(), sections = raw.len(), "merging configuration source");
            merge::merge_maps(&mut merged, raw);
            source_ids.push(source.id());
        }

        // The last source is the most specific one; its directory anchors
        // both the placeholder token and config_path references.
        let config_dir = match sources.last() {
            Some(last) => self.context.base_dir_of(last)?,
            None => self.context.root().to_path_buf(),
        };

        let resolved = resolve::Resolver::new(&self.context, &self.registry, &config_dir)
            .resolve_tree(merged)?;
        let root = substitute::substitute_map(resolved, &config_dir);

        debug!(
            config_dir = %config_dir.display(),
            sections = root.len(),
            sources = source_ids.len(),
            "configuration loaded"
        );
        Ok(Configuration {
            root,
            config_dir,
            sources: source_ids,
        })
    }
}

/// An immutable, fully merged and substituted configuration.
///
/// Constructed once per [`ConfigLoader::load`]; read-only afterwards, so it
/// can be shared across threads without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    root: Map,
    config_dir: PathBuf,
    sources: Vec<SourceId>,
}

impl Configuration {
    /// Look up a top-level section value.
    pub fn get(&self, section: &str) -> Option<&Value> {
        self.root.get(section)
    }

    /// Look up a value by dotted key path, e.g. `"DM.directions.type"`.
    pub fn get_path(&self, key_path: &str) -> Option<&Value> {
        path::lookup_in(&self.root, key_path)
    }

    /// Check whether a dotted key path is defined.
    pub fn contains(&self, key_path: &str) -> bool {
        self.get_path(key_path).is_some()
    }

    /// View a top-level section as a mapping.
    pub fn section(&self, name: &str) -> Option<&Map> {
        self.root.get(name).and_then(Value::as_map)
    }

    /// Iterate over top-level section names in source order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Look up the capability binding at a dotted key path.
    ///
    /// Accepts either the path of the binding leaf itself (`"ASR.type"`) or
    /// the path of the section holding it (`"ASR"`).
    pub fn binding(&self, key_path: &str) -> Option<&Binding> {
        match self.get_path(key_path)? {
            Value::Binding(binding) => Some(binding),
            Value::Map(section) => section.get(TYPE_KEY)?.as_binding(),
            _ => None,
        }
    }

    /// Parse the exception-hook options at `Logging.excepthook`, if present.
    pub fn exception_hook(&self) -> ConfigResult<Option<ExceptionHookConfig>> {
        match self.get_path(EXCEPTHOOK_KEY_PATH) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => ExceptionHookConfig::from_value(value).map(Some),
        }
    }

    /// Absolute directory of the last source, as used for substitution.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Identities of the sources this configuration was merged from, in
    /// load order.
    pub fn source_ids(&self) -> &[SourceId] {
        &self.sources
    }

    /// The merged top-level mapping.
    pub fn root(&self) -> &Map {
        &self.root
    }
}
