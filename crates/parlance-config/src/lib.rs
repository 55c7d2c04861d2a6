//! Parlance Config - configuration core for the Parlance dialogue framework
//!
//! A Parlance deployment wires pluggable components (speech recognition,
//! dialogue management, speech synthesis) together through layered
//! configuration files. This crate owns the loading semantics: ordered
//! sources deep-merge left to right, capability selections resolve against
//! an explicit provider registry, and the `{cfg_abs_path}` placeholder is
//! substituted with the absolute directory of the most specific source.
//!
//! # Example
//!
//! ```rust,no_run
//! use parlance_config::prelude::*;
//!
//! fn main() -> ConfigResult<()> {
//!     // Providers this deployment knows how to instantiate.
//!     let registry = ProviderRegistry::new()
//!         .with(ProviderSpec::new("google_asr", Capability::SpeechRecognizer))
//!         .with(ProviderSpec::new("flite", Capability::SpeechSynthesizer));
//!
//!     // Later sources override earlier ones at the leaf level.
//!     let config = ConfigLoader::new(ProjectContext::new("/opt/parlance")?)
//!         .with_registry(registry)
//!         .load(&[
//!             ConfigSource::file("/opt/parlance/resources/default.toml"),
//!             ConfigSource::file("/opt/parlance/private/site.toml"),
//!         ])?;
//!
//!     if let Some(binding) = config.binding("ASR") {
//!         println!("ASR handled by {}", binding.provider());
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Core module with the value model and supporting types
pub mod core;

// Loading pipeline: parse, merge, resolve, substitute
pub mod loader;

// Re-export main types from core
pub use crate::core::{
    Binding, Capability, ConfigError, ConfigFormat, ConfigResult, ConfigSource, ErrorCategory,
    ExceptionHookConfig, HookKind, Map, ProjectContext, ProviderId, ProviderRegistry, ProviderSpec,
    SourceId, Value,
};

// Re-export the loader surface
pub use crate::loader::{ConfigLoader, Configuration, substitute};

// Reserved names recognized inside configuration trees
pub use crate::core::{EXCEPTHOOK_KEY_PATH, PROJECT_ROOT_ENV, TYPE_KEY};
pub use crate::loader::{CFG_ABS_PATH_TOKEN, CONFIG_PATH_KEY, PROJECT_PATH_KEY};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude for common imports
    //!
    //! # Example
    //! ```rust
    //! use parlance_config::prelude::*;
    //! ```

    // Core types
    pub use crate::core::{
        Binding, Capability, ConfigError, ConfigFormat, ConfigResult, ConfigSource,
        ExceptionHookConfig, HookKind, Map, ProjectContext, ProviderId, ProviderRegistry,
        ProviderSpec, SourceId, Value,
    };

    // Loading pipeline
    pub use crate::loader::{CFG_ABS_PATH_TOKEN, ConfigLoader, Configuration};
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::prelude::*;

    #[test]
    fn test_prelude_covers_the_load_pipeline() {
        let registry = ProviderRegistry::new().with(ProviderSpec::new(
            "google_directions",
            Capability::DirectionsFinder,
        ));
        let context = ProjectContext::new("/opt/parlance").expect("absolute root");
        let loader = ConfigLoader::new(context).with_registry(registry);

        let config = loader
            .load(&[ConfigSource::inline(
                "boot",
                ConfigFormat::Yaml,
                concat!(
                    "DM:\n",
                    "  directions:\n",
                    "    type: google_directions\n",
                    "    google_directions:\n",
                    "      maps_dir: '{cfg_abs_path}/maps'\n",
                ),
            )])
            .expect("load succeeds");

        let binding = config.binding("DM.directions").expect("binding resolved");
        assert_eq!(binding.provider().as_str(), "google_directions");
        assert_eq!(
            binding.param("maps_dir"),
            Some(&Value::string("/opt/parlance/maps"))
        );
    }

    #[test]
    fn test_reserved_names_are_exported() {
        assert_eq!(crate::CFG_ABS_PATH_TOKEN, "{cfg_abs_path}");
        assert_eq!(crate::TYPE_KEY, "type");
        assert_eq!(crate::PROJECT_ROOT_ENV, "PARLANCE_ROOT");
        assert_eq!(crate::EXCEPTHOOK_KEY_PATH, "Logging.excepthook");
    }
}
