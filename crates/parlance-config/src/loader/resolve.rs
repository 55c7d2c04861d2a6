//! Structural resolution of path references and capability bindings
//!
//! Runs once over the merged tree, before placeholder substitution:
//!
//! - a single-key mapping `{ config_path = "…" }` or `{ project_path = "…" }`
//!   becomes a typed [`Value::Path`], anchored at the configuration directory
//!   or the project root respectively;
//! - a mapping whose reserved `type` key names a registered provider has that
//!   key upgraded to a [`Value::Binding`], absorbing the provider-named
//!   sibling mapping as the binding's parameters.
//!
//! Selections naming an unregistered provider stay plain strings: the
//! section set is open and resolution must not reject what it does not know.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::binding::{Binding, ProviderRegistry, ProviderSpec, TYPE_KEY};
use crate::core::context::{ProjectContext, normalize};
use crate::core::error::ConfigResult;
use crate::core::value::{Map, Value};

/// Reserved single-key form anchoring a relative path at the configuration
/// directory.
pub const CONFIG_PATH_KEY: &str = "config_path";

/// Reserved single-key form anchoring a relative path at the project root.
pub const PROJECT_PATH_KEY: &str = "project_path";

pub(crate) struct Resolver<'a> {
    context: &'a ProjectContext,
    registry: &'a ProviderRegistry,
    base_dir: &'a Path,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        context: &'a ProjectContext,
        registry: &'a ProviderRegistry,
        base_dir: &'a Path,
    ) -> Self {
        Self {
            context,
            registry,
            base_dir,
        }
    }

    /// Resolve the merged top-level mapping.
    pub(crate) fn resolve_tree(&self, root: Map) -> ConfigResult<Map> {
        self.resolve_map(root)
    }

    fn resolve_value(&self, value: Value) -> ConfigResult<Value> {
        match value {
            Value::Map(map) => {
                if let Some(path) = self.as_path_reference(&map) {
                    return Ok(Value::Path(path));
                }
                Ok(Value::Map(self.resolve_map(map)?))
            }
            Value::Array(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    resolved.push(self.resolve_value(item)?);
                }
                Ok(Value::Array(resolved))
            }
            other => Ok(other),
        }
    }

    fn resolve_map(&self, mut map: Map) -> ConfigResult<Map> {
        let selected = match map.get(TYPE_KEY) {
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        };

        let mut binding = None;
        if let Some(name) = selected {
            match self.registry.get(&name) {
                Some(spec) => {
                    let spec = spec.clone();
                    let params = self.absorb_params(&mut map, &spec)?;
                    debug!(
                        provider = %spec.id(),
                        capability = %spec.capability(),
                        "capability binding resolved"
                    );
                    binding = Some(Binding::new(
                        spec.capability().clone(),
                        spec.id().clone(),
                        params,
                    ));
                }
                None => {
                    warn!(provider = %name, "selected provider is not registered; keeping plain value");
                }
            }
        }

        let mut resolved = Map::with_capacity(map.len());
        for (key, value) in map {
            if key == TYPE_KEY && let Some(chosen) = binding.take() {
                resolved.insert(key, Value::Binding(chosen));
                continue;
            }
            resolved.insert(key, self.resolve_value(value)?);
        }
        Ok(resolved)
    }

    /// Remove the provider-named sibling mapping and resolve it into the
    /// binding's parameters.
    ///
    /// Only an actual mapping is absorbed; any other value under the
    /// provider's name stays in the section untouched.
    fn absorb_params(&self, map: &mut Map, spec: &ProviderSpec) -> ConfigResult<Map> {
        match map.get(spec.id().as_str()) {
            Some(Value::Map(_)) => {
                if let Some(Value::Map(params)) = map.shift_remove(spec.id().as_str()) {
                    self.resolve_map(params)
                } else {
                    Ok(Map::new())
                }
            }
            Some(other) => {
                warn!(
                    provider = %spec.id(),
                    found = other.kind(),
                    "provider parameter block is not a mapping; left in place"
                );
                Ok(Map::new())
            }
            None => Ok(Map::new()),
        }
    }

    /// Recognize the reserved single-key path-reference forms.
    fn as_path_reference(&self, map: &Map) -> Option<PathBuf> {
        if map.len() != 1 {
            return None;
        }
        let (key, value) = map.get_index(0)?;
        let relative = value.as_str()?;
        match key.as_str() {
            CONFIG_PATH_KEY => Some(anchor(self.base_dir, relative)),
            PROJECT_PATH_KEY => Some(self.context.as_project_path(relative)),
            _ => None,
        }
    }
}

fn anchor(base: &Path, relative: &str) -> PathBuf {
    let relative = Path::new(relative);
    if relative.is_absolute() {
        normalize(relative)
    } else {
        normalize(&base.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::core::binding::Capability;

    fn fixture_registry() -> ProviderRegistry {
        ProviderRegistry::new()
            .with(ProviderSpec::new("google_asr", Capability::SpeechRecognizer))
            .with(ProviderSpec::new(
                "google_directions",
                Capability::DirectionsFinder,
            ))
    }

    fn resolve(registry: &ProviderRegistry, json: serde_json::Value) -> Map {
        let context = ProjectContext::new("/opt/parlance").expect("root");
        let raw = Value::from_json(json).into_map().expect("mapping fixture");
        Resolver::new(&context, registry, Path::new("/etc/parlance"))
            .resolve_tree(raw)
            .expect("resolution succeeds")
    }

    #[test]
    fn test_registered_type_becomes_binding_and_absorbs_params() {
        let registry = fixture_registry();
        let root = Value::Map(resolve(
            &registry,
            json!({
                "ASR": {
                    "debug": true,
                    "type": "google_asr",
                    "google_asr": { "language": "en", "mode": "dictation" }
                }
            }),
        ));

        let binding = root
            .get_path("ASR.type")
            .and_then(Value::as_binding)
            .expect("binding resolved");
        assert_eq!(binding.provider().as_str(), "google_asr");
        assert_eq!(binding.capability(), &Capability::SpeechRecognizer);
        assert_eq!(binding.param("language"), Some(&Value::string("en")));

        // The params block was absorbed; the section keeps its other settings.
        assert_eq!(root.get_path("ASR.google_asr"), None);
        assert_eq!(root.get_path("ASR.debug"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_unregistered_type_stays_plain_string() {
        let registry = fixture_registry();
        let root = Value::Map(resolve(
            &registry,
            json!({ "TTS": { "type": "flite", "flite": { "voice": "slt" } } }),
        ));

        assert_eq!(root.get_path("TTS.type"), Some(&Value::string("flite")));
        // Nothing was absorbed either.
        assert_eq!(root.get_path("TTS.flite.voice"), Some(&Value::string("slt")));
    }

    #[test]
    fn test_non_mapping_provider_sibling_is_left_in_place() {
        let registry = fixture_registry();
        let root = Value::Map(resolve(
            &registry,
            json!({ "ASR": { "type": "google_asr", "google_asr": "not-params" } }),
        ));

        let binding = root
            .get_path("ASR.type")
            .and_then(Value::as_binding)
            .expect("binding resolved");
        assert!(binding.params().is_empty());
        assert_eq!(
            root.get_path("ASR.google_asr"),
            Some(&Value::string("not-params"))
        );
    }

    #[test]
    fn test_unselected_provider_block_stays_inert() {
        let registry = fixture_registry()
            .with(ProviderSpec::new("kaldi", Capability::SpeechRecognizer));
        let root = Value::Map(resolve(
            &registry,
            json!({
                "ASR": {
                    "type": "google_asr",
                    "google_asr": { "language": "en" },
                    "kaldi": { "model": "wsj_5k" }
                }
            }),
        ));

        let binding = root
            .get_path("ASR.type")
            .and_then(Value::as_binding)
            .expect("binding resolved");
        assert_eq!(binding.provider().as_str(), "google_asr");
        assert_eq!(root.get_path("ASR.kaldi.model"), Some(&Value::string("wsj_5k")));
    }

    #[test]
    fn test_nested_sections_resolve_independently() {
        let registry = fixture_registry();
        let root = Value::Map(resolve(
            &registry,
            json!({
                "DM": {
                    "debug": false,
                    "directions": {
                        "type": "google_directions",
                        "google_directions": { "region": "en_US" }
                    }
                }
            }),
        ));

        let binding = root
            .get_path("DM.directions.type")
            .and_then(Value::as_binding)
            .expect("nested binding resolved");
        assert_eq!(binding.capability(), &Capability::DirectionsFinder);
        assert_eq!(binding.param("region"), Some(&Value::string("en_US")));
    }

    #[test]
    fn test_path_references_resolve_to_typed_paths() {
        let registry = ProviderRegistry::new();
        let root = Value::Map(resolve(
            &registry,
            json!({
                "TTS": {
                    "preprocessing": { "config_path": "tts/prep.toml" },
                    "voices": { "project_path": "resources/tts/voices" },
                    "plain": { "config_path": 42 }
                }
            }),
        ));

        assert_eq!(
            root.get_path("TTS.preprocessing"),
            Some(&Value::path("/etc/parlance/tts/prep.toml"))
        );
        assert_eq!(
            root.get_path("TTS.voices"),
            Some(&Value::path("/opt/parlance/resources/tts/voices"))
        );
        // Non-string payloads are not references.
        assert_eq!(root.get_path("TTS.plain.config_path"), Some(&Value::Integer(42)));
    }

    #[test]
    fn test_two_key_mapping_is_not_a_path_reference() {
        let registry = ProviderRegistry::new();
        let root = Value::Map(resolve(
            &registry,
            json!({ "TTS": { "prep": { "config_path": "a.toml", "enabled": true } } }),
        ));

        assert_eq!(
            root.get_path("TTS.prep.config_path"),
            Some(&Value::string("a.toml"))
        );
        assert_eq!(root.get_path("TTS.prep.enabled"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_path_reference_inside_binding_params() {
        let registry = fixture_registry();
        let root = Value::Map(resolve(
            &registry,
            json!({
                "ASR": {
                    "type": "google_asr",
                    "google_asr": { "credentials": { "project_path": "keys/google.json" } }
                }
            }),
        ));

        let binding = root
            .get_path("ASR.type")
            .and_then(Value::as_binding)
            .expect("binding resolved");
        assert_eq!(
            binding.param("credentials"),
            Some(&Value::path("/opt/parlance/keys/google.json"))
        );
    }
}
