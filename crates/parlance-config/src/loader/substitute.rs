//! Placeholder substitution over loaded values
//!
//! Every string leaf containing the reserved token has all occurrences
//! replaced with the absolute configuration directory. Keys, non-string
//! leaves and structure pass through unchanged; traversal reaches every
//! nesting level including capability-binding parameters. The walk consumes
//! its input and returns the substituted tree — callers that keep the
//! original clone first. Substituted output no longer contains the token, so
//! running the pass again is a no-op.

use std::path::Path;

use crate::core::binding::Binding;
use crate::core::value::{Map, Value};

/// Literal token replaced with the configuration directory's absolute path.
pub const CFG_ABS_PATH_TOKEN: &str = "{cfg_abs_path}";

/// Replace the placeholder token in every string leaf of `value`.
pub fn substitute(value: Value, base: &Path) -> Value {
    substitute_value(value, &base.display().to_string())
}

/// Replace the placeholder token in every value of a mapping.
pub(crate) fn substitute_map(map: Map, base: &Path) -> Map {
    substitute_map_with(map, &base.display().to_string())
}

fn substitute_value(value: Value, base: &str) -> Value {
    match value {
        Value::String(s) => {
            if s.contains(CFG_ABS_PATH_TOKEN) {
                Value::String(s.replace(CFG_ABS_PATH_TOKEN, base))
            } else {
                Value::String(s)
            }
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| substitute_value(item, base))
                .collect(),
        ),
        Value::Map(map) => Value::Map(substitute_map_with(map, base)),
        Value::Binding(binding) => {
            let (capability, provider, params) = binding.into_parts();
            Value::Binding(Binding::new(
                capability,
                provider,
                substitute_map_with(params, base),
            ))
        }
        other => other,
    }
}

fn substitute_map_with(map: Map, base: &str) -> Map {
    map.into_iter()
        .map(|(key, value)| (key, substitute_value(value, base)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::core::binding::{Capability, ProviderId};

    #[test]
    fn test_no_token_is_a_no_op() {
        let tree = Value::from_json(json!({
            "ASR": { "sample_rate": 16000, "model": "models/wsj_5k", "debug": true },
            "Logging": { "outputs": ["stderr", "session.log"] }
        }));

        let substituted = substitute(tree.clone(), Path::new("/etc/parlance"));
        assert_eq!(substituted, tree);
    }

    #[test]
    fn test_single_token_is_replaced_exactly() {
        let tree = Value::from_json(json!({
            "TTS": { "prep": "{cfg_abs_path}/tts/prep_google_en.cfg" }
        }));

        let substituted = substitute(tree, Path::new("/etc/parlance"));
        assert_eq!(
            substituted.get_path("TTS.prep"),
            Some(&Value::string("/etc/parlance/tts/prep_google_en.cfg"))
        );
    }

    #[test]
    fn test_all_occurrences_in_one_leaf_are_replaced() {
        let tree = Value::string("{cfg_abs_path}/a:{cfg_abs_path}/b");
        let substituted = substitute(tree, Path::new("/base"));
        assert_eq!(substituted, Value::string("/base/a:/base/b"));
    }

    #[test]
    fn test_non_string_leaves_and_keys_pass_through() {
        let mut map = Map::new();
        map.insert("{cfg_abs_path}".to_string(), Value::Integer(1));
        map.insert("flag".to_string(), Value::Bool(false));
        map.insert("path".to_string(), Value::path("/already/{cfg_abs_path}"));

        let substituted = substitute(Value::Map(map), Path::new("/base"));
        let result = substituted.as_map().expect("still a mapping");
        // Keys are never substituted, and neither are typed paths.
        assert!(result.contains_key("{cfg_abs_path}"));
        assert_eq!(
            result.get("path"),
            Some(&Value::path("/already/{cfg_abs_path}"))
        );
    }

    #[test]
    fn test_substitution_is_idempotent() {
        let tree = Value::from_json(json!({
            "TTS": { "prep": "{cfg_abs_path}/prep.toml" }
        }));

        let once = substitute(tree, Path::new("/etc/parlance"));
        let twice = substitute(once.clone(), Path::new("/etc/parlance"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_shared_submapping_clones_substitute_consistently() {
        let shared = Value::from_json(json!({ "lexicon": "{cfg_abs_path}/lex.txt" }));

        let mut root = Map::new();
        root.insert("ASR".to_string(), shared.clone());
        root.insert("TTS".to_string(), shared);

        let substituted = substitute(Value::Map(root), Path::new("/etc/parlance"));
        assert_eq!(
            substituted.get_path("ASR.lexicon"),
            substituted.get_path("TTS.lexicon")
        );
        assert_eq!(
            substituted.get_path("ASR.lexicon"),
            Some(&Value::string("/etc/parlance/lex.txt"))
        );
    }

    #[test]
    fn test_token_inside_binding_params_is_replaced() {
        let mut params = Map::new();
        params.insert(
            "grammar".to_string(),
            Value::string("{cfg_abs_path}/grammar.fst"),
        );
        let binding = Binding::new(
            Capability::SpeechRecognizer,
            ProviderId::new("kaldi"),
            params,
        );

        let substituted = substitute(Value::Binding(binding), Path::new("/etc/parlance"));
        let binding = substituted.as_binding().expect("still a binding");
        assert_eq!(
            binding.param("grammar"),
            Some(&Value::string("/etc/parlance/grammar.fst"))
        );
        assert_eq!(binding.provider().as_str(), "kaldi");
    }
}
