//! Deep merge of raw configuration trees
//!
//! Later sources override earlier ones at the exact leaf path: two mappings
//! merge per key recursively, anything else replaces wholesale. Keys absent
//! from the later source keep their earlier values, so layering can never
//! delete a setting by accident. An explicit null is a defined value and
//! overrides like any scalar.

use crate::core::value::{Map, Value};

/// Merge `source` into `target`, later values winning at the leaves.
pub(crate) fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Map(target_map), Value::Map(source_map)) => {
            merge_maps(target_map, source_map);
        }
        (target, source) => *target = source,
    }
}

/// Merge a raw top-level mapping into the accumulated tree.
pub(crate) fn merge_maps(target: &mut Map, source: Map) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => merge_values(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn map(json: serde_json::Value) -> Map {
        Value::from_json(json).into_map().expect("mapping fixture")
    }

    #[test]
    fn test_later_source_defines_new_leaf_and_preserves_siblings() {
        let mut merged = map(json!({
            "DM": { "debug": true, "input_timeout": 3.0 }
        }));
        merge_maps(
            &mut merged,
            map(json!({ "DM": { "directions": { "type": "google_directions" } } })),
        );

        let root = Value::Map(merged);
        assert_eq!(
            root.get_path("DM.directions.type"),
            Some(&Value::string("google_directions"))
        );
        assert_eq!(root.get_path("DM.debug"), Some(&Value::Bool(true)));
        assert_eq!(root.get_path("DM.input_timeout"), Some(&Value::Float(3.0)));
    }

    #[test]
    fn test_last_write_wins_on_shared_leaf() {
        let mut merged = map(json!({ "ASR": { "type": "kaldi", "sample_rate": 16000 } }));
        merge_maps(&mut merged, map(json!({ "ASR": { "type": "google_asr" } })));

        let root = Value::Map(merged);
        assert_eq!(root.get_path("ASR.type"), Some(&Value::string("google_asr")));
        assert_eq!(root.get_path("ASR.sample_rate"), Some(&Value::Integer(16000)));
    }

    #[test]
    fn test_scalar_replaces_mapping_and_back() {
        let mut merged = map(json!({ "TTS": { "voice": { "name": "slt" } } }));
        merge_maps(&mut merged, map(json!({ "TTS": { "voice": "awb" } })));
        assert_eq!(
            Value::Map(merged.clone()).get_path("TTS.voice"),
            Some(&Value::string("awb"))
        );

        merge_maps(&mut merged, map(json!({ "TTS": { "voice": { "name": "rms" } } })));
        assert_eq!(
            Value::Map(merged).get_path("TTS.voice.name"),
            Some(&Value::string("rms"))
        );
    }

    #[test]
    fn test_explicit_null_overrides() {
        let mut merged = map(json!({ "ASR": { "model": "wsj_5k" } }));
        merge_maps(&mut merged, map(json!({ "ASR": { "model": null } })));
        assert_eq!(
            Value::Map(merged).get_path("ASR.model"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_disjoint_sections_coexist() {
        let mut merged = map(json!({ "ASR": { "type": "google_asr" } }));
        merge_maps(&mut merged, map(json!({ "Telephony": { "port": 5060 } })));

        assert_eq!(merged.len(), 2);
        let root = Value::Map(merged);
        assert_eq!(root.get_path("Telephony.port"), Some(&Value::Integer(5060)));
    }
}
