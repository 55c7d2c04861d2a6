//! Dotted key-path lookup over value trees

use crate::core::value::{Map, Value};

/// Walk a dotted key path through a value tree.
///
/// Each segment indexes the current node: mappings by key, arrays by decimal
/// position, bindings by parameter key. Returns `None` as soon as a segment
/// does not apply.
pub(crate) fn lookup<'a>(root: &'a Value, key_path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in key_path.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

/// [`lookup`] starting from a top-level mapping instead of a value.
pub(crate) fn lookup_in<'a>(root: &'a Map, key_path: &str) -> Option<&'a Value> {
    match key_path.split_once('.') {
        Some((section, rest)) => lookup(root.get(section)?, rest),
        None => root.get(key_path),
    }
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Map(map) => map.get(segment),
        Value::Array(items) => {
            let index: usize = segment.parse().ok()?;
            items.get(index)
        }
        Value::Binding(binding) => binding.param(segment),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::core::binding::{Binding, Capability, ProviderId};
    use crate::core::value::Map;

    #[test]
    fn test_lookup_descends_into_binding_params() {
        let mut params = Map::new();
        params.insert("region".to_string(), Value::string("en_US"));
        let binding = Binding::new(
            Capability::DirectionsFinder,
            ProviderId::new("google_directions"),
            params,
        );

        let mut directions = Map::new();
        directions.insert("type".to_string(), Value::Binding(binding));
        let mut dm = Map::new();
        dm.insert("directions".to_string(), Value::Map(directions));
        let mut root = Map::new();
        root.insert("DM".to_string(), Value::Map(dm));
        let root = Value::Map(root);

        assert_eq!(
            lookup(&root, "DM.directions.type.region"),
            Some(&Value::string("en_US"))
        );
        assert_eq!(lookup(&root, "DM.directions.type.mode"), None);
    }

    #[test]
    fn test_lookup_stops_at_scalars() {
        let root = Value::from_json(json!({ "ASR": { "sample_rate": 16000 } }));
        assert_eq!(lookup(&root, "ASR.sample_rate.hz"), None);
        assert_eq!(
            lookup(&root, "ASR.sample_rate"),
            Some(&Value::Integer(16000))
        );
    }

    #[test]
    fn test_lookup_in_handles_single_segment_paths() {
        let root = Value::from_json(json!({ "DM": { "debug": true } }))
            .into_map()
            .expect("mapping fixture");

        assert_eq!(lookup_in(&root, "DM"), root.get("DM"));
        assert_eq!(lookup_in(&root, "DM.debug"), Some(&Value::Bool(true)));
        assert_eq!(lookup_in(&root, "TTS"), None);
    }
}
