//! Layering of YAML config documents.
//!
//! # Merge Rules
//!
//! - Mappings merge key by key, recursively
//! - Sequences are replaced, so a project `checks:` list replaces the
//!   user's list instead of extending it
//! - A null value removes the key inherited from earlier layers
//! - Any other value replaces the earlier one

use serde_yaml::Value;

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    base_map.remove(&key);
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Merge layers in order; later layers win.
///
/// Empty documents (a file with no content parses as null) are skipped.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    let mut merged = Value::Mapping(Default::default());
    for layer in layers.into_iter().filter(|l| !l.is_null()) {
        merge_into(&mut merged, layer);
    }
    merged
}
