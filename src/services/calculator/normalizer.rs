//! Packaging metadata normalization
//!
//! Product packaging metadata is stored as free-form JSON, sometimes as a
//! string, sometimes already parsed. This is the single place it is read.

use serde_json::{Map, Value};

use super::coerce::lenient_positive;
use crate::domain::PackagingDescriptor;

/// Normalize a raw packaging blob. Never fails: unreadable input yields a
/// descriptor with every optional field empty.
pub fn normalize(raw: Option<&Value>) -> PackagingDescriptor {
    match raw {
        Some(Value::Object(map)) => from_map(map),
        Some(Value::String(s)) => normalize_str(s),
        _ => PackagingDescriptor::default(),
    }
}

/// Normalize packaging metadata stored as JSON text
pub fn normalize_str(raw: &str) -> PackagingDescriptor {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => from_map(&map),
        Ok(_) => PackagingDescriptor::default(),
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable packaging metadata, treating as unknown");
            PackagingDescriptor::default()
        }
    }
}

fn from_map(map: &Map<String, Value>) -> PackagingDescriptor {
    let material_type = map
        .get("material_type")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    PackagingDescriptor {
        coverage_area: lenient_positive(map.get("coverage")),
        volume_per_unit: lenient_positive(map.get("volume_per_unit")),
        length_per_unit: lenient_positive(map.get("length_per_unit")),
        length: lenient_positive(map.get("length")),
        width: lenient_positive(map.get("width")),
        height: lenient_positive(map.get("height")),
        material_type,
        ..PackagingDescriptor::default()
    }
}
