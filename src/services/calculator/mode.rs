use crate::domain::{Mode, PackagingDescriptor};

use super::ValidationError;

/// Pick the calculation mode for a product.
///
/// An explicit, recognized `calculation_type` wins; otherwise the embedded
/// `material_type` is used when it names a dimensional mode; otherwise `unit`.
pub fn select_mode(explicit_type: Option<&str>, descriptor: &PackagingDescriptor) -> Mode {
    if let Some(mode) = explicit_type.and_then(Mode::parse) {
        return mode;
    }

    descriptor
        .material_type
        .as_deref()
        .and_then(Mode::parse)
        .filter(Mode::is_dimensional)
        .unwrap_or(Mode::Unit)
}

/// Parse a mode the caller asked for explicitly. Unknown names are rejected
/// rather than silently falling back.
pub fn parse_requested(requested: Option<&str>) -> Result<Option<Mode>, ValidationError> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => Mode::parse(value)
            .map(Some)
            .ok_or_else(|| ValidationError::UnrecognizedMode {
                value: value.to_string(),
            }),
    }
}
