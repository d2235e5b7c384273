//! Request translation
//!
//! Gathers the three calculator inputs (mode hints, measurement, packaging)
//! from an HTTP request and, when given, the catalog product. Query strings
//! and JSON bodies go through the same coercion so every call site validates
//! identically.

use super::coerce::{optional_field, positive_field};
use super::mode::parse_requested;
use super::normalizer;
use super::presets::AreaMaterial;
use super::{CalculationInput, ValidationError};
use crate::domain::{CalculateRequest, Mode, PackagingDescriptor, Product, ProjectMeasurement};

/// Build the project measurement. Supplied dimensions must be positive numbers.
pub fn measurement(req: &CalculateRequest) -> Result<ProjectMeasurement, ValidationError> {
    Ok(ProjectMeasurement {
        length: positive_field("length", req.length.as_ref())?,
        width: positive_field("width", req.width.as_ref())?,
        depth: positive_field("depth", req.depth.as_ref())?,
        piece_length: positive_field("pieceLength", req.piece_length.as_ref())?,
        wastage_percent: optional_field("wastage", req.wastage.as_ref())?,
        quantity: positive_field("quantity", req.quantity.as_ref())?,
    })
}

/// Build the priced packaging descriptor.
///
/// Catalog products supply price, unit and packaging metadata; otherwise the
/// request carries them inline. A coverage typed in by the customer overrides
/// the product's own.
pub fn descriptor(
    req: &CalculateRequest,
    product: Option<&Product>,
) -> Result<PackagingDescriptor, ValidationError> {
    let (normalized, unit_price, unit_label) = match product {
        Some(p) => (
            p.dimensions
                .as_deref()
                .map(normalizer::normalize_str)
                .unwrap_or_default(),
            p.price,
            p.unit.clone(),
        ),
        None => {
            let price = positive_field("unitPrice", req.unit_price.as_ref())?
                .ok_or(ValidationError::Missing { field: "unitPrice" })?;
            (
                normalizer::normalize(req.dimensions.as_ref()),
                price,
                req.unit.clone().unwrap_or_default(),
            )
        }
    };

    let mut descriptor = normalized.with_pricing(unit_price, unit_label);
    if let Some(coverage) = positive_field("coverage", req.coverage.as_ref())? {
        descriptor.coverage_area = Some(coverage);
    }
    Ok(descriptor)
}

/// Assemble a full calculation input. `forced` pins the mode, as the
/// per-mode endpoints do.
pub fn calculation_input(
    req: &CalculateRequest,
    product: Option<&Product>,
    forced: Option<Mode>,
) -> Result<CalculationInput, ValidationError> {
    let requested = match forced {
        Some(mode) => Some(mode),
        None => parse_requested(req.requested_type.as_deref())?,
    };

    // A forced endpoint mode must not be overridden by a stored type
    let calculation_type = match forced {
        Some(_) => None,
        None => product
            .and_then(|p| p.calculation_type.clone())
            .or_else(|| req.calculation_type.clone()),
    };

    Ok(CalculationInput {
        calculation_type,
        requested,
        measurement: measurement(req)?,
        descriptor: descriptor(req, product)?,
        material: req.material.as_deref().and_then(AreaMaterial::parse),
    })
}

/// Preset the product name points at, offered to the customer as a
/// pre-selection. Never changes the packaging size of the calculation.
pub fn suggested_material(req: &CalculateRequest, product: Option<&Product>) -> Option<AreaMaterial> {
    if req.material.is_some() {
        return None;
    }
    product
        .map(|p| p.name.as_str())
        .or(req.product_name.as_deref())
        .and_then(AreaMaterial::infer_from_name)
}
