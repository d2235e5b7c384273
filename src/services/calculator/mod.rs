//! Material requirement calculator
//!
//! One pure pipeline shared by every call site:
//! normalize packaging → select mode → compute quantities → estimate cost →
//! assemble the result. Nothing here performs I/O.

pub mod assembler;
pub mod coerce;
pub mod cost;
pub mod engine;
pub mod error;
pub mod mode;
pub mod normalizer;
pub mod presets;
pub mod request;
pub mod share;

pub use engine::{QuantityEngine, WastageDefaults};
pub use error::ValidationError;
pub use presets::AreaMaterial;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{CalculationResult, Mode, PackagingDescriptor, ProjectMeasurement};
use engine::Packaging;

/// Everything one calculation needs, gathered by the caller
#[derive(Debug, Clone, Default)]
pub struct CalculationInput {
    /// Manager-set product calculation type
    pub calculation_type: Option<String>,
    /// Type the customer asked for, already validated
    pub requested: Option<Mode>,
    pub measurement: ProjectMeasurement,
    /// Normalized packaging, priced
    pub descriptor: PackagingDescriptor,
    /// Preset the customer picked; supplies a default coverage for area
    /// materials when neither the request nor the product has one
    pub material: Option<AreaMaterial>,
}

/// Stateless calculator configured with deployment wastage defaults
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    engine: QuantityEngine,
}

impl Calculator {
    pub fn new(wastage: WastageDefaults) -> Self {
        Self {
            engine: QuantityEngine::new(wastage),
        }
    }

    /// Resolve the mode the way the storefront does: a recognized manager-set
    /// type beats the customer's choice, which beats embedded metadata.
    pub fn resolve_mode(&self, input: &CalculationInput) -> Mode {
        let manager_type = input
            .calculation_type
            .as_deref()
            .filter(|t| Mode::parse(t).is_some());
        let explicit = manager_type.or(input.requested.as_ref().map(Mode::as_str));
        mode::select_mode(explicit, &input.descriptor)
    }

    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, ValidationError> {
        let mode = self.resolve_mode(input);
        if input.descriptor.is_unknown() {
            debug!(mode = %mode, "No packaging metadata for this product");
        }

        if input.descriptor.unit_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositive { field: "unitPrice" });
        }

        let descriptor = with_preset_coverage(mode, &input.descriptor, input.material);
        let output = self.engine.compute(mode, &input.measurement, &descriptor)?;

        if output.packaging == Packaging::Unresolved {
            debug!(
                mode = %mode,
                total_required = %output.total_required,
                "Packaging size unresolved, assuming one unit per measured unit"
            );
        }

        let total_cost = cost::estimate_cost(&output, descriptor.unit_price)?;
        Ok(assembler::assemble(mode, output, total_cost, &descriptor.unit_label))
    }
}

fn with_preset_coverage(
    mode: Mode,
    descriptor: &PackagingDescriptor,
    material: Option<AreaMaterial>,
) -> PackagingDescriptor {
    let mut descriptor = descriptor.clone();
    if mode == Mode::Area && descriptor.coverage_area.is_none() && descriptor.footprint().is_none() {
        descriptor.coverage_area = material.map(|m| m.default_coverage());
    }
    descriptor
}
