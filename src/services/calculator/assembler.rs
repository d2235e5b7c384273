use rust_decimal::Decimal;

use super::engine::{EngineOutput, Packaging};
use crate::domain::{CalculationResult, Mode, PackagingWarning};

/// Build the final result. Dimensional modes are labelled m², m³ or m; unit
/// and weight modes carry the product's own unit label.
pub fn assemble(
    mode: Mode,
    output: EngineOutput,
    total_cost: Decimal,
    product_unit_label: &str,
) -> CalculationResult {
    let unit_label = mode
        .measure_label()
        .unwrap_or(product_unit_label)
        .to_string();

    let (packaging_size, warnings) = match output.packaging {
        Packaging::Sized(size) => (Some(size), Vec::new()),
        Packaging::Unresolved => (None, vec![PackagingWarning::UnresolvedPackaging { mode }]),
        Packaging::Direct => (None, Vec::new()),
    };

    CalculationResult {
        mode,
        unit_label,
        raw_amount: output.raw_amount.normalize(),
        wastage_percent: output.wastage_percent.normalize(),
        wastage_amount: output.wastage_amount.normalize(),
        total_required: output.total_required.normalize(),
        units_needed: Some(output.units_needed),
        pieces_needed: output.pieces_needed,
        packaging_size: packaging_size.map(|s| s.normalize()),
        total_cost,
        warnings,
    }
}
