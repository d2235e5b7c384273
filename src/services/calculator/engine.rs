//! Quantity engine
//!
//! Turns a project measurement into raw, wastage and total amounts and a
//! whole number of packaged units. Counts always round up: ordering one unit
//! too many is acceptable, one too few is not.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::ValidationError;
use crate::domain::{Mode, PackagingDescriptor, ProjectMeasurement};

/// Upper bound of the accepted wastage percentage
pub const MAX_WASTAGE_PERCENT: u32 = 50;

/// Default wastage percentage per dimensional mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WastageDefaults {
    pub area: Decimal,
    pub volume: Decimal,
    pub linear: Decimal,
}

impl Default for WastageDefaults {
    fn default() -> Self {
        Self {
            area: Decimal::from(10),
            volume: Decimal::from(15),
            linear: Decimal::from(5),
        }
    }
}

impl WastageDefaults {
    pub fn for_mode(&self, mode: Mode) -> Decimal {
        match mode {
            Mode::Area => self.area,
            Mode::Volume => self.volume,
            Mode::Linear => self.linear,
            Mode::Unit | Mode::Weight => Decimal::ZERO,
        }
    }
}

/// How the units count was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    /// A packaging size was resolved; units are discrete packages of this size
    Sized(Decimal),
    /// No size could be resolved; one unit is assumed per measured unit
    Unresolved,
    /// Unit and weight modes: the customer gave the quantity directly
    Direct,
}

/// Raw engine output, before pricing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    pub raw_amount: Decimal,
    pub wastage_percent: Decimal,
    pub wastage_amount: Decimal,
    pub total_required: Decimal,
    pub units_needed: u64,
    pub pieces_needed: Option<u64>,
    pub packaging: Packaging,
}

#[derive(Debug, Clone, Default)]
pub struct QuantityEngine {
    wastage: WastageDefaults,
}

impl QuantityEngine {
    pub fn new(wastage: WastageDefaults) -> Self {
        Self { wastage }
    }

    /// Compute quantities for `mode`. Missing or non-positive dimensions the
    /// mode needs are rejected, never treated as 0 or 1.
    pub fn compute(
        &self,
        mode: Mode,
        measurement: &ProjectMeasurement,
        descriptor: &PackagingDescriptor,
    ) -> Result<EngineOutput, ValidationError> {
        let wastage_percent = self.wastage_percent(mode, measurement)?;

        match mode {
            Mode::Area => {
                let length = require("length", measurement.length, mode)?;
                let width = require("width", measurement.width, mode)?;
                let raw = mul(length, width, "width")?;
                let size = descriptor
                    .coverage_area
                    .filter(|c| *c > Decimal::ZERO)
                    .or_else(|| descriptor.footprint());
                dimensional(raw, wastage_percent, size.map(|s| (s, "coverage")))
            }
            Mode::Volume => {
                let length = require("length", measurement.length, mode)?;
                let width = require("width", measurement.width, mode)?;
                let depth = require("depth", measurement.depth, mode)?;
                let raw = mul(mul(length, width, "width")?, depth, "depth")?;
                let size = descriptor
                    .volume_per_unit
                    .or_else(|| descriptor.physical_volume());
                dimensional(raw, wastage_percent, size.map(|s| (s, "volumePerUnit")))
            }
            Mode::Linear => {
                let length = require("length", measurement.length, mode)?;
                let piece_length = match measurement.piece_length {
                    Some(p) if p <= Decimal::ZERO => {
                        return Err(ValidationError::NonPositive {
                            field: "pieceLength",
                        })
                    }
                    Some(p) => Some(p),
                    None => descriptor.length_per_unit,
                };
                let mut output =
                    dimensional(length, wastage_percent, piece_length.map(|p| (p, "pieceLength")))?;
                if piece_length.is_some() {
                    output.pieces_needed = Some(output.units_needed);
                }
                Ok(output)
            }
            Mode::Unit | Mode::Weight => {
                let quantity = match measurement.quantity {
                    Some(q) if q <= Decimal::ZERO => {
                        return Err(ValidationError::NonPositive { field: "quantity" })
                    }
                    Some(q) => q,
                    None => Decimal::ONE,
                };
                Ok(EngineOutput {
                    raw_amount: quantity,
                    wastage_percent: Decimal::ZERO,
                    wastage_amount: Decimal::ZERO,
                    total_required: quantity,
                    units_needed: ceil_count(quantity, "quantity")?,
                    pieces_needed: None,
                    packaging: Packaging::Direct,
                })
            }
        }
    }

    fn wastage_percent(
        &self,
        mode: Mode,
        measurement: &ProjectMeasurement,
    ) -> Result<Decimal, ValidationError> {
        match measurement.wastage_percent {
            Some(w) if w < Decimal::ZERO || w > Decimal::from(MAX_WASTAGE_PERCENT) => {
                Err(ValidationError::WastageOutOfRange { value: w })
            }
            Some(w) => Ok(w),
            None => Ok(self.wastage.for_mode(mode)),
        }
    }
}

/// `packaging_size` carries the request or packaging field it came from, so
/// an overflowing unit count names that field.
fn dimensional(
    raw_amount: Decimal,
    wastage_percent: Decimal,
    packaging_size: Option<(Decimal, &'static str)>,
) -> Result<EngineOutput, ValidationError> {
    let wastage_amount = mul(raw_amount, wastage_percent, "wastage")? / Decimal::ONE_HUNDRED;
    let total_required = raw_amount
        .checked_add(wastage_amount)
        .ok_or(ValidationError::TooLarge { field: "wastage" })?;

    let (units_needed, packaging) = match packaging_size.filter(|(s, _)| *s > Decimal::ZERO) {
        Some((size, field)) => {
            let per_unit = total_required
                .checked_div(size)
                .ok_or(ValidationError::TooLarge { field })?;
            (ceil_count(per_unit, field)?, Packaging::Sized(size))
        }
        None => (ceil_count(total_required, "length")?, Packaging::Unresolved),
    };

    Ok(EngineOutput {
        raw_amount,
        wastage_percent,
        wastage_amount,
        total_required,
        units_needed,
        pieces_needed: None,
        packaging,
    })
}

fn require(field: &'static str, value: Option<Decimal>, mode: Mode) -> Result<Decimal, ValidationError> {
    match value {
        None => Err(ValidationError::MissingDimension { field, mode }),
        Some(v) if v <= Decimal::ZERO => Err(ValidationError::NonPositive { field }),
        Some(v) => Ok(v),
    }
}

fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_mul(b).ok_or(ValidationError::TooLarge { field })
}

fn ceil_count(value: Decimal, field: &'static str) -> Result<u64, ValidationError> {
    value
        .ceil()
        .to_u64()
        .ok_or(ValidationError::TooLarge { field })
}
