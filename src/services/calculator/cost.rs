use rust_decimal::{Decimal, RoundingStrategy};

use super::engine::{EngineOutput, Packaging};
use super::ValidationError;

/// Decimal places kept on quoted costs
pub const COST_SCALE: u32 = 2;

/// Estimate what the customer pays.
///
/// Discrete packages are priced per package. Only when no packaging size is
/// known is the continuous amount priced directly.
pub fn estimate_cost(output: &EngineOutput, unit_price: Decimal) -> Result<Decimal, ValidationError> {
    let billable = match output.packaging {
        Packaging::Sized(_) | Packaging::Direct => Decimal::from(output.units_needed),
        Packaging::Unresolved => output.total_required,
    };

    let cost = billable
        .checked_mul(unit_price)
        .ok_or(ValidationError::TooLarge { field: "unitPrice" })?;
    Ok(cost.round_dp_with_strategy(COST_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn output(total: &str, units: u64, packaging: Packaging) -> EngineOutput {
        EngineOutput {
            raw_amount: d(total),
            wastage_percent: Decimal::ZERO,
            wastage_amount: Decimal::ZERO,
            total_required: d(total),
            units_needed: units,
            pieces_needed: None,
            packaging,
        }
    }

    #[test]
    fn discrete_packages_are_priced_per_unit() {
        let out = output("13.2", 9, Packaging::Sized(d("1.5")));
        assert_eq!(estimate_cost(&out, d("12.50")).unwrap(), d("112.50"));
    }

    #[test]
    fn unresolved_packaging_prices_the_continuous_amount() {
        let out = output("0.46", 1, Packaging::Unresolved);
        assert_eq!(estimate_cost(&out, d("95")).unwrap(), d("43.70"));
    }

    #[test]
    fn direct_quantities_are_priced_per_unit() {
        let out = output("2.5", 3, Packaging::Direct);
        assert_eq!(estimate_cost(&out, d("4.99")).unwrap(), d("14.97"));
    }

    #[test]
    fn cost_is_rounded_to_cents() {
        let out = output("1.333", 2, Packaging::Unresolved);
        assert_eq!(estimate_cost(&out, d("1.005")).unwrap(), d("1.34"));
    }

    #[test]
    fn cost_overflow_is_rejected() {
        let out = output("11000000000000000", 11_000_000_000_000_000, Packaging::Sized(d("0.000001")));
        assert_eq!(
            estimate_cost(&out, d("10000000000000000000")),
            Err(ValidationError::TooLarge { field: "unitPrice" })
        );
    }
}
