use rust_decimal::Decimal;

use crate::domain::{
    CalculationResult, Mode, ProjectDimensions, ProjectMeasurement, SharePayload, DEFAULT_UNIT_LABEL,
};

/// Product identity as seen by the share side-channel
#[derive(Debug, Clone)]
pub struct SharedProduct<'a> {
    pub id: Option<i64>,
    pub name: &'a str,
    pub unit: &'a str,
}

/// Build the payload forwarded to the chat collaborator
pub fn share_payload(
    product: &SharedProduct<'_>,
    result: &CalculationResult,
    measurement: &ProjectMeasurement,
) -> SharePayload {
    let product_unit = if product.unit.trim().is_empty() {
        DEFAULT_UNIT_LABEL
    } else {
        product.unit
    };
    let units_needed = result.units_needed.unwrap_or_default();
    let project_dimensions = ProjectDimensions::from(measurement);

    let message = format!(
        "You need {} {}(s) of {}{}. Total cost: ${:.2}",
        units_needed,
        product_unit,
        product.name,
        describe_dimensions(result.mode, &project_dimensions)
            .map(|d| format!(" for {}", d))
            .unwrap_or_default(),
        result.total_cost,
    );

    SharePayload {
        product_id: product.id,
        product_name: product.name.to_string(),
        product_unit: product_unit.to_string(),
        units_needed,
        total_cost: result.total_cost,
        calculation_type: result.mode,
        project_dimensions,
        message,
    }
}

fn describe_dimensions(mode: Mode, dims: &ProjectDimensions) -> Option<String> {
    let m = |v: Option<Decimal>| v.map(|d| format!("{}m", d.normalize()));
    match mode {
        Mode::Area => Some(format!("an area of {} × {}", m(dims.length)?, m(dims.width)?)),
        Mode::Volume => Some(format!(
            "a volume of {} × {} × {}",
            m(dims.length)?,
            m(dims.width)?,
            m(dims.depth)?
        )),
        Mode::Linear => Some(format!("a length of {}", m(dims.length)?)),
        Mode::Unit | Mode::Weight => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackagingDescriptor;
    use crate::services::calculator::{CalculationInput, Calculator};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn area_message_mentions_dimensions_and_cost() {
        let measurement = ProjectMeasurement {
            length: Some(d("4")),
            width: Some(d("3")),
            wastage_percent: Some(d("10")),
            ..ProjectMeasurement::default()
        };
        let result = Calculator::default().calculate(&CalculationInput {
            calculation_type: Some("area".into()),
            measurement: measurement.clone(),
            descriptor: PackagingDescriptor {
                coverage_area: Some(d("1.5")),
                ..PackagingDescriptor::default()
            }
            .with_pricing(d("12.5"), "bag"),
            ..CalculationInput::default()
        })
        .expect("valid area calculation");

        let product = SharedProduct {
            id: Some(7),
            name: "Tile Adhesive",
            unit: "bag",
        };
        let payload = share_payload(&product, &result, &measurement);
        assert_eq!(payload.units_needed, 9);
        assert_eq!(
            payload.message,
            "You need 9 bag(s) of Tile Adhesive for an area of 4m × 3m. Total cost: $112.50"
        );

        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(value["productId"], 7);
        assert_eq!(value["calculationType"], "area");
        assert_eq!(value["projectDimensions"]["width"], 3.0);
        assert!(value["projectDimensions"].get("depth").is_none());
    }

    #[test]
    fn unit_message_has_no_dimensions() {
        let measurement = ProjectMeasurement::default();
        let result = Calculator::default().calculate(&CalculationInput {
            measurement: measurement.clone(),
            descriptor: PackagingDescriptor::default().with_pricing(d("3"), ""),
            ..CalculationInput::default()
        })
        .expect("unit calculation");

        let product = SharedProduct {
            id: None,
            name: "Hammer",
            unit: "",
        };
        let payload = share_payload(&product, &result, &measurement);
        assert_eq!(payload.message, "You need 1 unit(s) of Hammer. Total cost: $3.00");
    }
}
