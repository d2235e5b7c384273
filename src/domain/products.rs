use rust_decimal::Decimal;
use serde::Serialize;

/// Product facts the calculator needs. Owned by the storefront catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub unit: String,
    /// Manager-set calculation type; legacy records may not carry one
    pub calculation_type: Option<String>,
    /// Raw packaging metadata as stored (usually a JSON string)
    pub dimensions: Option<String>,
}
