//! Material calculator domain types
//!
//! Packaging facts, project measurements and the immutable calculation result
//! shared by every calculator call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calculation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Area,
    Volume,
    Linear,
    Unit,
    Weight,
}

impl Mode {
    /// Parse a mode name. `length` is accepted as an alias for `linear`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "area" => Some(Self::Area),
            "volume" => Some(Self::Volume),
            "linear" | "length" => Some(Self::Linear),
            "unit" => Some(Self::Unit),
            "weight" => Some(Self::Weight),
            _ => None,
        }
    }

    /// Whether this mode goes through the dimensional engine
    pub fn is_dimensional(&self) -> bool {
        matches!(self, Self::Area | Self::Volume | Self::Linear)
    }

    /// Display unit for dimensional modes
    pub fn measure_label(&self) -> Option<&'static str> {
        match self {
            Self::Area => Some("m²"),
            Self::Volume => Some("m³"),
            Self::Linear => Some("m"),
            Self::Unit | Self::Weight => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Linear => "linear",
            Self::Unit => "unit",
            Self::Weight => "weight",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized packaging facts for one product.
///
/// Every size is optional; which one applies is decided by the selected
/// [`Mode`], never by the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingDescriptor {
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub unit_label: String,
    /// Area one packaged unit covers (m²)
    #[serde(with = "rust_decimal::serde::float_option")]
    pub coverage_area: Option<Decimal>,
    /// Volume one packaged unit represents (m³)
    #[serde(with = "rust_decimal::serde::float_option")]
    pub volume_per_unit: Option<Decimal>,
    /// Length one packaged unit represents (m)
    #[serde(with = "rust_decimal::serde::float_option")]
    pub length_per_unit: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub length: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub width: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub height: Option<Decimal>,
    pub material_type: Option<String>,
}

impl Default for PackagingDescriptor {
    fn default() -> Self {
        Self {
            unit_price: Decimal::ZERO,
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            coverage_area: None,
            volume_per_unit: None,
            length_per_unit: None,
            length: None,
            width: None,
            height: None,
            material_type: None,
        }
    }
}

pub const DEFAULT_UNIT_LABEL: &str = "unit";

impl PackagingDescriptor {
    /// Attach the product's selling price and unit label
    pub fn with_pricing(mut self, unit_price: Decimal, unit_label: impl Into<String>) -> Self {
        self.unit_price = unit_price;
        let label = unit_label.into();
        if !label.trim().is_empty() {
            self.unit_label = label;
        }
        self
    }

    /// True when no packaging fact could be recovered
    pub fn is_unknown(&self) -> bool {
        self.coverage_area.is_none()
            && self.volume_per_unit.is_none()
            && self.length_per_unit.is_none()
            && self.length.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.material_type.is_none()
    }

    /// Product footprint (length × width), used as implicit coverage
    pub fn footprint(&self) -> Option<Decimal> {
        self.length?.checked_mul(self.width?)
    }

    /// Product volume (length × width × height)
    pub fn physical_volume(&self) -> Option<Decimal> {
        self.footprint()?.checked_mul(self.height?)
    }
}

/// Project measurement supplied by the customer (meters)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMeasurement {
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub depth: Option<Decimal>,
    pub piece_length: Option<Decimal>,
    /// Falls back to the per-mode default when absent
    pub wastage_percent: Option<Decimal>,
    /// Direct quantity for unit and weight modes
    pub quantity: Option<Decimal>,
}

/// Non-fatal notes attached to a result
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PackagingWarning {
    /// No packaging size could be resolved; one unit is assumed to equal one
    /// measured unit (m², m³ or m) and cost is priced on the continuous amount.
    UnresolvedPackaging { mode: Mode },
}

/// Output of a single calculation. Never mutated after assembly.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub mode: Mode,
    pub unit_label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub wastage_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub wastage_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_required: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_needed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces_needed: Option<u64>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub packaging_size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PackagingWarning>,
}

/// Calculator request accepted by the HTTP endpoints.
///
/// Numeric fields stay as raw JSON values so that query-string text and JSON
/// numbers go through the same field-level coercion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Mode requested by the customer
    #[serde(default, rename = "type")]
    pub requested_type: Option<String>,
    /// Manager-set product calculation type
    #[serde(default, alias = "calculation_type")]
    pub calculation_type: Option<String>,
    #[serde(default, alias = "product_id")]
    pub product_id: Option<i64>,
    #[serde(default, alias = "product_name")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub length: Option<serde_json::Value>,
    #[serde(default)]
    pub width: Option<serde_json::Value>,
    #[serde(default)]
    pub depth: Option<serde_json::Value>,
    #[serde(default, alias = "piece_length")]
    pub piece_length: Option<serde_json::Value>,
    #[serde(default)]
    pub wastage: Option<serde_json::Value>,
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    /// Coverage typed in by the customer; overrides the product's own
    #[serde(default)]
    pub coverage: Option<serde_json::Value>,
    #[serde(default, alias = "unit_price", alias = "price")]
    pub unit_price: Option<serde_json::Value>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Raw packaging metadata blob (string or object)
    #[serde(default)]
    pub dimensions: Option<serde_json::Value>,
    /// Area material preset name
    #[serde(default)]
    pub material: Option<String>,
}

/// Project dimensions echoed to the chat side-channel
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDimensions {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub length: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth: Option<Decimal>,
}

impl From<&ProjectMeasurement> for ProjectDimensions {
    fn from(m: &ProjectMeasurement) -> Self {
        Self {
            length: m.length,
            width: m.width,
            depth: m.depth,
        }
    }
}

/// Payload handed to the chat "share this calculation" collaborator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub product_name: String,
    pub product_unit: String,
    pub units_needed: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub calculation_type: Mode,
    pub project_dimensions: ProjectDimensions,
    pub message: String,
}

/// Response body for calculator endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub result: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<SharePayload>,
    /// Area preset matching the product name, for the customer to confirm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_material: Option<MaterialPresetResponse>,
}

/// Area material preset as listed by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPresetResponse {
    pub value: String,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub default_coverage: Decimal,
}
