//! Area material presets
//!
//! Typical coverage per unit for common area materials. A preset's coverage
//! applies only when the customer picks the material and neither the request
//! nor the product supplies a coverage.

use rust_decimal::Decimal;

use crate::domain::MaterialPresetResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaMaterial {
    Paint,
    Flooring,
    Tiles,
    Wallpaper,
    Insulation,
}

impl AreaMaterial {
    pub const ALL: [AreaMaterial; 5] = [
        Self::Paint,
        Self::Flooring,
        Self::Tiles,
        Self::Wallpaper,
        Self::Insulation,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paint" => Some(Self::Paint),
            "flooring" => Some(Self::Flooring),
            "tiles" | "tile" => Some(Self::Tiles),
            "wallpaper" => Some(Self::Wallpaper),
            "insulation" => Some(Self::Insulation),
            _ => None,
        }
    }

    /// Infer the material from a product name, e.g. "Ceramic Wall Tile"
    pub fn infer_from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| name.contains(k));

        if has(&["paint", "coating"]) {
            Some(Self::Paint)
        } else if has(&["tile", "ceramic"]) {
            Some(Self::Tiles)
        } else if has(&["floor", "laminate"]) {
            Some(Self::Flooring)
        } else if has(&["wall", "paper"]) {
            Some(Self::Wallpaper)
        } else if has(&["insul"]) {
            Some(Self::Insulation)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Flooring => "flooring",
            Self::Tiles => "tiles",
            Self::Wallpaper => "wallpaper",
            Self::Insulation => "insulation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paint => "Paint",
            Self::Flooring => "Flooring",
            Self::Tiles => "Tiles",
            Self::Wallpaper => "Wallpaper",
            Self::Insulation => "Insulation",
        }
    }

    /// Square meters one unit covers (one liter of paint covers 10 m²)
    pub fn default_coverage(&self) -> Decimal {
        match self {
            Self::Paint => Decimal::from(10),
            Self::Flooring | Self::Tiles => Decimal::ONE,
            Self::Wallpaper => Decimal::from(5),
            Self::Insulation => Decimal::from(2),
        }
    }
}

impl From<AreaMaterial> for MaterialPresetResponse {
    fn from(m: AreaMaterial) -> Self {
        Self {
            value: m.as_str().to_string(),
            label: m.label().to_string(),
            default_coverage: m.default_coverage(),
        }
    }
}
