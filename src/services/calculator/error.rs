use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::Mode;

/// Rejected calculator input. Every variant names the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required for {mode} calculations")]
    MissingDimension { field: &'static str, mode: Mode },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} must be a number")]
    NotNumeric { field: &'static str },

    #[error("{field} is too large to calculate with")]
    TooLarge { field: &'static str },

    #[error("wastage must be between 0 and 50 percent, got {value}")]
    WastageOutOfRange { value: Decimal },

    #[error("unrecognized calculation type '{value}'; supported types: area, volume, linear, unit, weight")]
    UnrecognizedMode { value: String },
}

impl ValidationError {
    /// Request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingDimension { field, .. }
            | Self::Missing { field }
            | Self::NonPositive { field }
            | Self::NotNumeric { field }
            | Self::TooLarge { field } => *field,
            Self::WastageOutOfRange { .. } => "wastage",
            Self::UnrecognizedMode { .. } => "type",
        }
    }
}
