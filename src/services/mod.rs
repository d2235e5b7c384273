//! Service layer modules.
//!
//! Contains the material calculator engine and the product catalog adapter.

pub mod calculator;
pub mod catalog;

pub use calculator::Calculator;
pub use catalog::{PgProductCatalog, ProductCatalog};
