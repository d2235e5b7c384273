//! Domain types and DTOs
//!
//! Data structures shared by the calculator engine and its HTTP surface.

pub mod calculator;
pub mod products;

pub use calculator::*;
pub use products::*;
