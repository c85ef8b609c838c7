//! Shared types and models for the Demand Forecasting Dashboard
//!
//! This crate contains the plain data exchanged between the forecasting
//! engine, the dashboard API layer, and anything that renders engine output.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
