//! Demand Forecasting Dashboard - engine library
//!
//! Forecasting, replenishment, allocation and alerting over an in-memory
//! inventory store.

pub mod config;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{EngineError, EngineResult};
