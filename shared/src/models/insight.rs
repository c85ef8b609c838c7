//! Forecast insight models

use serde::{Deserialize, Serialize};

use crate::types::Period;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    DemandSurge,
    DemandDrop,
    Seasonality,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    High,
    Medium,
    Info,
}

/// A qualitative signal derived from forecast versus history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: InsightSeverity,
    pub message: String,
    pub recommendation: String,
    /// Forecast periods that crossed the threshold
    pub periods: Vec<Period>,
    /// Peak relative deviation from the history average (0.35 = 35%)
    pub magnitude: f64,
}
