//! Resource allocation models

use serde::{Deserialize, Serialize};

use super::{StockStatus, TrendDirection};

/// Priority bucket, ordered from least to most urgent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBucket {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for PriorityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityBucket::Low => write!(f, "low"),
            PriorityBucket::Medium => write!(f, "medium"),
            PriorityBucket::High => write!(f, "high"),
            PriorityBucket::Critical => write!(f, "critical"),
        }
    }
}

/// Operational attention ranking for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationEntry {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub stock_status: StockStatus,
    pub trend: TrendDirection,
    /// `None` when there is no forecast consumption
    pub days_of_supply: Option<f64>,
    /// Forecast risk in [0, 1]
    pub forecast_risk: f64,
    /// Composite score in [0, 100]
    pub score: f64,
    pub priority: PriorityBucket,
    pub recommendation: String,
}
