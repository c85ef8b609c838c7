//! Alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert types produced by the rule set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    StockoutRisk,
    ReorderRequired,
    Overstock,
    SupplierDelay,
    WeatherImpact,
    DemandSpike,
    LocationCapacity,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::StockoutRisk => "stockout_risk",
            AlertType::ReorderRequired => "reorder_required",
            AlertType::Overstock => "overstock",
            AlertType::SupplierDelay => "supplier_delay",
            AlertType::WeatherImpact => "weather_impact",
            AlertType::DemandSpike => "demand_spike",
            AlertType::LocationCapacity => "location_capacity",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    /// Sort rank, critical first
    pub fn rank(&self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::Warning => 1,
            AlertSeverity::Info => 2,
        }
    }
}

/// A generated alert. Each evaluation pass produces a fresh set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub location: Option<String>,
    pub message: String,
    pub recommended_action: String,
    pub timestamp: DateTime<Utc>,
    /// Rule-specific figures (stock levels, delay risk, ...)
    pub metadata: serde_json::Value,
}

/// Alert counts by severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}
