//! Replenishment (EOQ) models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cost inputs for the EOQ calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostParameters {
    /// Fixed cost of placing one order
    pub order_cost: f64,
    /// Cost of holding one unit for a year
    pub holding_cost: f64,
    /// Forecast periods per year (12 for monthly data)
    pub periods_per_year: f64,
    /// Days per forecast period, used for daily consumption
    pub days_per_period: f64,
    /// Date the recommendation is computed for
    pub as_of: NaiveDate,
}

/// Reorder recommendation for a single product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplenishmentRecommendation {
    pub product_id: String,
    pub product_name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
    /// Forecast demand over the supplier lead time
    pub lead_time_demand: f64,
    pub annual_demand: f64,
    pub base_eoq: f64,
    /// Trend adjustment applied to the base EOQ, within [0.8, 1.2]
    pub adjustment_factor: f64,
    pub recommended_quantity: i64,
    pub should_reorder: bool,
    /// Date stock is projected to reach the reorder point
    pub reorder_date: Option<NaiveDate>,
    pub days_of_supply: Option<f64>,
    pub order_cost: Decimal,
    pub annual_savings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplenishmentSummary {
    pub total_items: usize,
    pub total_investment: Decimal,
    pub estimated_savings: Decimal,
}

/// Products that need reordering now, most urgent first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplenishmentPlan {
    pub recommendations: Vec<ReplenishmentRecommendation>,
    pub summary: ReplenishmentSummary,
}
