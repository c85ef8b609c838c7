//! Supplier performance models

use serde::{Deserialize, Serialize};

/// Supplier performance metrics, all percentages on a 0-100 scale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierPerformance {
    pub id: String,
    pub name: String,
    pub category: String,
    pub performance_score: f64,
    pub on_time_delivery: f64,
    pub quality_rating: f64,
    pub cost_competitiveness: f64,
    /// Average lead time in days
    pub lead_time_avg: f64,
    /// Defective units per hundred
    pub defect_rate: f64,
    pub total_orders: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SupplierRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierScorecard {
    pub supplier_id: String,
    pub name: String,
    pub overall_score: f64,
    pub risk_level: SupplierRisk,
}
