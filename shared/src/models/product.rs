//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_unit_cost;

/// A stocked product
///
/// `current_stock` is derived by folding the product's movement log when a
/// snapshot is taken; nothing writes it directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit_cost: Decimal,
    pub current_stock: i64,
    pub reorder_point: i64,
    pub safety_stock: i64,
    pub max_stock: i64,
    pub lead_time_days: u32,
    /// Supplier name, matched against supplier performance records
    pub supplier: String,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        classify_stock(
            self.current_stock,
            self.safety_stock,
            self.reorder_point,
            self.max_stock,
        )
    }

    /// Value of the stock on hand at unit cost
    pub fn inventory_value(&self) -> Decimal {
        Decimal::from(self.current_stock) * self.unit_cost
    }
}

/// Input for registering a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 3, max = 32))]
    pub sku: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    #[validate(custom = "validate_unit_cost")]
    pub unit_cost: Decimal,
    #[validate(range(min = 0))]
    pub opening_stock: i64,
    /// Location that receives the opening stock
    #[serde(default)]
    pub opening_location: Option<String>,
    #[validate(range(min = 0))]
    pub reorder_point: i64,
    #[validate(range(min = 0))]
    pub safety_stock: i64,
    #[validate(range(min = 1))]
    pub max_stock: i64,
    #[validate(range(min = 1, max = 365))]
    pub lead_time_days: u32,
    #[validate(length(min = 1, max = 120))]
    pub supplier: String,
}

/// Stock status relative to the product's thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// At or below safety stock
    Critical,
    /// At or below the reorder point
    Low,
    Normal,
    /// Above max stock
    Overstock,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Critical => write!(f, "critical"),
            StockStatus::Low => write!(f, "low"),
            StockStatus::Normal => write!(f, "normal"),
            StockStatus::Overstock => write!(f, "overstock"),
        }
    }
}

/// Classify a stock level against safety, reorder and max thresholds
pub fn classify_stock(current: i64, safety: i64, reorder: i64, max: i64) -> StockStatus {
    if current <= safety {
        StockStatus::Critical
    } else if current <= reorder {
        StockStatus::Low
    } else if current > max {
        StockStatus::Overstock
    } else {
        StockStatus::Normal
    }
}
