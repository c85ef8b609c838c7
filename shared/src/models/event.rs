//! Outbound dashboard events
//!
//! The engine appends these after state-changing operations; broadcasting
//! them to subscribed clients is up to the transport layer.

use serde::{Deserialize, Serialize};

use super::{Alert, Product, PurchaseOrder, StockMovement};

/// Stock level change caused by a recorded movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockChange {
    pub movement: StockMovement,
    pub previous_stock: i64,
    pub new_stock: i64,
}

/// Alerts published after an evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertBatch {
    pub alerts: Vec<Alert>,
    pub critical_count: usize,
}

/// Event envelope: `{ "type": "...", "data": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    ProductAdded(Product),
    /// Carries the product with its stock at retirement
    ProductRetired(Product),
    StockChanged(StockChange),
    ReorderPlaced(PurchaseOrder),
    NewAlert(AlertBatch),
}

impl DashboardEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::ProductAdded(_) => "product_added",
            DashboardEvent::ProductRetired(_) => "product_retired",
            DashboardEvent::StockChanged(_) => "stock_changed",
            DashboardEvent::ReorderPlaced(_) => "reorder_placed",
            DashboardEvent::NewAlert(_) => "new_alert",
        }
    }
}
