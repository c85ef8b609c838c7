//! Stock movement models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Moves stock between two locations; product total is unchanged
    Transfer,
    /// Manual correction, either sign
    Adjustment,
    /// Inbound from a supplier (positive quantity)
    Received,
    /// Outbound to customers (negative quantity); this is observed demand
    Shipped,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Transfer => "transfer",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Received => "received",
            MovementKind::Shipped => "shipped",
        }
    }
}

/// An entry in the append-only movement log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: String,
    pub kind: MovementKind,
    /// Signed quantity; for transfers, the amount moved
    pub quantity: i64,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl StockMovement {
    /// Signed effect of this movement on the product's total stock
    pub fn net_change(&self) -> i64 {
        match self.kind {
            MovementKind::Transfer => 0,
            _ => self.quantity,
        }
    }

    /// Signed effect of this movement on each location it touches
    pub fn location_deltas(&self) -> Vec<(&str, i64)> {
        match self.kind {
            MovementKind::Transfer => {
                let mut deltas = Vec::with_capacity(2);
                if let Some(from) = self.from_location.as_deref() {
                    deltas.push((from, -self.quantity));
                }
                if let Some(to) = self.to_location.as_deref() {
                    deltas.push((to, self.quantity));
                }
                deltas
            }
            MovementKind::Received => self
                .to_location
                .as_deref()
                .map(|to| vec![(to, self.quantity)])
                .unwrap_or_default(),
            MovementKind::Shipped => self
                .from_location
                .as_deref()
                .map(|from| vec![(from, self.quantity)])
                .unwrap_or_default(),
            MovementKind::Adjustment => self
                .to_location
                .as_deref()
                .or(self.from_location.as_deref())
                .map(|loc| vec![(loc, self.quantity)])
                .unwrap_or_default(),
        }
    }

    /// Units of customer demand represented by this movement
    pub fn demand_units(&self) -> Option<i64> {
        match self.kind {
            MovementKind::Shipped => Some(-self.quantity),
            _ => None,
        }
    }
}

/// Input for recording a stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementInput {
    pub product_id: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// A replenishment order placed from a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub product_id: String,
    pub supplier: String,
    pub quantity: i64,
    pub order_cost: Decimal,
    pub placed_at: DateTime<Utc>,
    pub expected_arrival: NaiveDate,
}
