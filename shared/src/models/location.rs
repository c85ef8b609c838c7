//! Storage location models

use serde::{Deserialize, Serialize};

/// A warehouse or distribution center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub kind: LocationKind,
    pub capacity: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Warehouse,
    DistributionCenter,
}

/// Stock held at a location at snapshot time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationStock {
    pub location_id: String,
    pub name: String,
    pub capacity: i64,
    pub current_stock: i64,
}

impl LocationStock {
    /// Utilization as a percentage of capacity
    pub fn utilization_percent(&self) -> f64 {
        if self.capacity <= 0 {
            return 0.0;
        }
        self.current_stock as f64 / self.capacity as f64 * 100.0
    }
}
