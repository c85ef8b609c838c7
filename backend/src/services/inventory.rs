//! Inventory store: catalog, locations and the append-only movement log
//!
//! Stock is never written directly. Product and location levels are derived
//! by folding the movement log whenever a snapshot is taken, and every
//! reader works on a snapshot rather than the live log.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use shared::{
    validate_movement, validate_new_product, validate_sku, DashboardEvent, DemandSeries, Location,
    LocationStock, MovementInput, MovementKind, NewProduct, Period, Product, PurchaseOrder,
    ReplenishmentRecommendation, StockChange, StockMovement,
};

use super::notification::EventQueue;
use crate::error::{EngineError, EngineResult};

/// Inventory service holding the catalog and movement log
#[derive(Debug, Default)]
pub struct InventoryService {
    state: RwLock<StoreState>,
    events: EventQueue,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Catalog entries; `current_stock` is filled in at snapshot time
    products: Vec<Product>,
    /// Retired product ids; their entries and movements are kept
    retired: HashSet<String>,
    locations: Vec<Location>,
    movements: Vec<StockMovement>,
    purchase_orders: Vec<PurchaseOrder>,
}

impl StoreState {
    /// Active catalog entry; retired products are unknown to callers
    fn product(&self, product_id: &str) -> EngineResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id && !self.retired.contains(product_id))
            .ok_or_else(|| EngineError::UnknownProduct(product_id.to_string()))
    }

    fn has_location(&self, location_id: &str) -> bool {
        self.locations.iter().any(|l| l.id == location_id)
    }

    fn product_stock(&self, product_id: &str) -> i64 {
        self.movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .map(StockMovement::net_change)
            .sum()
    }

    fn product_stock_at(&self, product_id: &str, location_id: &str) -> i64 {
        self.movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .flat_map(|m| m.location_deltas())
            .filter(|(loc, _)| *loc == location_id)
            .map(|(_, delta)| delta)
            .sum()
    }
}

/// Point-in-time copy of the store
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub products: Vec<Product>,
    pub locations: Vec<LocationStock>,
    pub movements: Vec<StockMovement>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub taken_at: DateTime<Utc>,
}

impl InventorySnapshot {
    pub fn product(&self, product_id: &str) -> EngineResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| EngineError::UnknownProduct(product_id.to_string()))
    }

    /// Monthly demand built from shipped movements.
    ///
    /// Periods without shipments are zero-filled from the first shipment
    /// through `through`. Shipments after `through` are ignored.
    pub fn demand_series(&self, product_id: &str, through: Period) -> EngineResult<DemandSeries> {
        self.product(product_id)?;

        let mut observations: Vec<(Period, f64)> = self
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .filter_map(|m| {
                m.demand_units()
                    .map(|units| (Period::from_date(&m.timestamp), units as f64))
            })
            .filter(|(period, _)| *period <= through)
            .collect();
        if !observations.is_empty() {
            observations.push((through, 0.0));
        }

        DemandSeries::from_observations(product_id, observations)
            .map_err(|e| EngineError::Internal(e.to_string()))
    }

    /// Movements newest first, optionally for one product
    pub fn movement_history(&self, product_id: Option<&str>, limit: usize) -> Vec<StockMovement> {
        recent_movements(&self.movements, product_id, limit)
    }
}

impl InventoryService {
    pub fn new(events: EventQueue) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            events,
        }
    }

    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| EngineError::Internal("inventory lock poisoned".to_string()))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| EngineError::Internal("inventory lock poisoned".to_string()))
    }

    pub fn add_location(&self, location: Location) -> EngineResult<()> {
        if location.capacity <= 0 {
            return Err(EngineError::validation("capacity", "Capacity must be positive"));
        }
        let mut state = self.write()?;
        if state.has_location(&location.id) {
            return Err(EngineError::validation(
                "id",
                format!("Location {} already exists", location.id),
            ));
        }
        tracing::info!(location_id = %location.id, "Location added");
        state.locations.push(location);
        Ok(())
    }

    /// Register a product. Opening stock is recorded as a received movement.
    pub fn register_product(&self, input: NewProduct, at: DateTime<Utc>) -> EngineResult<Product> {
        input.validate()?;
        validate_new_product(&input).map_err(|e| EngineError::validation("reorder_point", e))?;
        validate_sku(&input.sku).map_err(|e| EngineError::validation("sku", e))?;

        let product = {
            let mut state = self.write()?;
            if state.products.iter().any(|p| p.sku == input.sku) {
                return Err(EngineError::validation(
                    "sku",
                    format!("SKU {} already registered", input.sku),
                ));
            }
            if let Some(loc) = input.opening_location.as_deref() {
                if !state.has_location(loc) {
                    return Err(EngineError::UnknownLocation(loc.to_string()));
                }
            }

            let product = Product {
                id: format!("PROD-{:03}", state.products.len() + 1),
                name: input.name,
                sku: input.sku,
                category: input.category,
                unit_cost: input.unit_cost,
                current_stock: 0,
                reorder_point: input.reorder_point,
                safety_stock: input.safety_stock,
                max_stock: input.max_stock,
                lead_time_days: input.lead_time_days,
                supplier: input.supplier,
            };
            state.products.push(product.clone());

            if input.opening_stock > 0 {
                state.movements.push(StockMovement {
                    id: Uuid::new_v4(),
                    product_id: product.id.clone(),
                    kind: MovementKind::Received,
                    quantity: input.opening_stock,
                    from_location: None,
                    to_location: input.opening_location,
                    reason: "Opening stock".to_string(),
                    timestamp: at,
                });
            }

            Product {
                current_stock: input.opening_stock,
                ..product
            }
        };

        tracing::info!(product_id = %product.id, sku = %product.sku, "Product registered");
        self.events.publish(DashboardEvent::ProductAdded(product.clone()));
        Ok(product)
    }

    /// Take a product out of the active catalog.
    ///
    /// The product disappears from snapshots and rejects further movements
    /// and reorders. Its movements stay in the log, so location stock and
    /// history are unchanged, and its SKU stays reserved.
    pub fn retire_product(&self, product_id: &str) -> EngineResult<Product> {
        let product = {
            let mut state = self.write()?;
            let product = Product {
                current_stock: state.product_stock(product_id),
                ..state.product(product_id)?.clone()
            };
            state.retired.insert(product.id.clone());
            product
        };

        tracing::info!(
            product_id = %product.id,
            remaining_stock = product.current_stock,
            "Product retired"
        );
        self.events.publish(DashboardEvent::ProductRetired(product.clone()));
        Ok(product)
    }

    /// Append a movement to the log after checking it against current stock
    pub fn record_movement(&self, input: MovementInput) -> EngineResult<StockMovement> {
        let result = self.try_record(input);
        match &result {
            Ok((movement, previous, new)) => {
                tracing::info!(
                    product_id = %movement.product_id,
                    kind = movement.kind.as_str(),
                    quantity = movement.quantity,
                    previous_stock = previous,
                    new_stock = new,
                    "Stock movement recorded"
                );
                self.events.publish(DashboardEvent::StockChanged(StockChange {
                    movement: movement.clone(),
                    previous_stock: *previous,
                    new_stock: *new,
                }));
            }
            Err(e) => tracing::warn!("Stock movement rejected: {}", e),
        }
        result.map(|(movement, _, _)| movement)
    }

    fn try_record(&self, input: MovementInput) -> EngineResult<(StockMovement, i64, i64)> {
        let mut state = self.write()?;
        state.product(&input.product_id)?;
        validate_movement(&input).map_err(|e| EngineError::validation("quantity", e))?;

        for loc in [&input.from_location, &input.to_location].into_iter().flatten() {
            if !state.has_location(loc) {
                return Err(EngineError::UnknownLocation(loc.clone()));
            }
        }

        let movement = StockMovement {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            kind: input.kind,
            quantity: input.quantity,
            from_location: input.from_location,
            to_location: input.to_location,
            reason: input.reason,
            timestamp: input.timestamp,
        };

        let previous = state.product_stock(&movement.product_id);
        let new_stock = previous + movement.net_change();
        if new_stock < 0 {
            return Err(EngineError::InsufficientStock {
                product_id: movement.product_id.clone(),
                available: previous,
                requested: -movement.net_change(),
            });
        }
        for (loc, delta) in movement.location_deltas() {
            if delta >= 0 {
                continue;
            }
            let available = state.product_stock_at(&movement.product_id, loc);
            if available + delta < 0 {
                return Err(EngineError::InsufficientStock {
                    product_id: movement.product_id.clone(),
                    available,
                    requested: -delta,
                });
            }
        }

        state.movements.push(movement.clone());
        Ok((movement, previous, new_stock))
    }

    /// Place a purchase order for a recommendation. Stock changes only when
    /// the order is received as a movement.
    pub fn place_reorder(
        &self,
        recommendation: &ReplenishmentRecommendation,
        at: DateTime<Utc>,
    ) -> EngineResult<PurchaseOrder> {
        if recommendation.recommended_quantity <= 0 {
            return Err(EngineError::validation(
                "recommended_quantity",
                "Order quantity must be positive",
            ));
        }

        let order = {
            let mut state = self.write()?;
            let product = state.product(&recommendation.product_id)?;
            let order = PurchaseOrder {
                id: Uuid::new_v4(),
                product_id: product.id.clone(),
                supplier: product.supplier.clone(),
                quantity: recommendation.recommended_quantity,
                order_cost: recommendation.order_cost,
                placed_at: at,
                expected_arrival: (at + Duration::days(product.lead_time_days as i64)).date_naive(),
            };
            state.purchase_orders.push(order.clone());
            order
        };

        tracing::info!(
            product_id = %order.product_id,
            quantity = order.quantity,
            expected_arrival = %order.expected_arrival,
            "Reorder placed"
        );
        self.events.publish(DashboardEvent::ReorderPlaced(order.clone()));
        Ok(order)
    }

    /// Consistent copy of the store with stock levels folded from the log
    pub fn snapshot(&self) -> EngineResult<InventorySnapshot> {
        let state = self.read()?;

        let mut product_stock: HashMap<&str, i64> = HashMap::new();
        let mut location_stock: HashMap<&str, i64> = HashMap::new();
        for movement in &state.movements {
            *product_stock.entry(movement.product_id.as_str()).or_insert(0) += movement.net_change();
            for (loc, delta) in movement.location_deltas() {
                *location_stock.entry(loc).or_insert(0) += delta;
            }
        }

        let products = state
            .products
            .iter()
            .filter(|p| !state.retired.contains(&p.id))
            .map(|p| Product {
                current_stock: product_stock.get(p.id.as_str()).copied().unwrap_or(0),
                ..p.clone()
            })
            .collect();
        let locations = state
            .locations
            .iter()
            .map(|l| LocationStock {
                location_id: l.id.clone(),
                name: l.name.clone(),
                capacity: l.capacity,
                current_stock: location_stock.get(l.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        Ok(InventorySnapshot {
            products,
            locations,
            movements: state.movements.clone(),
            purchase_orders: state.purchase_orders.clone(),
            taken_at: Utc::now(),
        })
    }

    /// Movements newest first, optionally for one product
    pub fn movement_history(&self, product_id: Option<&str>, limit: usize) -> EngineResult<Vec<StockMovement>> {
        let state = self.read()?;
        Ok(recent_movements(&state.movements, product_id, limit))
    }
}

fn recent_movements(movements: &[StockMovement], product_id: Option<&str>, limit: usize) -> Vec<StockMovement> {
    let mut selected: Vec<StockMovement> = movements
        .iter()
        .filter(|m| product_id.map_or(true, |id| m.product_id == id))
        .cloned()
        .collect();
    // Stable sort keeps log order for equal timestamps; reverse gives newest first
    selected.sort_by_key(|m| m.timestamp);
    selected.reverse();
    selected.truncate(limit);
    selected
}
