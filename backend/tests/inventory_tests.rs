//! Inventory store tests
//!
//! Tests for the movement log including:
//! - Stock levels derived from the log
//! - Rejected movements leave the log untouched
//! - Monthly demand series from shipments
//! - Retired products keep their movements
//! - Concurrent writers

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use demand_forecasting_backend::services::{EventQueue, InventoryService};
use demand_forecasting_backend::EngineError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    DashboardEvent, Location, LocationKind, MovementInput, MovementKind, NewProduct, Period,
    ReplenishmentRecommendation,
};

fn store() -> InventoryService {
    let store = InventoryService::new(EventQueue::new());
    for (id, name, kind) in [
        ("WH-001", "Warehouse North", LocationKind::Warehouse),
        ("DC-001", "Distribution Center East", LocationKind::DistributionCenter),
    ] {
        store
            .add_location(Location {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                capacity: 10_000,
            })
            .unwrap();
    }
    store
}

fn new_product(sku: &str, opening_stock: i64) -> NewProduct {
    NewProduct {
        name: "Medical Supplies".to_string(),
        sku: sku.to_string(),
        category: "Healthcare".to_string(),
        unit_cost: Decimal::new(1225, 2),
        opening_stock,
        opening_location: Some("WH-001".to_string()),
        reorder_point: 800,
        safety_stock: 400,
        max_stock: 3000,
        lead_time_days: 3,
        supplier: "MedSupply Corp".to_string(),
    }
}

fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
}

fn movement(kind: MovementKind, quantity: i64, at: DateTime<Utc>) -> MovementInput {
    let (from_location, to_location) = match kind {
        MovementKind::Received => (None, Some("WH-001".to_string())),
        MovementKind::Transfer => (Some("WH-001".to_string()), Some("DC-001".to_string())),
        _ => (Some("WH-001".to_string()), None),
    };
    MovementInput {
        product_id: "PROD-001".to_string(),
        kind,
        quantity,
        from_location,
        to_location,
        reason: "Test".to_string(),
        timestamp: at,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_snapshot_folds_movements() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        store.record_movement(movement(MovementKind::Shipped, -300, opened_at())).unwrap();
        store.record_movement(movement(MovementKind::Received, 50, opened_at())).unwrap();
        store.record_movement(movement(MovementKind::Adjustment, -25, opened_at())).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.products[0].current_stock, 725);
        assert_eq!(snapshot.locations[0].current_stock, 725);
        assert_eq!(snapshot.movements.len(), 4);
    }

    #[test]
    fn test_transfer_moves_location_stock_only() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        store.record_movement(movement(MovementKind::Transfer, 400, opened_at())).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.products[0].current_stock, 1000);
        let by_id = |id: &str| {
            snapshot
                .locations
                .iter()
                .find(|l| l.location_id == id)
                .map(|l| l.current_stock)
        };
        assert_eq!(by_id("WH-001"), Some(600));
        assert_eq!(by_id("DC-001"), Some(400));
    }

    #[test]
    fn test_overdraw_rejected_and_log_unchanged() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 100), opened_at()).unwrap();

        let err = store
            .record_movement(movement(MovementKind::Shipped, -150, opened_at()))
            .unwrap_err();
        match err {
            EngineError::InsufficientStock { available, requested, .. } => {
                assert_eq!(available, 100);
                assert_eq!(requested, 150);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.snapshot().unwrap().movements.len(), 1);
    }

    #[test]
    fn test_wrong_sign_rejected() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 100), opened_at()).unwrap();
        let err = store
            .record_movement(movement(MovementKind::Shipped, 10, opened_at()))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[test]
    fn test_unknown_product_and_location() {
        let store = store();
        let err = store
            .record_movement(movement(MovementKind::Received, 10, opened_at()))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownProduct(_)));

        store.register_product(new_product("MED-003-2025", 0), opened_at()).unwrap();
        let mut input = movement(MovementKind::Received, 10, opened_at());
        input.to_location = Some("WH-404".to_string());
        let err = store.record_movement(input).unwrap_err();
        assert!(matches!(err, EngineError::UnknownLocation(loc) if loc == "WH-404"));
    }

    #[test]
    fn test_demand_series_zero_fills_months() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        store.record_movement(movement(MovementKind::Shipped, -100, opened_at())).unwrap();
        store
            .record_movement(movement(MovementKind::Shipped, -40, opened_at() + Duration::days(10)))
            .unwrap();
        store
            .record_movement(movement(MovementKind::Shipped, -70, opened_at() + Duration::days(70)))
            .unwrap();

        let through = Period::from_year_month(2025, 4).unwrap();
        let series = store.snapshot().unwrap().demand_series("PROD-001", through).unwrap();
        assert_eq!(series.values(), vec![140.0, 0.0, 70.0, 0.0]);
        assert_eq!(series.first_period(), Period::from_year_month(2025, 1));
    }

    #[test]
    fn test_demand_series_empty_without_shipments() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        let through = Period::from_year_month(2025, 4).unwrap();
        let series = store.snapshot().unwrap().demand_series("PROD-001", through).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_state_changes_publish_events() {
        let store = store();
        let events = store.events();
        store.register_product(new_product("MED-003-2025", 100), opened_at()).unwrap();
        store.record_movement(movement(MovementKind::Shipped, -30, opened_at())).unwrap();
        let _ = store.record_movement(movement(MovementKind::Shipped, -500, opened_at()));

        let drained = events.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], DashboardEvent::ProductAdded(_)));
        match &drained[1] {
            DashboardEvent::StockChanged(change) => {
                assert_eq!(change.previous_stock, 100);
                assert_eq!(change.new_stock, 70);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_retired_product_leaves_log_intact() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        store.record_movement(movement(MovementKind::Transfer, 400, opened_at())).unwrap();
        store.record_movement(movement(MovementKind::Shipped, -100, opened_at())).unwrap();
        let before = store.snapshot().unwrap();

        let retired = store.retire_product("PROD-001").unwrap();
        assert_eq!(retired.current_stock, 900);

        let after = store.snapshot().unwrap();
        assert!(after.products.is_empty());
        assert_eq!(after.movements, before.movements);
        assert_eq!(after.locations, before.locations);
        assert_eq!(store.movement_history(Some("PROD-001"), 10).unwrap().len(), 3);
        assert!(matches!(
            after.demand_series("PROD-001", Period::from_year_month(2025, 1).unwrap()),
            Err(EngineError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_retired_product_rejects_changes() {
        let store = store();
        store.register_product(new_product("MED-003-2025", 1000), opened_at()).unwrap();
        store.retire_product("PROD-001").unwrap();

        let err = store
            .record_movement(movement(MovementKind::Received, 10, opened_at()))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownProduct(_)));

        let recommendation = ReplenishmentRecommendation {
            product_id: "PROD-001".to_string(),
            product_name: "Medical Supplies".to_string(),
            current_stock: 1000,
            reorder_point: 800,
            lead_time_demand: 30.0,
            annual_demand: 3000.0,
            base_eoq: 500.0,
            adjustment_factor: 1.0,
            recommended_quantity: 500,
            should_reorder: true,
            reorder_date: None,
            days_of_supply: Some(120.0),
            order_cost: Decimal::new(612_500, 2),
            annual_savings: Decimal::ZERO,
        };
        let err = store.place_reorder(&recommendation, opened_at()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownProduct(_)));

        // SKU stays reserved; a new product gets the next id
        assert!(store.register_product(new_product("MED-003-2025", 0), opened_at()).is_err());
        let replacement = store.register_product(new_product("MED-004-2025", 0), opened_at()).unwrap();
        assert_eq!(replacement.id, "PROD-002");
    }

    #[test]
    fn test_retirement_publishes_event() {
        let store = store();
        let events = store.events();
        store.register_product(new_product("MED-003-2025", 250), opened_at()).unwrap();
        events.drain();

        store.retire_product("PROD-001").unwrap();
        let drained = events.drain();
        assert_eq!(drained.len(), 1);
        match &drained[0] {
            DashboardEvent::ProductRetired(product) => {
                assert_eq!(product.id, "PROD-001");
                assert_eq!(product.current_stock, 250);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(drained[0].event_type(), "product_retired");
    }

    #[tokio::test]
    async fn test_concurrent_shipments_never_overdraw() {
        let store = Arc::new(store());
        store.register_product(new_product("MED-003-2025", 100), opened_at()).unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .record_movement(movement(MovementKind::Shipped, -10, opened_at()))
                        .is_ok()
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(store.snapshot().unwrap().products[0].current_stock, 0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-300i64..300, 0..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock always equals the sum of accepted net changes and never goes negative
        #[test]
        fn prop_stock_equals_accepted_changes(quantities in quantity_strategy()) {
            let store = store();
            store.register_product(new_product("MED-003-2025", 500), opened_at()).unwrap();

            let mut expected = 500i64;
            for q in quantities {
                let kind = if q >= 0 { MovementKind::Received } else { MovementKind::Shipped };
                if store.record_movement(movement(kind, q, opened_at())).is_ok() {
                    expected += q;
                }
                prop_assert!(expected >= 0);
            }

            let snapshot = store.snapshot().unwrap();
            prop_assert_eq!(snapshot.products[0].current_stock, expected);
            let logged: i64 = snapshot.movements.iter().map(|m| m.net_change()).sum();
            prop_assert_eq!(logged, expected);
        }

        /// History is newest first and never longer than the limit
        #[test]
        fn prop_history_respects_limit(count in 0usize..20, limit in 0usize..25) {
            let store = store();
            store.register_product(new_product("MED-003-2025", 0), opened_at()).unwrap();
            for i in 0..count {
                store
                    .record_movement(movement(MovementKind::Received, 1, opened_at() + Duration::hours(i as i64)))
                    .unwrap();
            }
            let history = store.movement_history(Some("PROD-001"), limit).unwrap();
            prop_assert!(history.len() <= limit);
            for pair in history.windows(2) {
                prop_assert!(pair[0].timestamp >= pair[1].timestamp);
            }
        }
    }
}
