//! Replenishment optimization tests
//!
//! Tests for EOQ-based recommendations including:
//! - Order quantity for a known demand and cost profile
//! - Reorder trigger at the reorder point
//! - Cost parameter validation

use chrono::{Duration, NaiveDate};
use demand_forecasting_backend::services::{ForecastService, ReplenishmentService};
use demand_forecasting_backend::EngineError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{CostParameters, DemandSeries, ForecastResult, Period, Product};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(current_stock: i64, reorder_point: i64) -> Product {
    Product {
        id: "PROD-001".to_string(),
        name: "Electronics Components".to_string(),
        sku: "ELEC-001-2025".to_string(),
        category: "Electronics".to_string(),
        unit_cost: dec("10.00"),
        current_stock,
        reorder_point,
        safety_stock: reorder_point / 2,
        max_stock: 2000,
        lead_time_days: 6,
        supplier: "Global Electronics Ltd".to_string(),
    }
}

fn forecast_from(values: &[f64]) -> ForecastResult {
    let start = Period::from_year_month(2024, 1).unwrap();
    let series = DemandSeries::from_values("PROD-001", start, values).unwrap();
    ForecastService::default().forecast(&series, 6).unwrap()
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 100 units a month, S = 100, H = 20% of 10.00
    #[test]
    fn test_eoq_recommendation_for_flat_demand() {
        let service = ReplenishmentService::default();
        let item = product(5, 50);
        let forecast = forecast_from(&[100.0; 12]);
        let params = service.cost_parameters(&item, as_of());
        assert!((params.holding_cost - 2.0).abs() < 1e-9);

        let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();

        assert!((rec.annual_demand - 1200.0).abs() < 1e-6);
        assert!((rec.base_eoq - 346.41).abs() < 0.01);
        assert_eq!(rec.adjustment_factor, 1.0);
        assert_eq!(rec.recommended_quantity, 347);
        assert!(rec.should_reorder);
        assert_eq!(rec.reorder_date, Some(as_of()));
        assert!((rec.days_of_supply.unwrap() - 1.5).abs() < 1e-6);
        assert!((rec.lead_time_demand - 20.0).abs() < 1e-6);
        assert_eq!(rec.order_cost, dec("3470.00"));
    }

    #[test]
    fn test_reorder_date_projected_from_daily_demand() {
        let service = ReplenishmentService::default();
        let item = product(200, 50);
        let forecast = forecast_from(&[100.0; 12]);
        let params = service.cost_parameters(&item, as_of());

        let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();

        assert!(!rec.should_reorder);
        // 150 units above the reorder point at 10/3 units a day
        assert_eq!(rec.reorder_date, Some(as_of() + Duration::days(45)));
    }

    #[test]
    fn test_trickle_demand_with_deep_stock_leaves_date_open() {
        let service = ReplenishmentService::default();
        let item = product(1_000_000, 50);
        let forecast = forecast_from(&[0.0001]);
        let params = service.cost_parameters(&item, as_of());

        let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();

        assert!(!rec.should_reorder);
        assert_eq!(rec.reorder_date, None);
        assert!(rec.days_of_supply.unwrap() > 1e9);
    }

    #[test]
    fn test_zero_holding_cost_rejected() {
        let service = ReplenishmentService::default();
        let item = product(5, 50);
        let forecast = forecast_from(&[100.0; 12]);
        let params = CostParameters {
            holding_cost: 0.0,
            ..service.cost_parameters(&item, as_of())
        };

        let err = service.optimize_replenishment(&item, &forecast, &params).unwrap_err();
        match err {
            EngineError::InvalidCostParameter { parameter, value } => {
                assert_eq!(parameter, "holding_cost");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_forecast_rejected() {
        let service = ReplenishmentService::default();
        let mut item = product(5, 50);
        item.id = "PROD-002".to_string();
        let forecast = forecast_from(&[100.0; 12]);
        let params = service.cost_parameters(&item, as_of());

        let err = service.optimize_replenishment(&item, &forecast, &params).unwrap_err();
        assert!(matches!(err, EngineError::UnknownProduct(_)));
    }

    #[test]
    fn test_zero_demand_recommends_nothing() {
        let service = ReplenishmentService::default();
        let item = product(0, 50);
        let forecast = forecast_from(&[0.0; 6]);
        let params = service.cost_parameters(&item, as_of());

        let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();
        assert_eq!(rec.recommended_quantity, 0);
        assert_eq!(rec.days_of_supply, None);
        assert_eq!(rec.annual_savings, Decimal::ZERO);
    }

    #[test]
    fn test_plan_only_includes_products_to_reorder() {
        let service = ReplenishmentService::default();
        let low = product(5, 50);
        let mut healthy = product(900, 50);
        healthy.id = "PROD-002".to_string();
        let mut healthy_forecast = forecast_from(&[100.0; 12]);
        healthy_forecast.product_id = "PROD-002".to_string();

        let plan = service
            .recommend_all(
                &[(low, forecast_from(&[100.0; 12])), (healthy, healthy_forecast)],
                as_of(),
            )
            .unwrap();

        assert_eq!(plan.summary.total_items, 1);
        assert_eq!(plan.recommendations[0].product_id, "PROD-001");
        assert_eq!(plan.summary.total_investment, dec("3470.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn history_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(1.0..1500.0f64, 2..30)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Trend adjustment stays within the configured band
        #[test]
        fn prop_adjustment_bounded(values in history_strategy(), stock in 0i64..3000) {
            let service = ReplenishmentService::default();
            let item = product(stock, 500);
            let forecast = forecast_from(&values);
            let params = service.cost_parameters(&item, as_of());

            let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();
            prop_assert!(rec.adjustment_factor >= 0.8 - 1e-12);
            prop_assert!(rec.adjustment_factor <= 1.2 + 1e-12);
            prop_assert!(rec.recommended_quantity >= 0);
            prop_assert!(rec.annual_savings >= Decimal::ZERO);
        }

        /// Reorder is due exactly when stock is at or below the reorder point
        #[test]
        fn prop_should_reorder_matches_reorder_point(stock in 0i64..1000, reorder_point in 0i64..1000) {
            let service = ReplenishmentService::default();
            let item = product(stock, reorder_point);
            let forecast = forecast_from(&[100.0; 12]);
            let params = service.cost_parameters(&item, as_of());

            let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();
            prop_assert_eq!(rec.should_reorder, stock <= reorder_point);
        }

        /// Any stock and demand level yields a recommendation, and a projected
        /// reorder date never lies in the past
        #[test]
        fn prop_reorder_date_never_panics(
            demand in 1e-9..1e4f64,
            stock in 0i64..i64::MAX / 4,
        ) {
            let service = ReplenishmentService::default();
            let item = product(stock, 50);
            let forecast = forecast_from(&[demand; 3]);
            let params = service.cost_parameters(&item, as_of());

            let rec = service.optimize_replenishment(&item, &forecast, &params).unwrap();
            if let Some(date) = rec.reorder_date {
                prop_assert!(date >= as_of());
            }
        }

        /// Non-positive order cost is always rejected
        #[test]
        fn prop_non_positive_order_cost_rejected(order_cost in -500.0..=0.0f64) {
            let service = ReplenishmentService::default();
            let item = product(5, 50);
            let forecast = forecast_from(&[100.0; 12]);
            let params = CostParameters {
                order_cost,
                ..service.cost_parameters(&item, as_of())
            };
            let is_invalid_cost = matches!(
                service.optimize_replenishment(&item, &forecast, &params),
                Err(EngineError::InvalidCostParameter { .. })
            );
            prop_assert!(is_invalid_cost);
        }
    }
}
