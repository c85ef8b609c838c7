//! Reporting service for dashboard KPIs
//! Summarizes inventory value, stock health, forecast accuracy and location utilization

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::{Alert, AlertSummary, ForecastResult, LocationStock, Product, StockStatus};

use super::alert::summarize;

/// Reporting service
pub struct ReportingService;

/// Dashboard overview KPIs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardOverview {
    pub total_products: usize,
    pub total_locations: usize,
    pub total_inventory_value: Decimal,
    pub critical_alerts: usize,
    /// Percentage of products at or below their reorder point
    pub stockout_rate: f64,
    pub avg_lead_time_days: f64,
    /// Mean holdout accuracy across forecasts, `None` without forecasts
    pub forecast_accuracy: Option<f64>,
    pub location_utilization: Vec<LocationUtilization>,
    pub alert_summary: AlertSummary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    Optimal,
    Warning,
}

/// Utilization row for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationUtilization {
    pub location_id: String,
    pub name: String,
    pub utilization_percent: f64,
    pub status: UtilizationStatus,
}

impl ReportingService {
    /// Build the dashboard overview from a snapshot and its evaluation results
    pub fn dashboard_overview(
        products: &[Product],
        locations: &[LocationStock],
        forecasts: &[ForecastResult],
        alerts: &[Alert],
    ) -> DashboardOverview {
        let total_inventory_value: Decimal = products.iter().map(Product::inventory_value).sum();

        let at_risk = products
            .iter()
            .filter(|p| matches!(p.stock_status(), StockStatus::Critical | StockStatus::Low))
            .count();
        let stockout_rate = percentage(at_risk, products.len());

        let avg_lead_time_days = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.lead_time_days as f64).sum::<f64>() / products.len() as f64
        };

        let forecast_accuracy = (!forecasts.is_empty()).then(|| {
            let mean = forecasts.iter().map(|f| f.metadata.accuracy).sum::<f64>() / forecasts.len() as f64;
            round1(mean)
        });

        let alert_summary = summarize(alerts);

        DashboardOverview {
            total_products: products.len(),
            total_locations: locations.len(),
            total_inventory_value: total_inventory_value.round_dp(2),
            critical_alerts: alert_summary.critical,
            stockout_rate,
            avg_lead_time_days: round1(avg_lead_time_days),
            forecast_accuracy,
            location_utilization: locations.iter().map(Self::utilization).collect(),
            alert_summary,
        }
    }

    /// Utilization between 60% and 85% is optimal
    pub fn utilization(location: &LocationStock) -> LocationUtilization {
        let percent = location.utilization_percent();
        let status = if (60.0..=85.0).contains(&percent) {
            UtilizationStatus::Optimal
        } else {
            UtilizationStatus::Warning
        };
        LocationUtilization {
            location_id: location.location_id.clone(),
            name: location.name.clone(),
            utilization_percent: round1(percent),
            status,
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
