//! Alert evaluation
//!
//! Stateless rule set evaluated over a snapshot of products, forecasts,
//! supplier metrics, route weather and location stock. Every rule runs
//! independently; the same inputs and timestamp always give the same alerts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::json;

use shared::{
    Alert, AlertSeverity, AlertSummary, AlertType, ForecastResult, LocationStock, Product,
    RouteWeather, SupplierPerformance,
};

use super::allocation::days_of_supply;
use crate::config::{AlertConfig, InsightConfig};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct AlertService {
    config: AlertConfig,
    /// Shared with the surge insight so a spike alert always has a matching surge
    spike_ratio: f64,
    days_per_period: f64,
}

impl AlertService {
    pub fn new(config: AlertConfig, insights: &InsightConfig, days_per_period: f64) -> Self {
        Self {
            config,
            spike_ratio: insights.surge_ratio,
            days_per_period,
        }
    }

    /// Evaluate every rule and return alerts ordered critical, warning, info.
    ///
    /// Fails with `UnknownProduct` if a forecast refers to a product not in `products`.
    pub fn evaluate_alerts(
        &self,
        products: &[Product],
        forecasts: &[ForecastResult],
        suppliers: &[SupplierPerformance],
        weather: &[RouteWeather],
        locations: &[LocationStock],
        evaluated_at: DateTime<Utc>,
    ) -> EngineResult<Vec<Alert>> {
        let by_product: HashMap<&str, &ForecastResult> = forecasts
            .iter()
            .map(|f| (f.product_id.as_str(), f))
            .collect();
        for forecast in forecasts {
            if !products.iter().any(|p| p.id == forecast.product_id) {
                return Err(EngineError::UnknownProduct(forecast.product_id.clone()));
            }
        }

        let stamp = evaluated_at.format("%Y%m%d%H%M%S").to_string();
        let mut alerts = Vec::new();

        for product in products {
            let forecast = by_product.get(product.id.as_str()).copied();
            self.check_stock_levels(product, forecast, &stamp, evaluated_at, &mut alerts);
            if let Some(forecast) = forecast {
                self.check_demand_spike(product, forecast, &stamp, evaluated_at, &mut alerts);
            }
        }
        self.check_suppliers(products, suppliers, &stamp, evaluated_at, &mut alerts);
        self.check_weather(products, weather, &stamp, evaluated_at, &mut alerts);
        self.check_locations(locations, &stamp, evaluated_at, &mut alerts);

        alerts.sort_by_key(|a| a.severity.rank());

        tracing::debug!(count = alerts.len(), "Alerts evaluated");
        Ok(alerts)
    }

    fn check_stock_levels(
        &self,
        product: &Product,
        forecast: Option<&ForecastResult>,
        stamp: &str,
        at: DateTime<Utc>,
        alerts: &mut Vec<Alert>,
    ) {
        let dos = forecast.and_then(|f| days_of_supply(product.current_stock, f, self.days_per_period));
        let within_lead_time = dos.is_some_and(|d| d <= product.lead_time_days as f64);

        if product.current_stock <= 0 || within_lead_time {
            alerts.push(product_alert(
                product,
                AlertType::StockoutRisk,
                AlertSeverity::Critical,
                format!(
                    "CRITICAL: Stock at {} units (Safety stock: {})",
                    product.current_stock, product.safety_stock
                ),
                format!(
                    "IMMEDIATE ACTION REQUIRED: Reorder {} units within 24 hours",
                    product.reorder_point * 2
                ),
                stamp,
                at,
                json!({
                    "current_stock": product.current_stock,
                    "safety_stock": product.safety_stock,
                    "days_of_supply": dos,
                    "lead_time_days": product.lead_time_days,
                }),
            ));
        }

        if product.current_stock <= product.reorder_point {
            alerts.push(product_alert(
                product,
                AlertType::ReorderRequired,
                AlertSeverity::Warning,
                format!(
                    "Stock below reorder point: {} units (Reorder at: {})",
                    product.current_stock, product.reorder_point
                ),
                format!(
                    "Place order for {} units. Lead time: {} days",
                    product.reorder_point, product.lead_time_days
                ),
                stamp,
                at,
                json!({
                    "current_stock": product.current_stock,
                    "reorder_point": product.reorder_point,
                }),
            ));
        }

        let overstock_level = product.reorder_point as f64 * self.config.overstock_multiplier;
        if product.current_stock as f64 > overstock_level {
            let excess = product.current_stock - overstock_level.floor() as i64;
            alerts.push(product_alert(
                product,
                AlertType::Overstock,
                AlertSeverity::Info,
                format!(
                    "Overstock detected: {} units ({} above optimal level)",
                    product.current_stock, excess
                ),
                format!(
                    "Consider a promotional campaign or transfer {} units to a high-demand location",
                    excess / 2
                ),
                stamp,
                at,
                json!({
                    "current_stock": product.current_stock,
                    "overstock_level": overstock_level,
                    "excess": excess,
                }),
            ));
        }
    }

    fn check_demand_spike(
        &self,
        product: &Product,
        forecast: &ForecastResult,
        stamp: &str,
        at: DateTime<Utc>,
        alerts: &mut Vec<Alert>,
    ) {
        let mean = forecast.metadata.history_mean;
        if mean <= 0.0 {
            return;
        }
        let peak = forecast
            .points
            .iter()
            .map(|p| p.point_estimate)
            .fold(f64::NEG_INFINITY, f64::max);
        if peak <= mean * self.spike_ratio {
            return;
        }

        let spike_percent = (peak / mean - 1.0) * 100.0;
        alerts.push(product_alert(
            product,
            AlertType::DemandSpike,
            AlertSeverity::Warning,
            format!(
                "Demand spike forecast: {:.0}% above the historical average",
                spike_percent
            ),
            format!(
                "Increase stock allocation by {:.0}% and expedite next shipment",
                spike_percent
            ),
            stamp,
            at,
            json!({
                "spike_percentage": spike_percent,
                "history_mean": mean,
                "predicted_peak": peak,
                "peak_period": forecast.peak_period.label(),
            }),
        ));
    }

    fn check_suppliers(
        &self,
        products: &[Product],
        suppliers: &[SupplierPerformance],
        stamp: &str,
        at: DateTime<Utc>,
        alerts: &mut Vec<Alert>,
    ) {
        for supplier in suppliers {
            if supplier.on_time_delivery >= self.config.supplier_on_time_threshold {
                continue;
            }
            for product in products
                .iter()
                .filter(|p| p.supplier == supplier.name || p.supplier == supplier.id)
            {
                let mut alert = product_alert(
                    product,
                    AlertType::SupplierDelay,
                    AlertSeverity::Warning,
                    format!(
                        "Supplier '{}' on-time delivery at {:.1}%",
                        supplier.name, supplier.on_time_delivery
                    ),
                    "Contact alternative suppliers, inform customers of potential delays and adjust safety stock levels"
                        .to_string(),
                    stamp,
                    at,
                    json!({
                        "supplier_id": supplier.id,
                        "on_time_delivery": supplier.on_time_delivery,
                        "lead_time_avg": supplier.lead_time_avg,
                        "product_lead_time": product.lead_time_days,
                    }),
                );
                alert.location = Some(supplier.name.clone());
                alerts.push(alert);
            }
        }
    }

    fn check_weather(
        &self,
        products: &[Product],
        routes: &[RouteWeather],
        stamp: &str,
        at: DateTime<Utc>,
        alerts: &mut Vec<Alert>,
    ) {
        for route in routes {
            let risk = route.max_delay_risk();
            if risk <= self.config.weather_warning_risk {
                continue;
            }
            let severity = if risk >= self.config.weather_critical_risk {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let affected: Vec<&str> = products
                .iter()
                .filter(|p| p.supplier == route.supplier)
                .map(|p| p.id.as_str())
                .collect();
            let conditions: Vec<String> = route
                .days
                .iter()
                .filter(|d| d.delay_risk > self.config.weather_warning_risk || d.condition.is_severe())
                .map(|d| d.condition.to_string())
                .collect();

            alerts.push(Alert {
                id: format!("ALERT-{}-WEATHER_IMPACT-{}", slug(&route.route), stamp),
                alert_type: AlertType::WeatherImpact,
                severity,
                product_id: None,
                product_name: None,
                location: Some(route.route.clone()),
                message: format!(
                    "Weather on route {} may delay deliveries (delay risk {:.0}%)",
                    route.route,
                    risk * 100.0
                ),
                recommended_action:
                    "Increase safety stock by 15-20%, activate backup shipping routes and prepare contingency plans"
                        .to_string(),
                timestamp: at,
                metadata: json!({
                    "supplier": route.supplier,
                    "delay_risk": risk,
                    "conditions": conditions,
                    "affected_products": affected,
                }),
            });
        }
    }

    fn check_locations(&self, locations: &[LocationStock], stamp: &str, at: DateTime<Utc>, alerts: &mut Vec<Alert>) {
        for location in locations {
            let utilization = location.utilization_percent();
            if utilization <= self.config.capacity_threshold_percent {
                continue;
            }
            alerts.push(Alert {
                id: format!("ALERT-{}-LOCATION_CAPACITY-{}", location.location_id, stamp),
                alert_type: AlertType::LocationCapacity,
                severity: AlertSeverity::Warning,
                product_id: None,
                product_name: None,
                location: Some(location.name.clone()),
                message: format!("Capacity at {:.1}% - approaching maximum", utilization),
                recommended_action:
                    "Transfer stock to alternative locations, expedite outbound shipments and review storage layout"
                        .to_string(),
                timestamp: at,
                metadata: json!({
                    "location_id": location.location_id,
                    "current_utilization": (utilization * 10.0).round() / 10.0,
                    "current_stock": location.current_stock,
                    "capacity": location.capacity,
                    "available_space": location.capacity - location.current_stock,
                }),
            });
        }
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new(AlertConfig::default(), &InsightConfig::default(), 30.0)
    }
}

/// Count alerts by severity
pub fn summarize(alerts: &[Alert]) -> AlertSummary {
    alerts.iter().fold(
        AlertSummary {
            total: alerts.len(),
            ..AlertSummary::default()
        },
        |mut summary, alert| {
            match alert.severity {
                AlertSeverity::Critical => summary.critical += 1,
                AlertSeverity::Warning => summary.warning += 1,
                AlertSeverity::Info => summary.info += 1,
            }
            summary
        },
    )
}

#[allow(clippy::too_many_arguments)]
fn product_alert(
    product: &Product,
    alert_type: AlertType,
    severity: AlertSeverity,
    message: String,
    recommended_action: String,
    stamp: &str,
    at: DateTime<Utc>,
    metadata: serde_json::Value,
) -> Alert {
    Alert {
        id: format!(
            "ALERT-{}-{}-{}",
            product.id,
            alert_type.as_str().to_uppercase(),
            stamp
        ),
        alert_type,
        severity,
        product_id: Some(product.id.clone()),
        product_name: Some(product.name.clone()),
        location: Some("All Locations".to_string()),
        message,
        recommended_action,
        timestamp: at,
        metadata,
    }
}

/// Uppercase alphanumeric id fragment from a free-form name
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_by_severity() {
        let at = Utc::now();
        let make = |severity| Alert {
            id: "A".to_string(),
            alert_type: AlertType::Overstock,
            severity,
            product_id: None,
            product_name: None,
            location: None,
            message: String::new(),
            recommended_action: String::new(),
            timestamp: at,
            metadata: serde_json::Value::Null,
        };
        let alerts = vec![
            make(AlertSeverity::Critical),
            make(AlertSeverity::Warning),
            make(AlertSeverity::Warning),
            make(AlertSeverity::Info),
        ];
        let summary = summarize(&alerts);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.warning, 2);
        assert_eq!(summary.info, 1);
    }

    #[test]
    fn test_slug_replaces_separators() {
        assert_eq!(slug("Shanghai → DC"), "SHANGHAI___DC");
    }
}
