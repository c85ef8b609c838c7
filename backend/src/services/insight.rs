//! Forecast insight generation
//!
//! Compares each forecast period against the historical average and emits
//! at most one surge, one drop and one seasonality insight per product.

use shared::{DemandSeries, ForecastResult, Insight, InsightKind, InsightSeverity, Period};

use crate::config::InsightConfig;

#[derive(Debug, Clone)]
pub struct InsightService {
    config: InsightConfig,
}

impl InsightService {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Derive qualitative signals from a forecast and the history it was built on.
    ///
    /// Returns an empty vector when no threshold is crossed.
    pub fn generate_insights(&self, historical: &DemandSeries, forecast: &ForecastResult) -> Vec<Insight> {
        let mut insights = Vec::new();
        let average = historical.mean();

        if average > 0.0 {
            let surge_limit = average * self.config.surge_ratio;
            let drop_limit = average * self.config.drop_ratio;

            let surge: Vec<(Period, f64)> = forecast
                .points
                .iter()
                .filter(|p| p.point_estimate > surge_limit)
                .map(|p| (p.period, p.point_estimate))
                .collect();
            if let Some(peak) = surge.iter().map(|(_, v)| *v).reduce(f64::max) {
                let magnitude = peak / average - 1.0;
                insights.push(Insight {
                    kind: InsightKind::DemandSurge,
                    severity: InsightSeverity::High,
                    message: format!(
                        "High demand predicted for {}. Expected {:.0}% increase over the historical average.",
                        historical.product_id,
                        magnitude * 100.0
                    ),
                    recommendation: format!(
                        "Recommend increasing stock by about {:.0} units per period ahead of {}.",
                        (peak - average).ceil(),
                        surge[0].0
                    ),
                    periods: surge.iter().map(|(p, _)| *p).collect(),
                    magnitude,
                });
            }

            let drop: Vec<(Period, f64)> = forecast
                .points
                .iter()
                .filter(|p| p.point_estimate < drop_limit)
                .map(|p| (p.period, p.point_estimate))
                .collect();
            if let Some(low) = drop.iter().map(|(_, v)| *v).reduce(f64::min) {
                let magnitude = 1.0 - low / average;
                insights.push(Insight {
                    kind: InsightKind::DemandDrop,
                    severity: InsightSeverity::Medium,
                    message: format!(
                        "Demand dip predicted for {}. Expected {:.0}% below the historical average.",
                        historical.product_id,
                        magnitude * 100.0
                    ),
                    recommendation: "Consider reducing reorder quantities to avoid overstock.".to_string(),
                    periods: drop.iter().map(|(p, _)| *p).collect(),
                    magnitude,
                });
            }
        }

        if forecast.metadata.has_seasonality {
            let peak_month = forecast
                .metadata
                .peak_season_month
                .clone()
                .unwrap_or_else(|| forecast.peak_period.label());
            insights.push(Insight {
                kind: InsightKind::Seasonality,
                severity: InsightSeverity::Info,
                message: format!("Seasonal pattern detected. Peak demand in {}.", peak_month),
                recommendation: format!("Plan inventory buildup 2-3 weeks before {}.", peak_month),
                periods: vec![forecast.peak_period],
                magnitude: 0.0,
            });
        }

        tracing::debug!(
            product_id = %historical.product_id,
            count = insights.len(),
            "Insights generated"
        );

        insights
    }
}

impl Default for InsightService {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}
