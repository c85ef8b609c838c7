//! Dashboard orchestration
//!
//! One request-scoped evaluation pass over an inventory snapshot:
//! forecast every product with demand history, then derive insights,
//! replenishment, allocation, alerts and the overview from those forecasts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared::{
    AllocationEntry, Alert, ForecastResult, Insight, Period, Product, ReplenishmentPlan,
    RouteWeather, SupplierPerformance, SupplierScorecard, WeatherImpact,
};

use super::{
    AlertService, AllocationService, DashboardOverview, ForecastService, InsightService,
    InventorySnapshot, ReplenishmentService, ReportingService, SupplierService, WeatherService,
};
use crate::config::Config;
use crate::error::{EngineError, EngineResult};

/// Externally resolved inputs for an evaluation pass
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub suppliers: Vec<SupplierPerformance>,
    pub weather: Vec<RouteWeather>,
    pub evaluated_at: DateTime<Utc>,
    /// Last demand period included in the history (usually the last complete month)
    pub demand_through: Period,
}

impl DashboardContext {
    /// Context whose demand history ends with the month before `evaluated_at`
    pub fn new(
        suppliers: Vec<SupplierPerformance>,
        weather: Vec<RouteWeather>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        let current = Period::from_date(&evaluated_at);
        Self {
            suppliers,
            weather,
            evaluated_at,
            demand_through: Period(current.0.saturating_sub(1)),
        }
    }
}

/// Insights for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInsights {
    pub product_id: String,
    pub insights: Vec<Insight>,
}

/// Everything the dashboard renders for one evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub forecasts: Vec<ForecastResult>,
    pub insights: Vec<ProductInsights>,
    pub replenishment: ReplenishmentPlan,
    pub allocations: Vec<AllocationEntry>,
    pub alerts: Vec<Alert>,
    pub supplier_scorecards: Vec<SupplierScorecard>,
    pub weather_impacts: Vec<WeatherImpact>,
    pub overview: DashboardOverview,
}

/// Holds the configured engine services; no mutable state
#[derive(Debug, Clone)]
pub struct DashboardService {
    horizon: u32,
    forecast: ForecastService,
    insight: InsightService,
    replenishment: ReplenishmentService,
    allocation: AllocationService,
    alert: AlertService,
}

impl DashboardService {
    pub fn new(config: &Config) -> Self {
        let days_per_period = config.replenishment.days_per_period;
        Self {
            horizon: config.forecast.horizon,
            forecast: ForecastService::new(config.forecast.clone()),
            insight: InsightService::new(config.insights.clone()),
            replenishment: ReplenishmentService::new(config.replenishment.clone()),
            allocation: AllocationService::new(config.allocation.clone(), days_per_period),
            alert: AlertService::new(config.alerts.clone(), &config.insights, days_per_period),
        }
    }

    /// Run a full evaluation pass.
    ///
    /// Products without any demand history get no forecast; they still take
    /// part in stock alerts and the overview.
    pub fn evaluate(&self, snapshot: &InventorySnapshot, context: &DashboardContext) -> EngineResult<DashboardReport> {
        let mut forecasts = Vec::new();
        let mut insights = Vec::new();
        let mut paired: Vec<(Product, ForecastResult)> = Vec::new();

        for product in &snapshot.products {
            let series = snapshot.demand_series(&product.id, context.demand_through)?;
            let forecast = match self.forecast.forecast(&series, self.horizon) {
                Ok(forecast) => forecast,
                Err(EngineError::InsufficientData(reason)) => {
                    tracing::debug!(product_id = %product.id, %reason, "Skipping forecast");
                    continue;
                }
                Err(e) => return Err(e),
            };

            insights.push(ProductInsights {
                product_id: product.id.clone(),
                insights: self.insight.generate_insights(&series, &forecast),
            });
            paired.push((product.clone(), forecast.clone()));
            forecasts.push(forecast);
        }

        let as_of = context.evaluated_at.date_naive();
        let replenishment = self.replenishment.recommend_all(&paired, as_of)?;
        let allocations = self.allocation.allocate_resources(&paired)?;
        let alerts = self.alert.evaluate_alerts(
            &snapshot.products,
            &forecasts,
            &context.suppliers,
            &context.weather,
            &snapshot.locations,
            context.evaluated_at,
        )?;

        let overview = ReportingService::dashboard_overview(
            &snapshot.products,
            &snapshot.locations,
            &forecasts,
            &alerts,
        );

        tracing::info!(
            products = snapshot.products.len(),
            forecasts = forecasts.len(),
            alerts = alerts.len(),
            reorders = replenishment.summary.total_items,
            "Dashboard evaluated"
        );

        Ok(DashboardReport {
            generated_at: context.evaluated_at,
            forecasts,
            insights,
            replenishment,
            allocations,
            alerts,
            supplier_scorecards: SupplierService::scorecards(&context.suppliers),
            weather_impacts: context.weather.iter().map(WeatherService::analyze_impact).collect(),
            overview,
        })
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
