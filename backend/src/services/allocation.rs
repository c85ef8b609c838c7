//! Resource allocation: ranks products for operational attention

use std::cmp::Ordering;

use shared::{AllocationEntry, ForecastResult, PriorityBucket, Product, StockStatus, TrendDirection};

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct AllocationService {
    config: AllocationConfig,
    days_per_period: f64,
}

impl AllocationService {
    pub fn new(config: AllocationConfig, days_per_period: f64) -> Self {
        Self {
            config,
            days_per_period,
        }
    }

    /// Rank products by composite priority, most urgent first.
    ///
    /// Each forecast must belong to the product it is paired with.
    pub fn allocate_resources(&self, items: &[(Product, ForecastResult)]) -> EngineResult<Vec<AllocationEntry>> {
        let mut entries = Vec::with_capacity(items.len());

        for (product, forecast) in items {
            if forecast.product_id != product.id {
                return Err(EngineError::UnknownProduct(forecast.product_id.clone()));
            }

            let stock_status = product.stock_status();
            let days_of_supply = days_of_supply(product.current_stock, forecast, self.days_per_period);
            let forecast_risk = forecast_risk(forecast);

            let dos_pressure = match days_of_supply {
                Some(days) => 1.0 - (days / self.config.cover_days).min(1.0),
                None => 0.0,
            };
            let score = (status_points(stock_status) + 30.0 * dos_pressure + 20.0 * forecast_risk)
                .clamp(0.0, 100.0);
            let priority = bucket_for(score);

            entries.push(AllocationEntry {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                category: product.category.clone(),
                stock_status,
                trend: forecast.metadata.trend,
                days_of_supply,
                forecast_risk,
                score,
                priority,
                recommendation: recommendation_for(priority, stock_status),
            });
        }

        entries.sort_by(compare_entries);

        tracing::debug!(count = entries.len(), "Allocation ranked");
        Ok(entries)
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new(AllocationConfig::default(), 30.0)
    }
}

/// Current stock divided by forecast daily consumption.
///
/// `None` when the forecast projects no consumption.
pub fn days_of_supply(current_stock: i64, forecast: &ForecastResult, days_per_period: f64) -> Option<f64> {
    let daily = forecast.mean_point_estimate() / days_per_period;
    if daily > 0.0 && daily.is_finite() {
        Some(current_stock.max(0) as f64 / daily)
    } else {
        None
    }
}

/// Risk in [0, 1] from trend direction and relative interval width
pub fn forecast_risk(forecast: &ForecastResult) -> f64 {
    let trend_risk = match forecast.metadata.trend {
        TrendDirection::Increasing => 1.0,
        TrendDirection::Stable => 0.5,
        TrendDirection::Decreasing => 0.0,
    };
    let uncertainty = forecast.relative_uncertainty().clamp(0.0, 1.0);
    0.5 * trend_risk + 0.5 * uncertainty
}

fn status_points(status: StockStatus) -> f64 {
    match status {
        StockStatus::Critical => 50.0,
        StockStatus::Low => 35.0,
        StockStatus::Normal => 10.0,
        StockStatus::Overstock => 0.0,
    }
}

pub fn bucket_for(score: f64) -> PriorityBucket {
    if score >= 70.0 {
        PriorityBucket::Critical
    } else if score >= 50.0 {
        PriorityBucket::High
    } else if score >= 30.0 {
        PriorityBucket::Medium
    } else {
        PriorityBucket::Low
    }
}

fn recommendation_for(priority: PriorityBucket, status: StockStatus) -> String {
    match (priority, status) {
        (_, StockStatus::Overstock) => {
            "Redistribute excess stock and review reorder quantities".to_string()
        }
        (PriorityBucket::Critical, _) => "Expedite replenishment and reserve receiving capacity".to_string(),
        (PriorityBucket::High, _) => "Schedule replenishment this cycle".to_string(),
        (PriorityBucket::Medium, _) => "Monitor stock against forecast".to_string(),
        (PriorityBucket::Low, _) => "No action needed".to_string(),
    }
}

/// Bucket descending, then days of supply ascending, then score descending, then id
fn compare_entries(a: &AllocationEntry, b: &AllocationEntry) -> Ordering {
    let a_dos = a.days_of_supply.unwrap_or(f64::INFINITY);
    let b_dos = b.days_of_supply.unwrap_or(f64::INFINITY);
    b.priority
        .cmp(&a.priority)
        .then_with(|| a_dos.total_cmp(&b_dos))
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.product_id.cmp(&b.product_id))
}
