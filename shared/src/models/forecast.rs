//! Demand forecast models

use serde::{Deserialize, Serialize};

use crate::types::Period;

/// Direction of the fitted demand trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// A single forecast period with its confidence interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub period: Period,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ForecastPoint {
    pub fn interval_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// How the forecast was produced and how far it can be trusted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastMetadata {
    pub model: String,
    /// Holdout accuracy in percent (100 - MAPE)
    pub accuracy: f64,
    pub confidence_level: f64,
    pub trend: TrendDirection,
    /// Fitted demand change per period
    pub slope: f64,
    /// Relative change between the first and last observation
    pub growth_rate: f64,
    pub residual_std: f64,
    pub history_mean: f64,
    pub baseline_level: f64,
    pub has_seasonality: bool,
    pub peak_season_month: Option<String>,
    pub observations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub product_id: String,
    pub horizon: u32,
    pub points: Vec<ForecastPoint>,
    pub metadata: ForecastMetadata,
    /// Forecast period with the highest point estimate
    pub peak_period: Period,
}

impl ForecastResult {
    /// Mean point estimate across the horizon
    pub fn mean_point_estimate(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.point_estimate).sum::<f64>() / self.points.len() as f64
    }

    /// Mean half-width of the interval relative to the mean point estimate
    pub fn relative_uncertainty(&self) -> f64 {
        let mean = self.mean_point_estimate();
        if self.points.is_empty() || mean <= 0.0 {
            return 0.0;
        }
        let mean_half_width = self
            .points
            .iter()
            .map(|p| p.interval_width() / 2.0)
            .sum::<f64>()
            / self.points.len() as f64;
        mean_half_width / mean
    }
}
