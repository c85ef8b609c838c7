//! Configuration management for the Demand Forecasting engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with DFD prefix (`DFD__FORECAST__HORIZON=6`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Main engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub insights: InsightConfig,

    #[serde(default)]
    pub replenishment: ReplenishmentConfig,

    #[serde(default)]
    pub allocation: AllocationConfig,

    #[serde(default)]
    pub alerts: AlertConfig,

    #[serde(default)]
    pub sample: SampleConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ForecastConfig {
    /// Default number of periods to forecast
    pub horizon: u32,

    /// Confidence level of the forecast interval
    pub confidence_level: f64,

    /// Periods per seasonal cycle
    pub cycle_length: u32,

    /// Trailing observations averaged by the baseline model
    pub baseline_window: usize,

    pub trend_weight: f64,
    pub seasonal_weight: f64,
    pub baseline_weight: f64,

    /// Slopes within +/- this many units per period count as stable
    pub stable_slope_threshold: f64,

    /// Half-width relative to the baseline level when there are two or fewer
    /// observations, leaving no residual spread to measure
    pub default_width_ratio: f64,

    /// Seasonal offset range relative to mean demand above which seasonality is reported
    pub seasonality_threshold: f64,

    /// Observations required before holdout accuracy is measured
    pub min_accuracy_observations: usize,

    /// Accuracy reported when history is too short to measure
    pub fallback_accuracy: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InsightConfig {
    /// Forecast above history mean times this ratio is a surge, and raises
    /// the demand spike alert
    pub surge_ratio: f64,

    /// Forecast below history mean times this ratio is a drop
    pub drop_ratio: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReplenishmentConfig {
    /// Fixed cost per order
    pub order_cost: f64,

    /// Annual holding cost as a fraction of unit cost
    pub holding_rate: f64,

    pub periods_per_year: f64,
    pub days_per_period: f64,

    /// Maximum relative EOQ adjustment for trending demand
    pub max_adjustment: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AllocationConfig {
    /// Days of supply at which stock stops adding urgency
    pub cover_days: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlertConfig {
    /// Stock above reorder point times this multiplier is overstock
    pub overstock_multiplier: f64,

    /// On-time delivery percentage below which a supplier is flagged
    pub supplier_on_time_threshold: f64,

    /// Route delay risk above which a weather warning is raised
    pub weather_warning_risk: f64,

    /// Route delay risk at or above which the weather alert is critical
    pub weather_critical_risk: f64,

    /// Location utilization percentage above which capacity is flagged
    pub capacity_threshold_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SampleConfig {
    /// Seed for the sample data generator
    pub seed: u64,

    /// Months of movement history to generate
    pub history_months: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("DFD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("forecast.horizon", 6)?
            .set_default("sample.seed", 42)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DFD prefix)
            .add_source(
                Environment::with_prefix("DFD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject inconsistent values
    pub fn validate(&self) -> EngineResult<()> {
        let f = &self.forecast;
        shared::validate_ensemble_weights(&[f.trend_weight, f.seasonal_weight, f.baseline_weight])
            .map_err(|e| EngineError::Configuration(e.to_string()))?;
        shared::validate_confidence_level(f.confidence_level)
            .map_err(|e| EngineError::Configuration(e.to_string()))?;
        if f.horizon == 0 {
            return Err(EngineError::Configuration(
                "forecast.horizon must be at least 1".to_string(),
            ));
        }
        if f.cycle_length < 2 || f.baseline_window == 0 {
            return Err(EngineError::Configuration(
                "forecast.cycle_length must be at least 2 and baseline_window at least 1".to_string(),
            ));
        }

        let i = &self.insights;
        if !(i.drop_ratio > 0.0 && i.drop_ratio < 1.0 && i.surge_ratio > 1.0) {
            return Err(EngineError::Configuration(
                "insights.drop_ratio must be in (0, 1) and surge_ratio above 1".to_string(),
            ));
        }

        let r = &self.replenishment;
        if r.order_cost <= 0.0 || r.holding_rate <= 0.0 {
            return Err(EngineError::Configuration(
                "replenishment.order_cost and holding_rate must be positive".to_string(),
            ));
        }
        if r.periods_per_year <= 0.0 || r.days_per_period <= 0.0 {
            return Err(EngineError::Configuration(
                "replenishment period lengths must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&r.max_adjustment) {
            return Err(EngineError::Configuration(
                "replenishment.max_adjustment must be in [0, 1)".to_string(),
            ));
        }

        if self.allocation.cover_days <= 0.0 {
            return Err(EngineError::Configuration(
                "allocation.cover_days must be positive".to_string(),
            ));
        }

        let a = &self.alerts;
        if a.weather_critical_risk < a.weather_warning_risk {
            return Err(EngineError::Configuration(
                "alerts.weather_critical_risk must not be below weather_warning_risk".to_string(),
            ));
        }
        if a.overstock_multiplier <= 1.0 {
            return Err(EngineError::Configuration(
                "alerts.overstock_multiplier must be above 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            forecast: ForecastConfig::default(),
            insights: InsightConfig::default(),
            replenishment: ReplenishmentConfig::default(),
            allocation: AllocationConfig::default(),
            alerts: AlertConfig::default(),
            sample: SampleConfig::default(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 6,
            confidence_level: 0.95,
            cycle_length: 12,
            baseline_window: 6,
            trend_weight: 0.4,
            seasonal_weight: 0.3,
            baseline_weight: 0.3,
            stable_slope_threshold: 5.0,
            default_width_ratio: 0.15,
            seasonality_threshold: 0.2,
            min_accuracy_observations: 10,
            fallback_accuracy: 75.0,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            surge_ratio: 1.2,
            drop_ratio: 0.8,
        }
    }
}

impl Default for ReplenishmentConfig {
    fn default() -> Self {
        Self {
            order_cost: 100.0,
            holding_rate: 0.2,
            periods_per_year: 12.0,
            days_per_period: 30.0,
            max_adjustment: 0.2,
        }
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self { cover_days: 30.0 }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            overstock_multiplier: 2.0,
            supplier_on_time_threshold: 85.0,
            weather_warning_risk: 0.3,
            weather_critical_risk: 0.6,
            capacity_threshold_percent: 90.0,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_months: 24,
        }
    }
}
