//! Demand forecasting service
//!
//! Ensemble of three estimators over a monthly demand series:
//! an OLS trend line, the trend plus centered seasonal offsets, and a
//! trailing-window baseline. Intervals come from the in-sample residual
//! spread of the trend fit and widen with the square root of distance.

use shared::{
    month_name, DemandSeries, ForecastMetadata, ForecastPoint, ForecastResult, Period,
    TrendDirection,
};

use crate::config::ForecastConfig;
use crate::error::{EngineError, EngineResult};

const MODEL_NAME: &str = "ensemble(trend, seasonal, baseline)";

/// Stateless forecasting service
#[derive(Debug, Clone)]
pub struct ForecastService {
    config: ForecastConfig,
}

/// Ordinary least-squares fit of demand against period index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub intercept: f64,
    pub slope: f64,
}

impl TrendFit {
    pub fn at(&self, index: f64) -> f64 {
        self.intercept + self.slope * index
    }
}

impl ForecastService {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon` periods following the last observation of `series`.
    ///
    /// Fails with `InsufficientData` for an empty series and `InvalidHorizon`
    /// when `horizon` is zero.
    pub fn forecast(&self, series: &DemandSeries, horizon: u32) -> EngineResult<ForecastResult> {
        if horizon == 0 {
            return Err(EngineError::InvalidHorizon);
        }
        let last_period = series.last_period().ok_or_else(|| {
            EngineError::InsufficientData(format!(
                "no demand observations for {}",
                series.product_id
            ))
        })?;

        let values = series.values();
        let n = values.len();
        let cycle = self.config.cycle_length.max(1);

        let trend = fit_trend(&values);
        let residuals: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, y)| y - trend.at(i as f64))
            .collect();
        let residual_std = residual_std(&residuals);
        let offsets = seasonal_offsets(series, &residuals, cycle);
        let baseline = baseline_level(&values, self.config.baseline_window);
        let history_mean = series.mean();
        let z = z_score(self.config.confidence_level);

        let points: Vec<ForecastPoint> = (1..=horizon)
            .map(|k| {
                let period = last_period.offset(k);
                let growth = (k as f64).sqrt();

                let point = if n < 2 {
                    baseline.max(0.0)
                } else {
                    let index = (n - 1) as f64 + k as f64;
                    let trend_value = trend.at(index);
                    let seasonal_value = trend_value + offsets[period.position(cycle)];
                    let combined = self.config.trend_weight * trend_value
                        + self.config.seasonal_weight * seasonal_value
                        + self.config.baseline_weight * baseline;
                    combined.max(0.0)
                };
                // A line through two points leaves no residual degrees of freedom
                let half_width = if n <= 2 {
                    self.config.default_width_ratio * baseline.max(0.0) * growth
                } else {
                    z * residual_std * growth
                };

                ForecastPoint {
                    period,
                    point_estimate: point,
                    lower_bound: point - half_width,
                    upper_bound: point + half_width,
                }
            })
            .collect();

        let peak_period = points
            .iter()
            .fold(None::<&ForecastPoint>, |best, p| match best {
                Some(b) if b.point_estimate >= p.point_estimate => Some(b),
                _ => Some(p),
            })
            .map(|p| p.period)
            .unwrap_or_else(|| last_period.next());

        let (has_seasonality, peak_season_month) =
            self.detect_seasonality(&offsets, history_mean, n);

        let metadata = ForecastMetadata {
            model: MODEL_NAME.to_string(),
            accuracy: holdout_accuracy(
                &values,
                self.config.min_accuracy_observations,
                self.config.baseline_window,
                self.config.fallback_accuracy,
            ),
            confidence_level: self.config.confidence_level,
            trend: classify_trend(trend.slope, self.config.stable_slope_threshold),
            slope: trend.slope,
            growth_rate: growth_rate(&values),
            residual_std,
            history_mean,
            baseline_level: baseline,
            has_seasonality,
            peak_season_month,
            observations: n,
        };

        tracing::debug!(
            product_id = %series.product_id,
            observations = n,
            horizon,
            slope = trend.slope,
            residual_std,
            "Forecast computed"
        );

        Ok(ForecastResult {
            product_id: series.product_id.clone(),
            horizon,
            points,
            metadata,
            peak_period,
        })
    }

    /// Seasonality is reported when the offset range is large relative to mean demand
    fn detect_seasonality(
        &self,
        offsets: &[f64],
        history_mean: f64,
        observations: usize,
    ) -> (bool, Option<String>) {
        if observations < self.config.cycle_length as usize || history_mean <= 0.0 {
            return (false, None);
        }

        let max = offsets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = offsets.iter().copied().fold(f64::INFINITY, f64::min);
        let detected = (max - min) / history_mean > self.config.seasonality_threshold;

        let peak_position = offsets
            .iter()
            .enumerate()
            .fold((0usize, f64::NEG_INFINITY), |best, (i, &v)| {
                if v > best.1 {
                    (i, v)
                } else {
                    best
                }
            })
            .0;

        let peak = if self.config.cycle_length == Period::MONTHS_PER_YEAR {
            Some(month_name(peak_position as u32 + 1).to_string())
        } else {
            None
        };

        (detected, peak)
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

/// Least-squares line through `(i, values[i])`. Slope is 0 for fewer than two points.
pub fn fit_trend(values: &[f64]) -> TrendFit {
    let n = values.len();
    if n == 0 {
        return TrendFit {
            intercept: 0.0,
            slope: 0.0,
        };
    }
    let mean_y = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return TrendFit {
            intercept: mean_y,
            slope: 0.0,
        };
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

    TrendFit {
        intercept: mean_y - slope * mean_x,
        slope,
    }
}

/// Residual standard deviation with two fitted parameters (n - 2 degrees of freedom)
fn residual_std(residuals: &[f64]) -> f64 {
    let n = residuals.len();
    if n <= 2 {
        return 0.0;
    }
    let sse: f64 = residuals.iter().map(|r| r * r).sum();
    (sse / (n - 2) as f64).sqrt()
}

/// Mean residual per cyclic position, centered to zero mean.
///
/// All zero when the history covers less than one full cycle.
fn seasonal_offsets(series: &DemandSeries, residuals: &[f64], cycle: u32) -> Vec<f64> {
    let cycle_len = cycle as usize;
    let mut offsets = vec![0.0; cycle_len];
    if residuals.len() < cycle_len {
        return offsets;
    }

    let mut counts = vec![0usize; cycle_len];
    for (point, residual) in series.points().iter().zip(residuals) {
        let pos = point.period.position(cycle);
        offsets[pos] += residual;
        counts[pos] += 1;
    }
    for (offset, count) in offsets.iter_mut().zip(&counts) {
        if *count > 0 {
            *offset /= *count as f64;
        }
    }

    let mean = offsets.iter().sum::<f64>() / cycle_len as f64;
    for offset in offsets.iter_mut() {
        *offset -= mean;
    }
    offsets
}

/// Mean of the trailing `window` observations
fn baseline_level(values: &[f64], window: usize) -> f64 {
    let take = window.max(1).min(values.len());
    if take == 0 {
        return 0.0;
    }
    values[values.len() - take..].iter().sum::<f64>() / take as f64
}

pub fn classify_trend(slope: f64, threshold: f64) -> TrendDirection {
    if slope > threshold {
        TrendDirection::Increasing
    } else if slope < -threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Relative change from the first to the last observation
fn growth_rate(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if values.len() > 1 && first > 0.0 => (last - first) / first,
        _ => 0.0,
    }
}

/// `100 - MAPE` of a trailing moving average over an 80/20 holdout split.
///
/// Zero actuals are skipped. Returns `fallback` for short histories.
pub fn holdout_accuracy(values: &[f64], min_observations: usize, window: usize, fallback: f64) -> f64 {
    if values.len() < min_observations.max(2) {
        return fallback;
    }
    let train_size = ((values.len() as f64) * 0.8) as usize;
    let (train, test) = values.split_at(train_size.max(1));
    let prediction = baseline_level(train, window);

    let errors: Vec<f64> = test
        .iter()
        .filter(|actual| **actual > 0.0)
        .map(|actual| ((actual - prediction) / actual).abs())
        .collect();
    if errors.is_empty() {
        return fallback;
    }

    let mape = errors.iter().sum::<f64>() / errors.len() as f64 * 100.0;
    ((100.0 - mape).max(0.0) * 10.0).round() / 10.0
}

/// Two-sided z-score for a confidence level (0.95 gives about 1.96)
pub fn z_score(confidence_level: f64) -> f64 {
    inverse_normal_cdf(1.0 - (1.0 - confidence_level) / 2.0)
}

/// Standard normal quantile, Abramowitz and Stegun 26.2.23 (|error| < 4.5e-4)
fn inverse_normal_cdf(p: f64) -> f64 {
    if p >= 1.0 {
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    let q = if p < 0.5 { p } else { 1.0 - p };
    let t = (-2.0 * q.ln()).sqrt();

    let (c0, c1, c2) = (2.515517, 0.802853, 0.010328);
    let (d1, d2, d3) = (1.432788, 0.189269, 0.001308);

    let x = t - (c0 + c1 * t + c2 * t * t) / (1.0 + d1 * t + d2 * t * t + d3 * t * t * t);
    if p < 0.5 {
        -x
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> DemandSeries {
        let start = Period::from_year_month(2024, 1).unwrap();
        DemandSeries::from_values("PROD-001", start, values).unwrap()
    }

    #[test]
    fn test_fit_trend_exact_line() {
        let fit = fit_trend(&[10.0, 20.0, 30.0, 40.0]);
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_z_score_for_95_percent() {
        let z = z_score(0.95);
        assert!((z - 1.96).abs() < 0.01);
    }

    #[test]
    fn test_single_observation_uses_default_width() {
        let service = ForecastService::default();
        let result = service.forecast(&series(&[200.0]), 3).unwrap();

        assert_eq!(result.metadata.trend, TrendDirection::Stable);
        for (k, point) in result.points.iter().enumerate() {
            assert_eq!(point.point_estimate, 200.0);
            let expected = 0.15 * 200.0 * ((k + 1) as f64).sqrt();
            assert!((point.upper_bound - point.point_estimate - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_observations_use_default_width() {
        let service = ForecastService::default();
        let result = service.forecast(&series(&[100.0, 110.0]), 3).unwrap();

        assert_eq!(result.metadata.residual_std, 0.0);
        for (k, point) in result.points.iter().enumerate() {
            let expected = 0.15 * 105.0 * ((k + 1) as f64).sqrt();
            assert!(point.interval_width() > 0.0);
            assert!((point.upper_bound - point.point_estimate - expected).abs() < 1e-9);
            assert!((point.point_estimate - point.lower_bound - expected).abs() < 1e-9);
        }
        // Trend still drives the point estimate
        assert!(result.points[2].point_estimate > result.points[0].point_estimate);
    }

    #[test]
    fn test_seasonal_offsets_zero_below_one_cycle() {
        let s = series(&[10.0, 50.0, 10.0, 50.0]);
        let fit = fit_trend(&s.values());
        let residuals: Vec<f64> = s
            .values()
            .iter()
            .enumerate()
            .map(|(i, y)| y - fit.at(i as f64))
            .collect();
        assert!(seasonal_offsets(&s, &residuals, 12).iter().all(|o| *o == 0.0));
    }

    #[test]
    fn test_strong_seasonality_detected_with_peak_month() {
        // Two years with a July spike
        let mut values = Vec::new();
        for _ in 0..2 {
            for month in 1..=12 {
                values.push(if month == 7 { 300.0 } else { 100.0 });
            }
        }
        let result = ForecastService::default().forecast(&series(&values), 12).unwrap();
        assert!(result.metadata.has_seasonality);
        assert_eq!(result.metadata.peak_season_month.as_deref(), Some("July"));
        assert_eq!(result.peak_period.month(), 7);
    }

    #[test]
    fn test_accuracy_fallback_for_short_history() {
        assert_eq!(holdout_accuracy(&[1.0, 2.0, 3.0], 10, 6, 75.0), 75.0);
    }

    #[test]
    fn test_accuracy_perfect_for_flat_series() {
        let values = vec![120.0; 15];
        assert_eq!(holdout_accuracy(&values, 10, 6, 75.0), 100.0);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = ForecastService::default().forecast(&series(&[1.0, 2.0]), 0);
        assert!(matches!(err, Err(EngineError::InvalidHorizon)));
    }
}
