//! Historical demand series

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Period;

/// Observed demand for one period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DemandPoint {
    pub period: Period,
    pub demand: f64,
}

/// Ordered, gap-free demand history for a product
///
/// Periods are strictly increasing by one. Missing periods are filled with
/// zero demand when the series is built from raw observations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandSeries {
    pub product_id: String,
    points: Vec<DemandPoint>,
}

impl DemandSeries {
    /// Build a series from points that are already ordered and gap-free
    pub fn new(product_id: impl Into<String>, points: Vec<DemandPoint>) -> Result<Self, &'static str> {
        for point in &points {
            if !point.demand.is_finite() || point.demand < 0.0 {
                return Err("Demand observations must be finite and non-negative");
            }
        }
        for pair in points.windows(2) {
            if pair[1].period.0 != pair[0].period.0 + 1 {
                return Err("Demand periods must be strictly increasing without gaps");
            }
        }
        Ok(Self {
            product_id: product_id.into(),
            points,
        })
    }

    /// Build a series from unordered observations.
    ///
    /// Observations for the same period are summed; periods between the first
    /// and last observation that have no data are filled with zero.
    pub fn from_observations<I>(product_id: impl Into<String>, observations: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = (Period, f64)>,
    {
        let mut by_period: BTreeMap<Period, f64> = BTreeMap::new();
        for (period, demand) in observations {
            if !demand.is_finite() || demand < 0.0 {
                return Err("Demand observations must be finite and non-negative");
            }
            *by_period.entry(period).or_insert(0.0) += demand;
        }

        let (first, last) = match (by_period.keys().next(), by_period.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Self::new(product_id, Vec::new()),
        };

        let points = (first.0..=last.0)
            .map(|p| {
                let period = Period(p);
                DemandPoint {
                    period,
                    demand: by_period.get(&period).copied().unwrap_or(0.0),
                }
            })
            .collect();

        Self::new(product_id, points)
    }

    /// Convenience constructor for consecutive values starting at `start`
    pub fn from_values(
        product_id: impl Into<String>,
        start: Period,
        values: &[f64],
    ) -> Result<Self, &'static str> {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &demand)| DemandPoint {
                period: start.offset(i as u32),
                demand,
            })
            .collect();
        Self::new(product_id, points)
    }

    pub fn points(&self) -> &[DemandPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.demand).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_period(&self) -> Option<Period> {
        self.points.first().map(|p| p.period)
    }

    pub fn last_period(&self) -> Option<Period> {
        self.points.last().map(|p| p.period)
    }

    /// Mean demand over the whole series (0 for an empty series)
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.demand).sum::<f64>() / self.points.len() as f64
    }
}
