//! Shipping route weather models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Rainy,
    Stormy,
    Snow,
}

impl WeatherCondition {
    /// Conditions that disrupt deliveries regardless of the reported delay risk
    pub fn is_severe(&self) -> bool {
        matches!(self, WeatherCondition::Stormy | WeatherCondition::Snow)
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherCondition::Clear => write!(f, "Clear"),
            WeatherCondition::Rainy => write!(f, "Rainy"),
            WeatherCondition::Stormy => write!(f, "Stormy"),
            WeatherCondition::Snow => write!(f, "Snow"),
        }
    }
}

/// Daily forecast along a shipping route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
    pub temperature_celsius: f64,
    /// Probability-like delay risk in [0, 1]
    pub delay_risk: f64,
}

/// Weather outlook for the route from a supplier to the distribution network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteWeather {
    pub route: String,
    /// Supplier whose deliveries use this route
    pub supplier: String,
    pub days: Vec<WeatherDay>,
}

impl RouteWeather {
    pub fn max_delay_risk(&self) -> f64 {
        self.days.iter().map(|d| d.delay_risk).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeatherRiskLevel {
    Low,
    High,
}

/// Delivery impact assessment for a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherImpact {
    pub route: String,
    pub risk_level: WeatherRiskLevel,
    pub affected_days: usize,
    pub expected_delay_days: u32,
    pub conditions: Vec<WeatherCondition>,
    pub message: String,
    pub recommendations: Vec<String>,
}
