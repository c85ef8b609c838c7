//! Shipping route weather impact analysis

use shared::{RouteWeather, WeatherDay, WeatherImpact, WeatherRiskLevel};

/// Delay risk above which a day counts as high risk
const HIGH_RISK_DELAY: f64 = 0.3;

pub struct WeatherService;

impl WeatherService {
    /// A day is high risk on stormy or snowy conditions or a delay risk above 0.3
    pub fn is_high_risk_day(day: &WeatherDay) -> bool {
        day.condition.is_severe() || day.delay_risk > HIGH_RISK_DELAY
    }

    /// Assess the delivery impact of a route's forecast
    pub fn analyze_impact(route: &RouteWeather) -> WeatherImpact {
        let high_risk: Vec<&WeatherDay> = route
            .days
            .iter()
            .filter(|d| Self::is_high_risk_day(d))
            .collect();

        let impact = match high_risk.last() {
            Some(worst) => WeatherImpact {
                route: route.route.clone(),
                risk_level: WeatherRiskLevel::High,
                affected_days: high_risk.len(),
                expected_delay_days: high_risk.len() as u32,
                conditions: high_risk.iter().map(|d| d.condition).collect(),
                message: format!(
                    "{} expected on route. Risk of {}-day delay.",
                    worst.condition,
                    high_risk.len()
                ),
                recommendations: Vec::new(),
            },
            None => WeatherImpact {
                route: route.route.clone(),
                risk_level: WeatherRiskLevel::Low,
                affected_days: 0,
                expected_delay_days: 0,
                conditions: Vec::new(),
                message: "No significant weather disruptions expected.".to_string(),
                recommendations: Vec::new(),
            },
        };

        WeatherImpact {
            recommendations: Self::recommendations(&impact),
            ..impact
        }
    }

    pub fn recommendations(impact: &WeatherImpact) -> Vec<String> {
        match impact.risk_level {
            WeatherRiskLevel::High => vec![
                format!(
                    "Expedite shipment to avoid {} days delay",
                    impact.expected_delay_days
                ),
                "Consider alternative shipping routes".to_string(),
                "Increase safety stock by 20%".to_string(),
                "Notify customers of potential delays".to_string(),
            ],
            WeatherRiskLevel::Low => vec!["Normal shipping schedule recommended".to_string()],
        }
    }
}
