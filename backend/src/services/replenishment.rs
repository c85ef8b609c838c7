//! Replenishment optimization (EOQ)
//!
//! Turns a product's forecast into an order quantity, a reorder date and the
//! projected cost and savings of ordering that quantity.

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use shared::{
    CostParameters, ForecastResult, Product, ReplenishmentPlan, ReplenishmentRecommendation,
    ReplenishmentSummary, TrendDirection,
};

use crate::config::ReplenishmentConfig;
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct ReplenishmentService {
    config: ReplenishmentConfig,
}

impl ReplenishmentService {
    pub fn new(config: ReplenishmentConfig) -> Self {
        Self { config }
    }

    /// Cost parameters for a product: configured order cost and
    /// holding cost as a fraction of unit cost.
    pub fn cost_parameters(&self, product: &Product, as_of: NaiveDate) -> CostParameters {
        let unit_cost = product.unit_cost.to_f64().unwrap_or(0.0);
        CostParameters {
            order_cost: self.config.order_cost,
            holding_cost: unit_cost * self.config.holding_rate,
            periods_per_year: self.config.periods_per_year,
            days_per_period: self.config.days_per_period,
            as_of,
        }
    }

    /// Compute the reorder recommendation for one product.
    ///
    /// Fails with `InvalidCostParameter` when a cost or period length is not
    /// positive, and `UnknownProduct` when the forecast belongs to another product.
    pub fn optimize_replenishment(
        &self,
        product: &Product,
        forecast: &ForecastResult,
        params: &CostParameters,
    ) -> EngineResult<ReplenishmentRecommendation> {
        check_positive("order_cost", params.order_cost)?;
        check_positive("holding_cost", params.holding_cost)?;
        check_positive("periods_per_year", params.periods_per_year)?;
        check_positive("days_per_period", params.days_per_period)?;
        if forecast.product_id != product.id {
            return Err(EngineError::UnknownProduct(forecast.product_id.clone()));
        }

        let period_demand = forecast.mean_point_estimate().max(0.0);
        let annual_demand = period_demand * params.periods_per_year;
        let base_eoq = if annual_demand > 0.0 {
            economic_order_quantity(annual_demand, params.order_cost, params.holding_cost)?
        } else {
            0.0
        };

        let adjustment_factor = self.adjustment_factor(forecast, params.periods_per_year);
        let recommended_quantity = (base_eoq * adjustment_factor).ceil().max(0.0) as i64;

        let daily_demand = period_demand / params.days_per_period;
        let lead_time_demand = daily_demand * product.lead_time_days as f64;
        let should_reorder = product.current_stock <= product.reorder_point;

        let reorder_date = if should_reorder {
            Some(params.as_of)
        } else if daily_demand > 0.0 {
            // Unrepresentable dates leave the reorder date open
            let days = ((product.current_stock - product.reorder_point) as f64 / daily_demand).ceil();
            Duration::try_days(days as i64).and_then(|delta| params.as_of.checked_add_signed(delta))
        } else {
            None
        };
        let days_of_supply =
            (daily_demand > 0.0).then(|| product.current_stock.max(0) as f64 / daily_demand);

        let order_cost = (Decimal::from(recommended_quantity) * product.unit_cost).round_dp(2);

        let savings = if recommended_quantity > 0 {
            let naive_quantity = product.reorder_point.max(1) as f64;
            let naive = total_annual_cost(annual_demand, naive_quantity, params);
            let optimized = total_annual_cost(annual_demand, recommended_quantity as f64, params);
            (naive - optimized).max(0.0)
        } else {
            0.0
        };
        let annual_savings = Decimal::from_f64(savings)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2);

        tracing::debug!(
            product_id = %product.id,
            annual_demand,
            base_eoq,
            adjustment_factor,
            should_reorder,
            "Replenishment computed"
        );

        Ok(ReplenishmentRecommendation {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            current_stock: product.current_stock,
            reorder_point: product.reorder_point,
            lead_time_demand,
            annual_demand,
            base_eoq,
            adjustment_factor,
            recommended_quantity,
            should_reorder,
            reorder_date,
            days_of_supply,
            order_cost,
            annual_savings,
        })
    }

    /// Recommendations for every product that needs reordering now,
    /// lowest days of supply first.
    pub fn recommend_all(
        &self,
        items: &[(Product, ForecastResult)],
        as_of: NaiveDate,
    ) -> EngineResult<ReplenishmentPlan> {
        let mut recommendations = Vec::new();
        for (product, forecast) in items {
            let params = self.cost_parameters(product, as_of);
            let rec = self.optimize_replenishment(product, forecast, &params)?;
            if rec.should_reorder {
                recommendations.push(rec);
            }
        }

        recommendations.sort_by(|a, b| {
            let a_dos = a.days_of_supply.unwrap_or(f64::INFINITY);
            let b_dos = b.days_of_supply.unwrap_or(f64::INFINITY);
            a_dos
                .total_cmp(&b_dos)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        let summary = ReplenishmentSummary {
            total_items: recommendations.len(),
            total_investment: recommendations.iter().map(|r| r.order_cost).sum(),
            estimated_savings: recommendations.iter().map(|r| r.annual_savings).sum(),
        };

        Ok(ReplenishmentPlan {
            recommendations,
            summary,
        })
    }

    /// Scale factor for trending demand, within `1 +/- max_adjustment`
    fn adjustment_factor(&self, forecast: &ForecastResult, periods_per_year: f64) -> f64 {
        let max = self.config.max_adjustment;
        if forecast.metadata.trend == TrendDirection::Stable {
            return 1.0;
        }
        let level = forecast.metadata.history_mean;
        let relative = if level > 0.0 {
            (forecast.metadata.slope * periods_per_year / level).clamp(-1.0, 1.0)
        } else {
            forecast.metadata.slope.signum()
        };
        (1.0 + max * relative).clamp(1.0 - max, 1.0 + max)
    }
}

impl Default for ReplenishmentService {
    fn default() -> Self {
        Self::new(ReplenishmentConfig::default())
    }
}

/// `sqrt(2 D S / H)`
pub fn economic_order_quantity(annual_demand: f64, order_cost: f64, holding_cost: f64) -> EngineResult<f64> {
    check_positive("order_cost", order_cost)?;
    check_positive("holding_cost", holding_cost)?;
    if !annual_demand.is_finite() || annual_demand < 0.0 {
        return Err(EngineError::InvalidCostParameter {
            parameter: "annual_demand".to_string(),
            value: annual_demand,
        });
    }
    Ok((2.0 * annual_demand * order_cost / holding_cost).sqrt())
}

/// Annual ordering plus holding cost for order size `quantity`
fn total_annual_cost(annual_demand: f64, quantity: f64, params: &CostParameters) -> f64 {
    annual_demand / quantity * params.order_cost + quantity / 2.0 * params.holding_cost
}

fn check_positive(parameter: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidCostParameter {
            parameter: parameter.to_string(),
            value,
        })
    }
}
