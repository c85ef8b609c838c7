//! Supplier scoring

use shared::{SupplierPerformance, SupplierRisk, SupplierScorecard};

const ON_TIME_WEIGHT: f64 = 0.35;
const QUALITY_WEIGHT: f64 = 0.30;
const COST_WEIGHT: f64 = 0.20;
const PERFORMANCE_WEIGHT: f64 = 0.15;

pub struct SupplierService;

impl SupplierService {
    /// Weighted overall score rounded to one decimal
    pub fn overall_score(supplier: &SupplierPerformance) -> f64 {
        let score = supplier.on_time_delivery * ON_TIME_WEIGHT
            + supplier.quality_rating * QUALITY_WEIGHT
            + supplier.cost_competitiveness * COST_WEIGHT
            + supplier.performance_score * PERFORMANCE_WEIGHT;
        (score * 10.0).round() / 10.0
    }

    pub fn assess_risk(supplier: &SupplierPerformance) -> SupplierRisk {
        if supplier.on_time_delivery < 85.0 || supplier.quality_rating < 80.0 {
            SupplierRisk::High
        } else if supplier.on_time_delivery < 90.0 || supplier.quality_rating < 85.0 {
            SupplierRisk::Medium
        } else {
            SupplierRisk::Low
        }
    }

    /// Scorecards for all suppliers, best score first
    pub fn scorecards(suppliers: &[SupplierPerformance]) -> Vec<SupplierScorecard> {
        let mut cards: Vec<SupplierScorecard> = suppliers
            .iter()
            .map(|s| SupplierScorecard {
                supplier_id: s.id.clone(),
                name: s.name.clone(),
                overall_score: Self::overall_score(s),
                risk_level: Self::assess_risk(s),
            })
            .collect();
        cards.sort_by(|a, b| {
            b.overall_score
                .total_cmp(&a.overall_score)
                .then_with(|| a.supplier_id.cmp(&b.supplier_id))
        });
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(on_time: f64, quality: f64) -> SupplierPerformance {
        SupplierPerformance {
            id: "SUP-001".to_string(),
            name: "Global Electronics Ltd".to_string(),
            category: "Electronics".to_string(),
            performance_score: 90.0,
            on_time_delivery: on_time,
            quality_rating: quality,
            cost_competitiveness: 80.0,
            lead_time_avg: 5.0,
            defect_rate: 1.2,
            total_orders: 200,
        }
    }

    #[test]
    fn test_overall_score_weights() {
        // 0.35*90 + 0.30*90 + 0.20*80 + 0.15*90 = 88.0
        assert_eq!(SupplierService::overall_score(&supplier(90.0, 90.0)), 88.0);
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(SupplierService::assess_risk(&supplier(84.0, 95.0)), SupplierRisk::High);
        assert_eq!(SupplierService::assess_risk(&supplier(95.0, 79.0)), SupplierRisk::High);
        assert_eq!(SupplierService::assess_risk(&supplier(88.0, 95.0)), SupplierRisk::Medium);
        assert_eq!(SupplierService::assess_risk(&supplier(95.0, 84.0)), SupplierRisk::Medium);
        assert_eq!(SupplierService::assess_risk(&supplier(95.0, 95.0)), SupplierRisk::Low);
    }
}
