//! Sample data for demos and tests
//!
//! Generates a deterministic catalog, locations, monthly movement history,
//! supplier metrics and route weather from a seeded RNG.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use shared::{
    Location, LocationKind, MovementInput, MovementKind, NewProduct, Period, RouteWeather,
    SupplierPerformance, WeatherCondition, WeatherDay,
};

use super::InventoryService;
use crate::config::SampleConfig;
use crate::error::{EngineError, EngineResult};

/// Monthly demand multipliers, January first
const SEASONALITY: [f64; 12] = [
    0.85, 0.90, 1.05, 1.10, 1.15, 1.20, 1.25, 1.15, 1.05, 0.95, 0.90, 0.85,
];

const LOCATIONS: &[(&str, &str, LocationKind, i64)] = &[
    ("WH-001", "Warehouse North", LocationKind::Warehouse, 2_000),
    ("WH-002", "Warehouse South", LocationKind::Warehouse, 1_200),
    ("DC-001", "Distribution Center East", LocationKind::DistributionCenter, 2_300),
    ("DC-002", "Distribution Center West", LocationKind::DistributionCenter, 4_500),
];

struct CatalogEntry {
    name: &'static str,
    sku: &'static str,
    category: &'static str,
    /// Unit cost in cents
    unit_cost_cents: i64,
    stock: i64,
    reorder_point: i64,
    safety_stock: i64,
    max_stock: i64,
    lead_time_days: u32,
    supplier: &'static str,
    location: &'static str,
    base_demand: f64,
    /// Range of the monthly demand trend
    trend: (f64, f64),
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Electronics Components",
        sku: "ELEC-001-2025",
        category: "Electronics",
        unit_cost_cents: 2550,
        stock: 1250,
        reorder_point: 500,
        safety_stock: 200,
        max_stock: 2000,
        lead_time_days: 5,
        supplier: "Global Electronics Ltd",
        location: "WH-001",
        base_demand: 900.0,
        trend: (8.0, 12.0),
    },
    CatalogEntry {
        name: "Automotive Parts",
        sku: "AUTO-002-2025",
        category: "Automotive",
        unit_cost_cents: 4575,
        stock: 850,
        reorder_point: 300,
        safety_stock: 150,
        max_stock: 1500,
        lead_time_days: 7,
        supplier: "AutoParts International",
        location: "WH-002",
        base_demand: 400.0,
        trend: (-2.0, 2.0),
    },
    CatalogEntry {
        name: "Medical Supplies",
        sku: "MED-003-2025",
        category: "Healthcare",
        unit_cost_cents: 1225,
        stock: 2100,
        reorder_point: 800,
        safety_stock: 400,
        max_stock: 3000,
        lead_time_days: 3,
        supplier: "MedSupply Corp",
        location: "DC-001",
        base_demand: 1100.0,
        trend: (-2.0, 5.0),
    },
    CatalogEntry {
        name: "Industrial Tools",
        sku: "IND-004-2025",
        category: "Industrial",
        unit_cost_cents: 7850,
        stock: 450,
        reorder_point: 200,
        safety_stock: 100,
        max_stock: 800,
        lead_time_days: 10,
        supplier: "Tools & Equipment Inc",
        location: "WH-001",
        base_demand: 1300.0,
        trend: (-2.0, 2.0),
    },
    CatalogEntry {
        name: "Consumer Goods",
        sku: "CONS-005-2025",
        category: "Consumer",
        unit_cost_cents: 899,
        stock: 3200,
        reorder_point: 1000,
        safety_stock: 500,
        max_stock: 5000,
        lead_time_days: 4,
        supplier: "Consumer Products Ltd",
        location: "DC-002",
        base_demand: 1500.0,
        trend: (8.0, 12.0),
    },
];

struct SupplierProfile {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    performance: (u32, u32),
    on_time: (u32, u32),
    quality: (u32, u32),
    cost: (u32, u32),
    lead_time: (f64, f64),
    orders: (u32, u32),
    defect_rate: (f64, f64),
}

const SUPPLIERS: &[SupplierProfile] = &[
    SupplierProfile {
        id: "SUP-001",
        name: "Global Electronics Ltd",
        category: "Electronics",
        performance: (85, 98),
        on_time: (88, 98),
        quality: (85, 95),
        cost: (80, 95),
        lead_time: (3.0, 7.0),
        orders: (150, 300),
        defect_rate: (0.5, 2.5),
    },
    SupplierProfile {
        id: "SUP-002",
        name: "AutoParts International",
        category: "Automotive",
        performance: (82, 94),
        on_time: (85, 95),
        quality: (82, 92),
        cost: (78, 90),
        lead_time: (5.0, 9.0),
        orders: (120, 250),
        defect_rate: (1.0, 3.5),
    },
    SupplierProfile {
        id: "SUP-003",
        name: "MedSupply Corp",
        category: "Healthcare",
        performance: (90, 98),
        on_time: (92, 99),
        quality: (90, 98),
        cost: (75, 85),
        lead_time: (2.0, 5.0),
        orders: (200, 400),
        defect_rate: (0.2, 1.5),
    },
    SupplierProfile {
        id: "SUP-004",
        name: "Tools & Equipment Inc",
        category: "Industrial",
        performance: (80, 92),
        on_time: (83, 93),
        quality: (85, 93),
        cost: (82, 92),
        lead_time: (7.0, 12.0),
        orders: (80, 180),
        defect_rate: (1.5, 4.0),
    },
    SupplierProfile {
        id: "SUP-005",
        name: "Consumer Products Ltd",
        category: "Consumer",
        performance: (85, 95),
        on_time: (87, 96),
        quality: (83, 92),
        cost: (85, 95),
        lead_time: (3.0, 6.0),
        orders: (180, 350),
        defect_rate: (0.8, 2.8),
    },
];

/// Seeded sample data generator
pub struct SampleDataGenerator {
    rng: StdRng,
    history_months: u32,
}

impl SampleDataGenerator {
    pub fn new(config: &SampleConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            history_months: config.history_months,
        }
    }

    pub fn locations() -> Vec<Location> {
        LOCATIONS
            .iter()
            .map(|(id, name, kind, capacity)| Location {
                id: id.to_string(),
                name: name.to_string(),
                kind: *kind,
                capacity: *capacity,
            })
            .collect()
    }

    /// Populate a store with locations, products and monthly movements
    /// ending the month before `now`.
    ///
    /// Each month receives exactly what it ships, so closing stock equals the
    /// catalog's stock figure.
    pub fn populate(&mut self, store: &InventoryService, now: DateTime<Utc>) -> EngineResult<()> {
        for location in Self::locations() {
            store.add_location(location)?;
        }

        let current = Period::from_date(&now);
        let start = Period(current.0.saturating_sub(self.history_months));
        let opened_at = month_timestamp(start, 1)?;

        for entry in CATALOG {
            let product = store.register_product(
                NewProduct {
                    name: entry.name.to_string(),
                    sku: entry.sku.to_string(),
                    category: entry.category.to_string(),
                    unit_cost: Decimal::new(entry.unit_cost_cents, 2),
                    opening_stock: entry.stock,
                    opening_location: Some(entry.location.to_string()),
                    reorder_point: entry.reorder_point,
                    safety_stock: entry.safety_stock,
                    max_stock: entry.max_stock,
                    lead_time_days: entry.lead_time_days,
                    supplier: entry.supplier.to_string(),
                },
                opened_at,
            )?;

            let trend = self.rng.gen_range(entry.trend.0..entry.trend.1);
            for i in 0..self.history_months {
                let period = start.offset(i);
                let demand = self.monthly_demand(entry.base_demand, trend, i, period);
                let first_half = demand / 2;

                self.record(store, &product.id, MovementKind::Received, demand, entry.location, period, 1)?;
                self.record(store, &product.id, MovementKind::Shipped, -first_half, entry.location, period, 10)?;
                self.record(
                    store,
                    &product.id,
                    MovementKind::Shipped,
                    -(demand - first_half),
                    entry.location,
                    period,
                    20,
                )?;
            }
        }

        tracing::info!(
            products = CATALOG.len(),
            months = self.history_months,
            "Sample inventory populated"
        );
        Ok(())
    }

    fn monthly_demand(&mut self, base: f64, trend: f64, index: u32, period: Period) -> i64 {
        let seasonal = SEASONALITY[period.position(Period::MONTHS_PER_YEAR)];
        let noise = self.rng.gen_range(-50.0..50.0_f64);
        let demand = (base + trend * index as f64) * seasonal + noise;
        demand.max(100.0).round() as i64
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        store: &InventoryService,
        product_id: &str,
        kind: MovementKind,
        quantity: i64,
        location: &str,
        period: Period,
        day: u32,
    ) -> EngineResult<()> {
        let (from_location, to_location, reason) = match kind {
            MovementKind::Received => (None, Some(location.to_string()), "Supplier delivery"),
            _ => (Some(location.to_string()), None, "Customer orders"),
        };
        store.record_movement(MovementInput {
            product_id: product_id.to_string(),
            kind,
            quantity,
            from_location,
            to_location,
            reason: reason.to_string(),
            timestamp: month_timestamp(period, day)?,
        })?;
        Ok(())
    }

    /// Supplier performance metrics drawn from per-supplier ranges
    pub fn suppliers(&mut self) -> Vec<SupplierPerformance> {
        SUPPLIERS
            .iter()
            .map(|profile| SupplierPerformance {
                id: profile.id.to_string(),
                name: profile.name.to_string(),
                category: profile.category.to_string(),
                performance_score: self.rng.gen_range(profile.performance.0..=profile.performance.1) as f64,
                on_time_delivery: self.rng.gen_range(profile.on_time.0..=profile.on_time.1) as f64,
                quality_rating: self.rng.gen_range(profile.quality.0..=profile.quality.1) as f64,
                cost_competitiveness: self.rng.gen_range(profile.cost.0..=profile.cost.1) as f64,
                lead_time_avg: round1(self.rng.gen_range(profile.lead_time.0..profile.lead_time.1)),
                defect_rate: round2(self.rng.gen_range(profile.defect_rate.0..profile.defect_rate.1)),
                total_orders: self.rng.gen_range(profile.orders.0..=profile.orders.1),
            })
            .collect()
    }

    /// Seven-day route forecasts, one route per supplier
    pub fn route_weather(&mut self, suppliers: &[SupplierPerformance], from: NaiveDate) -> Vec<RouteWeather> {
        const CONDITIONS: [WeatherCondition; 4] = [
            WeatherCondition::Clear,
            WeatherCondition::Rainy,
            WeatherCondition::Stormy,
            WeatherCondition::Snow,
        ];

        suppliers
            .iter()
            .map(|supplier| RouteWeather {
                route: format!("{} → Distribution Center", supplier.name),
                supplier: supplier.name.clone(),
                days: (0..7)
                    .map(|i| WeatherDay {
                        date: from + Duration::days(i),
                        condition: CONDITIONS[self.rng.gen_range(0..CONDITIONS.len())],
                        temperature_celsius: self.rng.gen_range(10..=30) as f64,
                        delay_risk: round2(self.rng.gen_range(0.0..0.5_f64)),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 08:00 UTC on the given day of a period
fn month_timestamp(period: Period, day: u32) -> EngineResult<DateTime<Utc>> {
    period
        .first_day()
        .and_then(|d| d.with_day(day))
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| EngineError::Internal(format!("invalid sample date in {}", period)))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
