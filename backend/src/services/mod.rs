//! Engine services for demand forecasting and inventory optimization

pub mod alert;
pub mod allocation;
pub mod dashboard;
pub mod forecast;
pub mod insight;
pub mod inventory;
pub mod notification;
pub mod replenishment;
pub mod reporting;
pub mod sample_data;
pub mod supplier;
pub mod weather;

pub use alert::AlertService;
pub use allocation::AllocationService;
pub use dashboard::{DashboardContext, DashboardReport, DashboardService, ProductInsights};
pub use forecast::ForecastService;
pub use insight::InsightService;
pub use inventory::{InventoryService, InventorySnapshot};
pub use notification::EventQueue;
pub use replenishment::ReplenishmentService;
pub use reporting::{DashboardOverview, LocationUtilization, ReportingService, UtilizationStatus};
pub use sample_data::SampleDataGenerator;
pub use supplier::SupplierService;
pub use weather::WeatherService;
