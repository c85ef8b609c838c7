//! Demand Forecasting Dashboard - engine runner
//!
//! Populates an in-memory store with sample data, runs one evaluation pass
//! and prints the dashboard report as JSON.

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use demand_forecasting_backend::services::{
    DashboardContext, DashboardService, EventQueue, InventoryService, SampleDataGenerator,
};
use demand_forecasting_backend::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dfd_engine=debug,demand_forecasting_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    config.validate()?;

    tracing::info!("Starting Demand Forecasting Engine");
    tracing::info!("Environment: {}", config.environment);

    let events = EventQueue::new();
    let store = InventoryService::new(events.clone());
    let now = Utc::now();

    let mut generator = SampleDataGenerator::new(&config.sample);
    generator.populate(&store, now)?;
    let suppliers = generator.suppliers();
    let weather = generator.route_weather(&suppliers, now.date_naive());

    // Populating emits one event per movement; only the evaluation pass is reported
    let seeded = events.drain().len();
    tracing::debug!(events = seeded, "Discarded sample population events");

    let snapshot = store.snapshot()?;
    let context = DashboardContext::new(suppliers, weather, now);
    let service = DashboardService::new(&config);

    let report = tokio::task::spawn_blocking(move || service.evaluate(&snapshot, &context)).await??;
    events.publish_alerts(&report.alerts);

    println!("{}", serde_json::to_string_pretty(&report)?);

    for event in events.drain() {
        tracing::info!(event_type = event.event_type(), "Dashboard event");
    }

    Ok(())
}
