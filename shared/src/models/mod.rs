//! Domain models for the Demand Forecasting Dashboard

mod alert;
mod allocation;
mod demand;
mod event;
mod forecast;
mod insight;
mod location;
mod movement;
mod product;
mod replenishment;
mod supplier;
mod weather;

pub use alert::*;
pub use allocation::*;
pub use demand::*;
pub use event::*;
pub use forecast::*;
pub use insight::*;
pub use location::*;
pub use movement::*;
pub use product::*;
pub use replenishment::*;
pub use supplier::*;
pub use weather::*;
