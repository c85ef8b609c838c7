//! Validation utilities for the Demand Forecasting Dashboard

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::{MovementInput, MovementKind, NewProduct};

// ============================================================================
// Catalog Validations
// ============================================================================

/// Unit cost must be strictly positive
pub fn validate_unit_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if *cost <= Decimal::ZERO {
        let mut err = ValidationError::new("unit_cost");
        err.message = Some("Unit cost must be greater than zero".into());
        return Err(err);
    }
    Ok(())
}

/// Stock thresholds must be ordered: safety <= reorder point < max stock
pub fn validate_stock_levels(safety: i64, reorder: i64, max: i64) -> Result<(), &'static str> {
    if safety < 0 || reorder < 0 {
        return Err("Stock thresholds cannot be negative");
    }
    if safety > reorder {
        return Err("Safety stock cannot exceed the reorder point");
    }
    if reorder >= max {
        return Err("Reorder point must be below max stock");
    }
    Ok(())
}

/// Cross-field checks `#[derive(Validate)]` does not cover
pub fn validate_new_product(input: &NewProduct) -> Result<(), &'static str> {
    validate_stock_levels(input.safety_stock, input.reorder_point, input.max_stock)
}

/// Validate SKU format (uppercase alphanumeric segments joined by '-')
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.len() < 3 {
        return Err("SKU must be at least 3 characters");
    }
    if sku.starts_with('-') || sku.ends_with('-') || sku.contains("--") {
        return Err("SKU segments cannot be empty");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("SKU must be uppercase alphanumeric");
    }
    Ok(())
}

// ============================================================================
// Movement Validations
// ============================================================================

/// Check a movement's quantity sign and locations against its kind
pub fn validate_movement(input: &MovementInput) -> Result<(), &'static str> {
    match input.kind {
        MovementKind::Received if input.quantity <= 0 => {
            Err("Received quantity must be positive")
        }
        MovementKind::Shipped if input.quantity >= 0 => {
            Err("Shipped quantity must be negative")
        }
        MovementKind::Adjustment if input.quantity == 0 => {
            Err("Adjustment quantity cannot be zero")
        }
        MovementKind::Transfer => {
            if input.quantity <= 0 {
                return Err("Transfer quantity must be positive");
            }
            match (&input.from_location, &input.to_location) {
                (Some(from), Some(to)) if from == to => {
                    Err("Transfer source and destination must differ")
                }
                (Some(_), Some(_)) => Ok(()),
                _ => Err("Transfer requires both source and destination"),
            }
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Forecast Validations
// ============================================================================

/// Ensemble weights must be non-negative and sum to 1
pub fn validate_ensemble_weights(weights: &[f64]) -> Result<(), &'static str> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err("Ensemble weights must be finite and non-negative");
    }
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > 1e-9 {
        return Err("Ensemble weights must sum to 1");
    }
    Ok(())
}

/// Confidence level must lie strictly between 0 and 1
pub fn validate_confidence_level(level: f64) -> Result<(), &'static str> {
    if !(level > 0.0 && level < 1.0) {
        return Err("Confidence level must be between 0 and 1");
    }
    Ok(())
}
