//! Error handling for the Demand Forecasting engine
//!
//! Every failure maps to a stable error code and an HTTP-style status so the
//! API layer can translate errors without matching on messages.

use serde::Serialize;
use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    // Forecasting errors
    #[error("Insufficient demand history: {0}")]
    InsufficientData(String),

    #[error("Forecast horizon must be at least one period")]
    InvalidHorizon,

    // Replenishment errors
    #[error("Invalid cost parameter {parameter}: {value}")]
    InvalidCostParameter { parameter: String, value: f64 },

    // Lookup errors
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    // Inventory errors
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation failed: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InsufficientData(_) => "INSUFFICIENT_DATA",
            EngineError::InvalidHorizon => "INVALID_HORIZON",
            EngineError::InvalidCostParameter { .. } => "INVALID_COST_PARAMETER",
            EngineError::UnknownProduct(_) => "UNKNOWN_PRODUCT",
            EngineError::UnknownLocation(_) => "UNKNOWN_LOCATION",
            EngineError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            EngineError::Validation { .. } | EngineError::ValidationErrors(_) => "VALIDATION_ERROR",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP-style status code for this error
    pub fn status(&self) -> u16 {
        match self {
            EngineError::InsufficientData(_)
            | EngineError::InvalidHorizon
            | EngineError::InvalidCostParameter { .. }
            | EngineError::InsufficientStock { .. } => 422,
            EngineError::UnknownProduct(_) | EngineError::UnknownLocation(_) => 404,
            EngineError::Validation { .. } | EngineError::ValidationErrors(_) => 400,
            EngineError::Configuration(_) | EngineError::Internal(_) => 500,
        }
    }

    /// Convert into a status code and serializable error body
    pub fn to_response(&self) -> (u16, ErrorResponse) {
        let field = match self {
            EngineError::Validation { field, .. } => Some(field.clone()),
            EngineError::InvalidCostParameter { parameter, .. } => Some(parameter.clone()),
            EngineError::ValidationErrors(errors) => {
                errors.field_errors().keys().next().map(|f| f.to_string())
            }
            _ => None,
        };

        let message = match self {
            EngineError::Validation { message, .. } => message.clone(),
            EngineError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if self.status() >= 500 {
            tracing::error!("Error: {:?}", self);
        }

        (
            self.status(),
            ErrorResponse {
                error: ErrorDetail {
                    code: self.code().to_string(),
                    message,
                    field,
                },
            },
        )
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_parameter_response_names_field() {
        let err = EngineError::InvalidCostParameter {
            parameter: "holding_cost".to_string(),
            value: 0.0,
        };
        let (status, body) = err.to_response();
        assert_eq!(status, 422);
        assert_eq!(body.error.code, "INVALID_COST_PARAMETER");
        assert_eq!(body.error.field.as_deref(), Some("holding_cost"));
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let (status, body) = EngineError::UnknownProduct("PROD-999".to_string()).to_response();
        assert_eq!(status, 404);
        assert!(body.error.message.contains("PROD-999"));
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let (status, body) = EngineError::Internal("lock poisoned".to_string()).to_response();
        assert_eq!(status, 500);
        assert!(!body.error.message.contains("poisoned"));
    }
}
