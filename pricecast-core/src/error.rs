//! Structured error types for the engine.
//!
//! Every failure is a local validation failure; nothing here is transient,
//! so callers never need to retry.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("insufficient data: need {needed} points, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject non-finite or non-positive prices.
pub(crate) fn ensure_positive_price(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{name} must be a positive finite price, got {value}"
        )))
    }
}

/// Reject zero-length horizons and windows.
pub(crate) fn ensure_nonzero(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        Err(EngineError::InvalidParameter(format!("{name} must be > 0")))
    } else {
        Ok(())
    }
}
