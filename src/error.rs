//! Engine errors
//!
//! The formulas themselves are total over the declared parameter ranges, so the
//! only failures are lookups by id and values the clamp cannot repair.

use thiserror::Error;

/// Errors surfaced by simulator sessions and the interactive catalog
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown preset '{preset}' for simulator '{simulator}'")]
    UnknownPreset { simulator: String, preset: String },

    #[error("Unknown parameter '{parameter}' for simulator '{simulator}'")]
    UnknownParameter { simulator: String, parameter: String },

    #[error("Unknown simulator: {0}")]
    UnknownSimulator(String),

    #[error("Parameter '{parameter}' rejected non-finite value {value}")]
    NonFiniteValue { parameter: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
