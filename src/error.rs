use thiserror::Error;

use crate::validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Missing input: {0}")]
    MissingInput(ValidationErrors),

    #[error("Invalid input value: amount, term and rate are not positive")]
    InvalidMagnitude,

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Locale error: {0}")]
    Locale(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
