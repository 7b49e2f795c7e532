use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Product not found")]
    ProductNotFound(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("unitsWasted must be greater than zero")]
    InvalidQuantity,

    #[error("Invalid waste reason '{value}'. Valid reasons: {valid}")]
    InvalidWasteReason { value: String, valid: String },

    #[error("Invalid {field}: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("startDate must not be after endDate")]
    InvalidPeriod,

    #[error("Report period must not exceed {max_days} days")]
    PeriodTooLong { max_days: i64 },
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(_) => AppError::NotFound(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}
