use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfirmationError {
    #[error("Confirmation not found for appointment {0}")]
    NotFound(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("A pending confirmation already exists for appointment {0}")]
    DuplicatePending(String),

    #[error("Invalid status '{value}'. Valid statuses: {valid}")]
    InvalidStatus { value: String, valid: String },

    #[error("Invalid action '{value}'. Valid actions: {valid}")]
    InvalidAction { value: String, valid: String },

    #[error("Either action or status is required")]
    MissingAction,

    #[error("appointmentEnd must not be before appointmentStart")]
    InvalidTimeRange,
}

impl From<ConfirmationError> for AppError {
    fn from(err: ConfirmationError) -> Self {
        match err {
            ConfirmationError::NotFound(_) => AppError::NotFound(err.to_string()),
            ConfirmationError::MissingFields(_)
            | ConfirmationError::InvalidStatus { .. }
            | ConfirmationError::InvalidAction { .. }
            | ConfirmationError::MissingAction
            | ConfirmationError::InvalidTimeRange => AppError::ValidationError(err.to_string()),
            ConfirmationError::DuplicatePending(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
