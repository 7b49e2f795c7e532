use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Message is required")]
    EmptyMessage,
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
