pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::*;
pub use handlers::ConfirmationHandlers;
pub use models::*;
pub use router::create_confirmation_router;
