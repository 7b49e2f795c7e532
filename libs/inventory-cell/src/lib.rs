pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::*;
pub use handlers::InventoryHandlers;
pub use models::*;
pub use router::create_inventory_router;
