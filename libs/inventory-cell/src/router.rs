use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers::{get_analytics, record_waste, InventoryHandlers};

pub fn create_inventory_router(config: Arc<AppConfig>) -> Router {
    let handlers = Arc::new(InventoryHandlers::new(&config));
    inventory_routes(handlers)
}

pub fn inventory_routes(handlers: Arc<InventoryHandlers>) -> Router {
    Router::new()
        .route("/analytics", get(get_analytics).post(record_waste))
        .with_state(handlers)
}
