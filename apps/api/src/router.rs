use std::sync::Arc;

use axum::{routing::get, Router};

use confirmation_cell::create_confirmation_router;
use inventory_cell::create_inventory_router;
use patient_chat_cell::create_chat_router;
use shared_config::AppConfig;

pub fn create_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Med Spa operations API is running!" }))
        .nest("/api/confirmations", create_confirmation_router(config.clone()))
        .nest("/api/inventory", create_inventory_router(config.clone()))
        .nest("/api/chat", create_chat_router(config))
}
