use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers::{
    create_confirmation, get_confirmation, list_confirmations, update_confirmation,
    ConfirmationHandlers,
};

pub fn create_confirmation_router(config: Arc<AppConfig>) -> Router {
    let handlers = Arc::new(ConfirmationHandlers::new(&config));
    confirmation_routes(handlers)
}

pub fn confirmation_routes(handlers: Arc<ConfirmationHandlers>) -> Router {
    Router::new()
        .route("/", get(list_confirmations).post(create_confirmation))
        .route(
            "/{appointment_id}",
            get(get_confirmation).put(update_confirmation),
        )
        .with_state(handlers)
}
