use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers::{classify_message, send_message, ChatHandlers};

pub fn create_chat_router(config: Arc<AppConfig>) -> Router {
    let handlers = Arc::new(ChatHandlers::new(&config));

    Router::new()
        .route("/classify", post(classify_message))
        .route("/messages", post(send_message))
        .with_state(handlers)
}
