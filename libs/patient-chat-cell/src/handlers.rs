// =====================================================================================
// PATIENT CHAT HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ChatMessageRequest, ClassifyRequest};
use crate::services::PatientAssistant;

pub struct ChatHandlers {
    assistant: PatientAssistant,
}

impl ChatHandlers {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            assistant: PatientAssistant::from_config(config),
        }
    }

    pub fn assistant(&self) -> &PatientAssistant {
        &self.assistant
    }
}

// Message bodies are patient data and stay out of spans.
#[instrument(skip(handlers, payload))]
pub async fn classify_message(
    State(handlers): State<Arc<ChatHandlers>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let classification = handlers.assistant.classify(request.message.as_deref())?;

    Ok(Json(json!({
        "success": true,
        "data": classification,
    })))
}

#[instrument(skip(handlers, payload))]
pub async fn send_message(
    State(handlers): State<Arc<ChatHandlers>>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let response = handlers.assistant.respond(&request)?;

    Ok(Json(json!({
        "success": true,
        "data": response,
    })))
}
