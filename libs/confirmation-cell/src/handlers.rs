// =====================================================================================
// CONFIRMATION CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, instrument};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ConfirmationQuery, CreateConfirmationRequest, UpdateConfirmationRequest};
use crate::services::fixtures::seed_confirmations;
use crate::services::ConfirmationService;

pub struct ConfirmationHandlers {
    service: ConfirmationService,
}

impl ConfirmationHandlers {
    pub fn new(config: &AppConfig) -> Self {
        let service = if config.seed_mock_data {
            let records = seed_confirmations(Utc::now());
            info!("Seeded {} mock confirmations", records.len());
            ConfirmationService::with_records(records)
        } else {
            ConfirmationService::new()
        };

        Self { service }
    }

    pub fn with_service(service: ConfirmationService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ConfirmationService {
        &self.service
    }
}

#[instrument(skip(handlers))]
pub async fn list_confirmations(
    State(handlers): State<Arc<ConfirmationHandlers>>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Json<Value>, AppError> {
    let page = handlers.service.list(&query).await;

    Ok(Json(json!({
        "success": true,
        "data": page.data,
        "meta": page.meta,
        "stats": page.stats,
        "statusCounts": page.status_counts,
    })))
}

#[instrument(skip(handlers))]
pub async fn get_confirmation(
    State(handlers): State<Arc<ConfirmationHandlers>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let confirmation = handlers.service.get(&appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": confirmation,
    })))
}

#[instrument(skip(handlers, payload))]
pub async fn create_confirmation(
    State(handlers): State<Arc<ConfirmationHandlers>>,
    payload: Result<Json<CreateConfirmationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let confirmation = handlers.service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": confirmation,
        })),
    ))
}

#[instrument(skip(handlers, payload))]
pub async fn update_confirmation(
    State(handlers): State<Arc<ConfirmationHandlers>>,
    Path(appointment_id): Path<String>,
    payload: Result<Json<UpdateConfirmationRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let confirmation = handlers.service.update(&appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "data": confirmation,
    })))
}
