// =====================================================================================
// INVENTORY CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AnalyticsQuery, RecordWasteRequest, ReportType};
use crate::services::fixtures::{seed_products, seed_transactions};
use crate::services::{resolve_params, AnalyticsReport, InventoryService};

pub struct InventoryHandlers {
    service: InventoryService,
    default_window_days: i64,
}

impl InventoryHandlers {
    pub fn new(config: &AppConfig) -> Self {
        let products = seed_products();
        let transactions = if config.seed_mock_data {
            let transactions = seed_transactions(&products, Utc::now());
            info!("Seeded {} mock inventory transactions", transactions.len());
            transactions
        } else {
            Vec::new()
        };

        Self {
            service: InventoryService::new(products, transactions),
            default_window_days: config.analytics_window_days(),
        }
    }

    pub fn with_service(service: InventoryService, default_window_days: i64) -> Self {
        Self {
            service,
            default_window_days,
        }
    }

    pub fn service(&self) -> &InventoryService {
        &self.service
    }
}

#[derive(Serialize)]
pub struct ReportResponse {
    success: bool,
    #[serde(flatten)]
    report: AnalyticsReport,
}

#[instrument(skip(handlers))]
pub async fn get_analytics(
    State(handlers): State<Arc<InventoryHandlers>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let report_type = ReportType::parse(query.report_type.as_deref());
    let params = resolve_params(&query, handlers.default_window_days, Utc::now())?;

    let report = handlers.service.report(report_type, &params).await;

    Ok(Json(ReportResponse {
        success: true,
        report,
    }))
}

#[instrument(skip(handlers, payload))]
pub async fn record_waste(
    State(handlers): State<Arc<InventoryHandlers>>,
    payload: Result<Json<RecordWasteRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let (waste_record, impact) = handlers.service.record_waste(request).await?;

    Ok(Json(json!({
        "success": true,
        "wasteRecord": waste_record,
        "impact": impact,
    })))
}
