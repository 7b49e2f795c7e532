use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_config::{analytics_window_days, MAX_ANALYTICS_WINDOW_DAYS};
use shared_utils::ids::generate_id;
use shared_utils::query::{non_empty, parse_datetime};

use crate::error::InventoryError;
use crate::models::{
    AnalyticsParams, AnalyticsQuery, InventoryTransaction, Period, Product,
    ProfitabilityReport, ProviderComparisonReport, ProviderReport, RecordWasteRequest,
    ReportType, SummaryReport, TreatmentCostReport, UsageTrendsReport, WasteImpact, WasteReason,
    WasteRecord, WasteReport,
};
use crate::services::analytics::InventoryAnalytics;

pub const MONTHLY_PROJECTION_FACTOR: f64 = 30.0;
const DEFAULT_RECORDER_NAME: &str = "Staff";
const DEFAULT_LOCATION_NAME: &str = "Main Location";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AnalyticsReport {
    Provider(ProviderReport),
    ProviderComparison(ProviderComparisonReport),
    CostPerTreatment(TreatmentCostReport),
    Waste(WasteReport),
    Profitability(ProfitabilityReport),
    UsageTrends(UsageTrendsReport),
    Summary(SummaryReport),
}

/// Turns raw query parameters into a report period and filters. Missing dates
/// fall back to the `default_window_days` ending at `now`; an out-of-range
/// window uses the configured default instead.
pub fn resolve_params(
    query: &AnalyticsQuery,
    default_window_days: i64,
    now: DateTime<Utc>,
) -> Result<AnalyticsParams, InventoryError> {
    let end = match non_empty(query.end_date.as_deref()) {
        Some(raw) => parse_datetime(raw).ok_or_else(|| InventoryError::InvalidDate {
            field: "endDate",
            value: raw.to_string(),
        })?,
        None => now,
    };
    let start = match non_empty(query.start_date.as_deref()) {
        Some(raw) => parse_datetime(raw).ok_or_else(|| InventoryError::InvalidDate {
            field: "startDate",
            value: raw.to_string(),
        })?,
        None => Duration::try_days(analytics_window_days(default_window_days))
            .and_then(|window| end.checked_sub_signed(window))
            .ok_or(InventoryError::InvalidPeriod)?,
    };

    if start > end {
        return Err(InventoryError::InvalidPeriod);
    }
    if end.signed_duration_since(start) > Duration::days(MAX_ANALYTICS_WINDOW_DAYS) {
        return Err(InventoryError::PeriodTooLong {
            max_days: MAX_ANALYTICS_WINDOW_DAYS,
        });
    }

    let owned = |raw: &Option<String>| non_empty(raw.as_deref()).map(str::to_string);

    Ok(AnalyticsParams {
        period: Period { start, end },
        provider_id: owned(&query.provider_id),
        product_id: owned(&query.product_id),
        location_id: owned(&query.location_id),
    })
}

/// Product catalog, transaction log and waste records. The catalog is fixed
/// for the life of the service; waste recording holds the write lock.
#[derive(Clone, Default)]
pub struct InventoryService {
    products: Arc<Vec<Product>>,
    transactions: Arc<RwLock<Vec<InventoryTransaction>>>,
    waste: Arc<RwLock<Vec<WasteRecord>>>,
}

impl InventoryService {
    pub fn new(products: Vec<Product>, transactions: Vec<InventoryTransaction>) -> Self {
        Self {
            products: Arc::new(products),
            transactions: Arc::new(RwLock::new(transactions)),
            waste: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_waste(self, records: Vec<WasteRecord>) -> Self {
        Self {
            waste: Arc::new(RwLock::new(records)),
            ..self
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub async fn waste_records(&self) -> Vec<WasteRecord> {
        self.waste.read().await.clone()
    }

    pub async fn report(
        &self,
        report_type: ReportType,
        params: &AnalyticsParams,
    ) -> AnalyticsReport {
        let transactions = self.transactions.read().await;
        let waste = self.waste.read().await;
        let analytics =
            InventoryAnalytics::new(&self.products, &transactions, &waste, params, Utc::now());

        debug!(
            "Building {:?} report over {} transactions and {} waste records",
            report_type,
            transactions.len(),
            waste.len()
        );

        match report_type {
            ReportType::Provider => AnalyticsReport::Provider(analytics.provider_report()),
            ReportType::ProviderComparison => {
                AnalyticsReport::ProviderComparison(analytics.provider_comparison())
            }
            ReportType::CostPerTreatment => {
                AnalyticsReport::CostPerTreatment(analytics.treatment_cost_report())
            }
            ReportType::Waste => AnalyticsReport::Waste(analytics.waste_report()),
            ReportType::Profitability => {
                AnalyticsReport::Profitability(analytics.profitability_report())
            }
            ReportType::UsageTrends => AnalyticsReport::UsageTrends(analytics.usage_trends()),
            ReportType::Summary => AnalyticsReport::Summary(analytics.summary()),
        }
    }

    pub async fn record_waste(
        &self,
        request: RecordWasteRequest,
    ) -> Result<(WasteRecord, WasteImpact), InventoryError> {
        let Some(product_id) = non_empty(request.product_id.as_deref()).map(str::to_string) else {
            warn!("Waste recording rejected: missing productId");
            return Err(InventoryError::MissingFields(vec!["productId".to_string()]));
        };

        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| InventoryError::ProductNotFound(product_id.clone()))?;

        let units_wasted = match request.units_wasted {
            Some(units) if units > 0.0 && units.is_finite() => units,
            _ => return Err(InventoryError::InvalidQuantity),
        };

        let reason: WasteReason = match non_empty(request.reason.as_deref()) {
            Some(raw) => raw.parse()?,
            None => return Err(InventoryError::MissingFields(vec!["reason".to_string()])),
        };

        let unit_cost = product.unit_cost();
        let total_waste_value = units_wasted * unit_cost;
        let now = Utc::now();

        let record = WasteRecord {
            id: generate_id("waste"),
            lot_id: request.lot_id.unwrap_or_default(),
            lot_number: request.lot_number.unwrap_or_default(),
            product_id,
            product_name: product.label().to_string(),
            open_vial_session_id: request.open_vial_session_id,
            units_wasted,
            unit_type: product.unit_type,
            reason,
            reason_notes: request.reason_notes,
            unit_cost,
            total_waste_value,
            recorded_by: request.recorded_by,
            recorded_by_name: request
                .recorded_by_name
                .unwrap_or_else(|| DEFAULT_RECORDER_NAME.to_string()),
            recorded_at: now,
            location_id: request.location_id,
            location_name: request
                .location_name
                .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
            practitioner_id: request.practitioner_id,
            practitioner_name: request.practitioner_name,
            appointment_id: request.appointment_id,
            created_at: now,
            updated_at: now,
        };

        self.waste.write().await.push(record.clone());

        info!(
            "Recorded waste {}: {} {} ({}) worth ${:.2}",
            record.id, record.units_wasted, record.product_name, record.reason, total_waste_value
        );

        Ok((
            record,
            WasteImpact {
                unit_waste_value: unit_cost,
                total_waste_value,
                monthly_waste_projection: total_waste_value * MONTHLY_PROJECTION_FACTOR,
            },
        ))
    }
}
