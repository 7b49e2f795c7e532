use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

// ==============================================================================
// CATALOG & TRANSACTION LOG
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub category: ProductCategory,
    /// Purchase cost of one package.
    pub cost_price: f64,
    /// Billed price per unit.
    pub unit_price: f64,
    pub unit_type: UnitType,
    pub units_per_package: f64,
}

impl Product {
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn unit_cost(&self) -> f64 {
        if self.units_per_package > 0.0 {
            self.cost_price / self.units_per_package
        } else {
            self.cost_price
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Neurotoxin,
    Filler,
    Biostimulator,
    Skincare,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Units,
    Syringe,
    Vial,
    Ml,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    TreatmentUse,
    Receiving,
    Adjustment,
    Transfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InjectedArea {
    pub name: String,
    pub units: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentDetails {
    pub service_name: String,
    #[serde(default)]
    pub areas_injected: Vec<InjectedArea>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
    pub product_id: String,
    pub product_name: String,
    /// Negative for deductions.
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub location_id: String,
    pub location_name: String,
    pub patient_id: Option<String>,
    pub practitioner_id: Option<String>,
    pub practitioner_name: Option<String>,
    pub appointment_id: Option<String>,
    pub treatment_details: Option<TreatmentDetails>,
}

impl InventoryTransaction {
    pub fn units(&self) -> f64 {
        self.quantity.abs()
    }
}

// ==============================================================================
// WASTE
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WasteReason {
    ExpiredUnused,
    StabilityExceeded,
    Contamination,
    DrawUpLoss,
    PatientNoShow,
    AdverseReactionDiscard,
    Training,
    Damaged,
    Recall,
    Other,
}

impl WasteReason {
    pub const ALL: [WasteReason; 10] = [
        WasteReason::ExpiredUnused,
        WasteReason::StabilityExceeded,
        WasteReason::Contamination,
        WasteReason::DrawUpLoss,
        WasteReason::PatientNoShow,
        WasteReason::AdverseReactionDiscard,
        WasteReason::Training,
        WasteReason::Damaged,
        WasteReason::Recall,
        WasteReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::ExpiredUnused => "expired_unused",
            WasteReason::StabilityExceeded => "stability_exceeded",
            WasteReason::Contamination => "contamination",
            WasteReason::DrawUpLoss => "draw_up_loss",
            WasteReason::PatientNoShow => "patient_no_show",
            WasteReason::AdverseReactionDiscard => "adverse_reaction_discard",
            WasteReason::Training => "training",
            WasteReason::Damaged => "damaged",
            WasteReason::Recall => "recall",
            WasteReason::Other => "other",
        }
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteReason {
    type Err = InventoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == value)
            .ok_or_else(|| InventoryError::InvalidWasteReason {
                value: value.to_string(),
                valid: Self::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", "),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteRecord {
    pub id: String,
    pub lot_id: String,
    pub lot_number: String,
    pub product_id: String,
    pub product_name: String,
    pub open_vial_session_id: Option<String>,
    pub units_wasted: f64,
    pub unit_type: UnitType,
    pub reason: WasteReason,
    pub reason_notes: Option<String>,
    pub unit_cost: f64,
    pub total_waste_value: f64,
    pub recorded_by: Option<String>,
    pub recorded_by_name: String,
    pub recorded_at: DateTime<Utc>,
    pub location_id: Option<String>,
    pub location_name: String,
    pub practitioner_id: Option<String>,
    pub practitioner_name: Option<String>,
    pub appointment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWasteRequest {
    pub product_id: Option<String>,
    pub units_wasted: Option<f64>,
    pub reason: Option<String>,
    pub lot_id: Option<String>,
    pub lot_number: Option<String>,
    pub open_vial_session_id: Option<String>,
    pub reason_notes: Option<String>,
    pub practitioner_id: Option<String>,
    pub practitioner_name: Option<String>,
    pub recorded_by: Option<String>,
    pub recorded_by_name: Option<String>,
    pub location_id: Option<String>,
    pub location_name: Option<String>,
    pub appointment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteImpact {
    pub unit_waste_value: f64,
    pub total_waste_value: f64,
    pub monthly_waste_projection: f64,
}

// ==============================================================================
// ANALYTICS QUERY
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub provider_id: Option<String>,
    pub product_id: Option<String>,
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Provider,
    ProviderComparison,
    CostPerTreatment,
    Waste,
    Profitability,
    UsageTrends,
    Summary,
}

impl ReportType {
    /// Unknown or absent types fall back to the summary report.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("provider") => ReportType::Provider,
            Some("provider-comparison") => ReportType::ProviderComparison,
            Some("cost-per-treatment") => ReportType::CostPerTreatment,
            Some("waste") => ReportType::Waste,
            Some("profitability") => ReportType::Profitability,
            Some("usage-trends") => ReportType::UsageTrends,
            _ => ReportType::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Resolved report parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsParams {
    pub period: Period,
    pub provider_id: Option<String>,
    pub product_id: Option<String>,
    pub location_id: Option<String>,
}

// ==============================================================================
// REPORTS
// ==============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProductUsage {
    pub product_id: String,
    pub product_name: String,
    pub units_used: f64,
    pub treatments: u32,
    pub avg_per_treatment: f64,
    pub vs_clinic_average: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaUsage {
    pub area: String,
    pub units_used: f64,
    pub treatments: u32,
    pub avg_per_treatment: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInventoryStats {
    pub provider_id: String,
    pub provider_name: String,
    pub total_units_used: f64,
    pub total_treatments: u32,
    pub average_units_per_treatment: f64,
    pub average_units_vs_clinic_average: f64,
    pub is_above_average: bool,
    pub variance_percent: f64,
    pub by_product: Vec<ProviderProductUsage>,
    pub by_area: Vec<AreaUsage>,
    pub waste_units: f64,
    pub waste_value: f64,
    pub waste_percent: f64,
    pub revenue_generated: f64,
    pub cost_of_goods_used: f64,
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicAverage {
    pub units_per_treatment: f64,
    pub total_treatments: u32,
    pub total_units: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReport {
    pub providers: Vec<ProviderInventoryStats>,
    pub clinic_average: ClinicAverage,
    pub period: Period,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VarianceDirection {
    Above,
    Below,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOutlier {
    pub provider_id: String,
    pub provider_name: String,
    pub variance_percent: f64,
    pub direction: VarianceDirection,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderComparisonReport {
    #[serde(flatten)]
    pub report: ProviderReport,
    pub outlier_threshold_percent: f64,
    pub outliers: Vec<ProviderOutlier>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentProductBreakdown {
    pub product_id: String,
    pub product_name: String,
    pub avg_units_used: f64,
    pub avg_cost: f64,
    pub percent_of_total_cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCostAnalysis {
    pub treatment_id: String,
    pub treatment_name: String,
    pub avg_product_cost: f64,
    pub avg_units_used: f64,
    pub avg_cost_per_unit: f64,
    pub avg_revenue_per_treatment: f64,
    pub avg_profit_per_treatment: f64,
    pub avg_profit_margin: f64,
    pub product_breakdown: Vec<TreatmentProductBreakdown>,
    pub cost_variance: f64,
    pub high_cost_treatments: u32,
    pub low_cost_treatments: u32,
    pub total_treatments: u32,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCostSummary {
    pub total_treatments: u32,
    pub avg_profit_margin: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCostReport {
    pub treatments: Vec<TreatmentCostAnalysis>,
    pub summary: TreatmentCostSummary,
    pub period: Period,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteTally {
    pub count: u32,
    pub units: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteByReason {
    pub reason: WasteReason,
    #[serde(flatten)]
    pub tally: WasteTally,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteByProduct {
    pub product_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub tally: WasteTally,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteByProvider {
    pub provider_id: String,
    pub provider_name: String,
    #[serde(flatten)]
    pub tally: WasteTally,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteSummary {
    pub total_records: u32,
    pub total_units_wasted: f64,
    pub total_waste_value: f64,
    pub avg_waste_per_incident: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteReport {
    pub summary: WasteSummary,
    pub by_reason: Vec<WasteByReason>,
    pub by_product: Vec<WasteByProduct>,
    pub by_provider: Vec<WasteByProvider>,
    pub recent_records: Vec<WasteRecord>,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfitability {
    pub product_id: String,
    pub product_name: String,
    pub units_used: f64,
    pub cost: f64,
    pub revenue: f64,
    pub gross_profit: f64,
    pub waste_value: f64,
    pub net_profit: f64,
    pub gross_margin: f64,
    pub net_margin: f64,
    pub treatments: u32,
    pub revenue_per_treatment: f64,
    pub cost_per_treatment: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilitySummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_gross_profit: f64,
    pub total_waste_value: f64,
    pub total_net_profit: f64,
    pub gross_margin: f64,
    pub net_margin: f64,
    pub waste_impact_percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityReport {
    pub summary: ProfitabilitySummary,
    pub by_product: Vec<ProductProfitability>,
    pub insights: Vec<String>,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageBucket {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub units_used: f64,
    pub treatments: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageTrendsReport {
    pub buckets: Vec<UsageBucket>,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_treatments: u32,
    pub total_units_used: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub total_waste_value: f64,
    pub waste_percent: f64,
    pub unique_patients: usize,
    pub unique_providers: usize,
    pub avg_units_per_treatment: f64,
    pub avg_cost_per_treatment: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub summary: InventorySummary,
    pub period: Period,
}
