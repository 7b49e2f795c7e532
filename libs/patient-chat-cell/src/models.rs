use serde::{Deserialize, Serialize};

// ==============================================================================
// CLASSIFICATION
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Emergency,
    Complication,
    Positive,
    Neutral,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordClassification {
    pub category: MessageCategory,
    pub is_emergency: bool,
    pub is_complication: bool,
    pub is_positive: bool,
    /// Keywords of the winning category only.
    pub matched_keywords: Vec<String>,
}

impl KeywordClassification {
    pub fn new(category: MessageCategory, matched_keywords: Vec<String>) -> Self {
        Self {
            category,
            is_emergency: category == MessageCategory::Emergency,
            is_complication: category == MessageCategory::Complication,
            is_positive: category == MessageCategory::Positive,
            matched_keywords,
        }
    }
}

// ==============================================================================
// INTENT, URGENCY, SENTIMENT
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatientIntent {
    AppointmentBooking,
    AppointmentInquiry,
    AppointmentCancellation,
    AppointmentRescheduling,
    TreatmentQuestion,
    PostTreatmentFollowup,
    SideEffectReport,
    PreTreatmentQuestion,
    PricingInquiry,
    LocationHours,
    GeneralInquiry,
    Feedback,
    EmergencyMedical,
    UrgentConcern,
}

/// Ordered so that `>=` comparisons express "at least this urgent".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatientSentiment {
    Positive,
    Neutral,
    Concerned,
    Frustrated,
    Urgent,
}

// ==============================================================================
// REQUESTS & RESPONSES
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub message: Option<String>,
    pub conversation_id: Option<String>,
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub intent: PatientIntent,
    pub response: String,
    pub urgency: UrgencyLevel,
    pub sentiment: PatientSentiment,
    pub suggested_actions: Vec<String>,
    pub escalate: bool,
    pub confidence: f64,
    pub classification: KeywordClassification,
    pub keywords: Vec<String>,
}
