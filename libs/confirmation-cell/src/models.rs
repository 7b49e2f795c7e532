use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfirmationError;

// ==============================================================================
// CONFIRMATION RECORD
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub id: String,
    pub appointment_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: Option<String>,
    pub service_name: String,
    pub practitioner_id: String,
    pub practitioner_name: String,
    pub appointment_start: DateTime<Utc>,
    pub appointment_end: DateTime<Utc>,

    pub status: ConfirmationStatus,
    pub primary_channel: ContactChannel,
    pub secondary_channels: Vec<ContactChannel>,
    pub no_show_risk: NoShowRisk,

    pub escalation_level: EscalationLevel,
    pub escalation_attempts: u32,
    pub last_escalation_at: Option<DateTime<Utc>>,
    pub escalation_reason: Option<String>,

    pub sent_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
    pub response_time_minutes: Option<i64>,
    pub response_notes: Option<String>,

    pub requires_follow_up: bool,
    pub follow_up_action: Option<String>,
    pub follow_up_scheduled_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

impl ConfirmationRequest {
    pub fn uses_channel(&self, channel: ContactChannel) -> bool {
        self.primary_channel == channel || self.secondary_channels.contains(&channel)
    }

    pub fn is_high_risk_unconfirmed(&self) -> bool {
        self.no_show_risk == NoShowRisk::High && self.status != ConfirmationStatus::Confirmed
    }
}

// ==============================================================================
// ENUMS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Rescheduled,
    NoResponse,
    Cancelled,
}

impl ConfirmationStatus {
    pub const ALL: [ConfirmationStatus; 5] = [
        ConfirmationStatus::Pending,
        ConfirmationStatus::Confirmed,
        ConfirmationStatus::Rescheduled,
        ConfirmationStatus::NoResponse,
        ConfirmationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationStatus::Pending => "pending",
            ConfirmationStatus::Confirmed => "confirmed",
            ConfirmationStatus::Rescheduled => "rescheduled",
            ConfirmationStatus::NoResponse => "no_response",
            ConfirmationStatus::Cancelled => "cancelled",
        }
    }

    pub fn valid_values() -> String {
        Self::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfirmationStatus {
    type Err = ConfirmationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ConfirmationError::InvalidStatus {
                value: value.to_string(),
                valid: Self::valid_values(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EscalationLevel {
    #[default]
    None,
    Warning,
    Escalated,
}

impl EscalationLevel {
    /// Level implied by the number of escalation attempts made so far.
    pub fn for_attempts(attempts: u32) -> Self {
        match attempts {
            0 => EscalationLevel::None,
            1 => EscalationLevel::Warning,
            _ => EscalationLevel::Escalated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationLevel::None => "none",
            EscalationLevel::Warning => "warning",
            EscalationLevel::Escalated => "escalated",
        }
    }
}

impl fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    #[default]
    Sms,
    Email,
    Phone,
    Push,
}

impl ContactChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactChannel::Sms => "sms",
            ContactChannel::Email => "email",
            ContactChannel::Phone => "phone",
            ContactChannel::Push => "push",
        }
    }
}

impl FromStr for ContactChannel {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sms" => Ok(ContactChannel::Sms),
            "email" => Ok(ContactChannel::Email),
            "phone" => Ok(ContactChannel::Phone),
            "push" => Ok(ContactChannel::Push),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoShowRisk {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAction {
    Confirmed,
    Rescheduled,
    Cancelled,
    Escalate,
    MarkFollowedUp,
}

impl ConfirmationAction {
    pub const ALL: [ConfirmationAction; 5] = [
        ConfirmationAction::Confirmed,
        ConfirmationAction::Rescheduled,
        ConfirmationAction::Cancelled,
        ConfirmationAction::Escalate,
        ConfirmationAction::MarkFollowedUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationAction::Confirmed => "confirmed",
            ConfirmationAction::Rescheduled => "rescheduled",
            ConfirmationAction::Cancelled => "cancelled",
            ConfirmationAction::Escalate => "escalate",
            ConfirmationAction::MarkFollowedUp => "mark_followed_up",
        }
    }

    pub fn valid_values() -> String {
        Self::ALL.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for ConfirmationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfirmationAction {
    type Err = ConfirmationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ConfirmationError::InvalidAction {
                value: value.to_string(),
                valid: Self::valid_values(),
            })
    }
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

/// Body of `POST /confirmations`. Required fields are optional here so that
/// a missing field surfaces as a validation error naming it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfirmationRequest {
    pub appointment_id: Option<String>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_email: Option<String>,
    pub service_name: Option<String>,
    pub practitioner_id: Option<String>,
    pub practitioner_name: Option<String>,
    pub appointment_start: Option<DateTime<Utc>>,
    pub appointment_end: Option<DateTime<Utc>>,
    pub primary_channel: Option<ContactChannel>,
    #[serde(default)]
    pub secondary_channels: Vec<ContactChannel>,
    pub no_show_risk: Option<NoShowRisk>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfirmationRequest {
    pub action: Option<String>,
    pub status: Option<String>,
    pub response_notes: Option<String>,
    pub escalation_reason: Option<String>,
    pub follow_up_action: Option<String>,
    pub follow_up_scheduled_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationQuery {
    pub status: Option<String>,
    pub escalation_level: Option<String>,
    pub channel: Option<String>,
    pub practitioner_id: Option<String>,
    pub patient_id: Option<String>,
    pub requires_follow_up: Option<String>,
    pub high_risk_only: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rescheduled: usize,
    pub cancelled: usize,
    pub no_response: usize,
    pub escalated: usize,
    pub requires_follow_up: usize,
    pub high_risk: usize,
    pub confirmation_rate: f64,
    pub average_response_time_minutes: Option<f64>,
}
