use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use shared_utils::query::{non_empty, parse_bool, split_csv};

use crate::models::{
    ConfirmationQuery, ConfirmationRequest, ConfirmationStats, ConfirmationStatus, ContactChannel,
    EscalationLevel,
};

// ==============================================================================
// FILTERING
// ==============================================================================

/// AND-combination of the optional list filters. Set-valued filters compare
/// the wire spelling, so an unknown value matches nothing.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationFilter {
    pub statuses: Vec<String>,
    pub escalation_levels: Vec<String>,
    pub channel: Option<String>,
    pub practitioner_id: Option<String>,
    pub patient_id: Option<String>,
    pub requires_follow_up: Option<bool>,
    pub high_risk_only: bool,
    pub search: Option<String>,
}

impl ConfirmationFilter {
    pub fn from_query(query: &ConfirmationQuery) -> Self {
        Self {
            statuses: split_csv(query.status.as_deref()),
            escalation_levels: split_csv(query.escalation_level.as_deref()),
            channel: non_empty(query.channel.as_deref()).map(str::to_ascii_lowercase),
            practitioner_id: non_empty(query.practitioner_id.as_deref()).map(str::to_string),
            patient_id: non_empty(query.patient_id.as_deref()).map(str::to_string),
            requires_follow_up: parse_bool(query.requires_follow_up.as_deref()),
            high_risk_only: parse_bool(query.high_risk_only.as_deref()).unwrap_or(false),
            search: non_empty(query.search.as_deref()).map(str::to_lowercase),
        }
    }

    pub fn matches(&self, record: &ConfirmationRequest) -> bool {
        if !self.statuses.is_empty()
            && !self.statuses.iter().any(|s| s == record.status.as_str())
        {
            return false;
        }

        if !self.escalation_levels.is_empty()
            && !self
                .escalation_levels
                .iter()
                .any(|l| l == record.escalation_level.as_str())
        {
            return false;
        }

        if let Some(channel) = &self.channel {
            match channel.parse::<ContactChannel>() {
                Ok(channel) if record.uses_channel(channel) => {}
                _ => return false,
            }
        }

        if let Some(practitioner_id) = &self.practitioner_id {
            if &record.practitioner_id != practitioner_id {
                return false;
            }
        }

        if let Some(patient_id) = &self.patient_id {
            if &record.patient_id != patient_id {
                return false;
            }
        }

        if let Some(requires_follow_up) = self.requires_follow_up {
            if record.requires_follow_up != requires_follow_up {
                return false;
            }
        }

        if self.high_risk_only && !record.is_high_risk_unconfirmed() {
            return false;
        }

        if let Some(term) = &self.search {
            let haystacks = [
                Some(record.patient_name.as_str()),
                Some(record.service_name.as_str()),
                Some(record.patient_phone.as_str()),
                record.patient_email.as_deref(),
                Some(record.practitioner_name.as_str()),
            ];
            if !haystacks
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(term.as_str()))
            {
                return false;
            }
        }

        true
    }
}

// ==============================================================================
// SORTING
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    AppointmentStart,
    AppointmentEnd,
    SentAt,
    RespondedAt,
    CreatedAt,
    UpdatedAt,
    LastEscalationAt,
    EscalationAttempts,
    ResponseTimeMinutes,
    PatientName,
    ServiceName,
    PractitionerName,
    Status,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        let field = match value {
            "appointmentStart" => SortField::AppointmentStart,
            "appointmentEnd" => SortField::AppointmentEnd,
            "sentAt" => SortField::SentAt,
            "respondedAt" => SortField::RespondedAt,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            "lastEscalationAt" => SortField::LastEscalationAt,
            "escalationAttempts" => SortField::EscalationAttempts,
            "responseTimeMinutes" => SortField::ResponseTimeMinutes,
            "patientName" => SortField::PatientName,
            "serviceName" => SortField::ServiceName,
            "practitionerName" => SortField::PractitionerName,
            "status" => SortField::Status,
            _ => return None,
        };
        Some(field)
    }
}

enum SortValue<'a> {
    Date(DateTime<Utc>),
    Number(i64),
    Text(&'a str),
}

fn sort_value(record: &ConfirmationRequest, field: SortField) -> Option<SortValue<'_>> {
    match field {
        SortField::AppointmentStart => Some(SortValue::Date(record.appointment_start)),
        SortField::AppointmentEnd => Some(SortValue::Date(record.appointment_end)),
        SortField::SentAt => record.sent_at.map(SortValue::Date),
        SortField::RespondedAt => record.responded_at.map(SortValue::Date),
        SortField::CreatedAt => Some(SortValue::Date(record.created_at)),
        SortField::UpdatedAt => Some(SortValue::Date(record.updated_at)),
        SortField::LastEscalationAt => record.last_escalation_at.map(SortValue::Date),
        SortField::EscalationAttempts => {
            Some(SortValue::Number(i64::from(record.escalation_attempts)))
        }
        SortField::ResponseTimeMinutes => record.response_time_minutes.map(SortValue::Number),
        SortField::PatientName => Some(SortValue::Text(&record.patient_name)),
        SortField::ServiceName => Some(SortValue::Text(&record.service_name)),
        SortField::PractitionerName => Some(SortValue::Text(&record.practitioner_name)),
        SortField::Status => Some(SortValue::Text(record.status.as_str())),
    }
}

fn compare_values(a: Option<SortValue<'_>>, b: Option<SortValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(SortValue::Date(a)), Some(SortValue::Date(b))) => a.cmp(&b),
        (Some(SortValue::Number(a)), Some(SortValue::Number(b))) => a.cmp(&b),
        (Some(SortValue::Text(a)), Some(SortValue::Text(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Option<SortField>,
    pub descending: bool,
}

impl SortSpec {
    pub fn from_query(query: &ConfirmationQuery) -> Self {
        let field = match non_empty(query.sort_by.as_deref()) {
            Some(raw) => SortField::parse(raw),
            None => Some(SortField::AppointmentStart),
        };
        let descending = matches!(
            non_empty(query.sort_order.as_deref()).map(str::to_ascii_lowercase).as_deref(),
            Some("desc")
        );
        Self { field, descending }
    }

    /// Stable sort; values that cannot be compared keep their order.
    pub fn sort(&self, records: &mut [ConfirmationRequest]) {
        let Some(field) = self.field else {
            return;
        };
        records.sort_by(|a, b| {
            let ordering = compare_values(sort_value(a, field), sort_value(b, field));
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

// ==============================================================================
// STATISTICS
// ==============================================================================

pub fn compute_stats(records: &[ConfirmationRequest]) -> ConfirmationStats {
    let mut stats = ConfirmationStats {
        total: records.len(),
        ..ConfirmationStats::default()
    };

    let mut response_minutes_total = 0i64;
    let mut response_count = 0usize;

    for record in records {
        match record.status {
            ConfirmationStatus::Pending => stats.pending += 1,
            ConfirmationStatus::Confirmed => stats.confirmed += 1,
            ConfirmationStatus::Rescheduled => stats.rescheduled += 1,
            ConfirmationStatus::NoResponse => stats.no_response += 1,
            ConfirmationStatus::Cancelled => stats.cancelled += 1,
        }
        if record.escalation_level == EscalationLevel::Escalated {
            stats.escalated += 1;
        }
        if record.requires_follow_up {
            stats.requires_follow_up += 1;
        }
        if record.is_high_risk_unconfirmed() {
            stats.high_risk += 1;
        }
        if let Some(minutes) = record.response_time_minutes {
            response_minutes_total += minutes;
            response_count += 1;
        }
    }

    let responded = stats.confirmed + stats.rescheduled + stats.cancelled;
    stats.confirmation_rate = if responded > 0 {
        stats.confirmed as f64 / responded as f64 * 100.0
    } else {
        0.0
    };
    stats.average_response_time_minutes = if response_count > 0 {
        Some(response_minutes_total as f64 / response_count as f64)
    } else {
        None
    };

    stats
}

pub fn status_counts(records: &[ConfirmationRequest]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> = ConfirmationStatus::ALL
        .iter()
        .map(|status| (status.as_str(), 0))
        .collect();
    for record in records {
        *counts.entry(record.status.as_str()).or_insert(0) += 1;
    }
    counts
}
