use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_utils::ids::generate_id;
use shared_utils::{paginate, PageMeta, PageRequest};

use crate::error::ConfirmationError;
use crate::models::{
    ConfirmationQuery, ConfirmationRequest, ConfirmationStats, ConfirmationStatus,
    CreateConfirmationRequest, EscalationLevel, UpdateConfirmationRequest,
};
use crate::services::filters::{compute_stats, status_counts, ConfirmationFilter, SortSpec};
use crate::services::transitions::{apply_update, resolve_update, SYSTEM_ACTOR};

#[derive(Debug, Clone)]
pub struct ConfirmationPage {
    pub data: Vec<ConfirmationRequest>,
    pub meta: PageMeta,
    pub stats: ConfirmationStats,
    pub status_counts: BTreeMap<&'static str, usize>,
}

/// In-memory confirmation store. Every mutation holds the write lock for its
/// whole read-modify-write.
#[derive(Clone, Default)]
pub struct ConfirmationService {
    records: Arc<RwLock<Vec<ConfirmationRequest>>>,
}

impl ConfirmationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ConfirmationRequest>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn list(&self, query: &ConfirmationQuery) -> ConfirmationPage {
        let filter = ConfirmationFilter::from_query(query);
        let sort = SortSpec::from_query(query);
        let page_request = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

        let records = self.records.read().await;
        let mut matching: Vec<ConfirmationRequest> = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        let counts = status_counts(&records);
        drop(records);

        sort.sort(&mut matching);
        let stats = compute_stats(&matching);
        let (data, meta) = paginate(matching, page_request);

        debug!(
            "Listed {} of {} matching confirmations (page {})",
            data.len(),
            meta.total,
            meta.page
        );

        ConfirmationPage {
            data,
            meta,
            stats,
            status_counts: counts,
        }
    }

    /// Latest-created confirmation for the appointment.
    pub async fn get(
        &self,
        appointment_id: &str,
    ) -> Result<ConfirmationRequest, ConfirmationError> {
        let records = self.records.read().await;
        records
            .iter()
            .rev()
            .find(|record| record.appointment_id == appointment_id)
            .cloned()
            .ok_or_else(|| ConfirmationError::NotFound(appointment_id.to_string()))
    }

    pub async fn create(
        &self,
        request: CreateConfirmationRequest,
    ) -> Result<ConfirmationRequest, ConfirmationError> {
        let fields = RequiredFields::extract(&request)?;

        if fields.appointment_end < fields.appointment_start {
            return Err(ConfirmationError::InvalidTimeRange);
        }

        let mut records = self.records.write().await;

        let has_pending = records.iter().any(|record| {
            record.appointment_id == fields.appointment_id
                && record.status == ConfirmationStatus::Pending
        });
        if has_pending {
            warn!(
                "Rejected duplicate confirmation for appointment {}",
                fields.appointment_id
            );
            return Err(ConfirmationError::DuplicatePending(fields.appointment_id));
        }

        let now = Utc::now();
        let actor = request
            .created_by
            .clone()
            .unwrap_or_else(|| SYSTEM_ACTOR.to_string());

        let confirmation = ConfirmationRequest {
            id: generate_id("conf"),
            appointment_id: fields.appointment_id,
            patient_id: fields.patient_id,
            patient_name: fields.patient_name,
            patient_phone: fields.patient_phone,
            patient_email: request.patient_email,
            service_name: fields.service_name,
            practitioner_id: fields.practitioner_id,
            practitioner_name: fields.practitioner_name,
            appointment_start: fields.appointment_start,
            appointment_end: fields.appointment_end,
            status: ConfirmationStatus::Pending,
            primary_channel: request.primary_channel.unwrap_or_default(),
            secondary_channels: request.secondary_channels,
            no_show_risk: request.no_show_risk.unwrap_or_default(),
            escalation_level: EscalationLevel::None,
            escalation_attempts: 0,
            last_escalation_at: None,
            escalation_reason: None,
            sent_at: Some(now),
            responded_at: None,
            response_time_minutes: None,
            response_notes: None,
            requires_follow_up: false,
            follow_up_action: None,
            follow_up_scheduled_at: None,
            created_at: now,
            updated_at: now,
            created_by: actor.clone(),
            updated_by: actor,
        };

        info!(
            "Created confirmation {} for appointment {}",
            confirmation.id, confirmation.appointment_id
        );
        records.push(confirmation.clone());

        Ok(confirmation)
    }

    pub async fn update(
        &self,
        appointment_id: &str,
        request: UpdateConfirmationRequest,
    ) -> Result<ConfirmationRequest, ConfirmationError> {
        let update = resolve_update(&request)?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .rev()
            .find(|record| record.appointment_id == appointment_id)
            .ok_or_else(|| ConfirmationError::NotFound(appointment_id.to_string()))?;

        let previous = record.status;
        apply_update(record, update, &request, Utc::now());

        info!(
            "Applied {:?} to confirmation {} ({} -> {}, escalation {} after {} attempts)",
            update,
            record.id,
            previous,
            record.status,
            record.escalation_level,
            record.escalation_attempts
        );

        Ok(record.clone())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

struct RequiredFields {
    appointment_id: String,
    patient_id: String,
    patient_name: String,
    patient_phone: String,
    service_name: String,
    practitioner_id: String,
    practitioner_name: String,
    appointment_start: chrono::DateTime<Utc>,
    appointment_end: chrono::DateTime<Utc>,
}

impl RequiredFields {
    fn extract(request: &CreateConfirmationRequest) -> Result<Self, ConfirmationError> {
        let mut missing = Vec::new();

        let mut text = |name: &str, value: &Option<String>| -> String {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let appointment_id = text("appointmentId", &request.appointment_id);
        let patient_id = text("patientId", &request.patient_id);
        let patient_name = text("patientName", &request.patient_name);
        let patient_phone = text("patientPhone", &request.patient_phone);
        let service_name = text("serviceName", &request.service_name);
        let practitioner_id = text("practitionerId", &request.practitioner_id);
        let practitioner_name = text("practitionerName", &request.practitioner_name);

        if request.appointment_start.is_none() {
            missing.push("appointmentStart".to_string());
        }
        if request.appointment_end.is_none() {
            missing.push("appointmentEnd".to_string());
        }

        match (request.appointment_start, request.appointment_end) {
            (Some(appointment_start), Some(appointment_end)) if missing.is_empty() => Ok(Self {
                appointment_id,
                patient_id,
                patient_name,
                patient_phone,
                service_name,
                practitioner_id,
                practitioner_name,
                appointment_start,
                appointment_end,
            }),
            _ => Err(ConfirmationError::MissingFields(missing)),
        }
    }
}
