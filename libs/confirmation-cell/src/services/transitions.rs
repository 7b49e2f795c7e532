use chrono::{DateTime, Utc};

use crate::error::ConfirmationError;
use crate::models::{
    ConfirmationAction, ConfirmationRequest, ConfirmationStatus, EscalationLevel,
    UpdateConfirmationRequest,
};

pub const DEFAULT_RESCHEDULE_FOLLOW_UP: &str = "Confirm new appointment time";
pub const DEFAULT_CANCELLATION_FOLLOW_UP: &str = "Follow up on rescheduling";
pub const SYSTEM_ACTOR: &str = "system";

/// What a `PUT` body asks for once `action` and `status` are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Apply(ConfirmationAction),
    SetStatus(ConfirmationStatus),
}

/// An explicit `action` wins. Without one, a response status
/// (`confirmed`, `rescheduled`, `cancelled`) is treated as that action and
/// the remaining statuses are written as-is.
pub fn resolve_update(
    request: &UpdateConfirmationRequest,
) -> Result<StatusUpdate, ConfirmationError> {
    let status = request
        .status
        .as_deref()
        .map(str::parse::<ConfirmationStatus>)
        .transpose()?;

    if let Some(action) = request.action.as_deref() {
        return Ok(StatusUpdate::Apply(action.parse()?));
    }

    match status {
        Some(ConfirmationStatus::Confirmed) => {
            Ok(StatusUpdate::Apply(ConfirmationAction::Confirmed))
        }
        Some(ConfirmationStatus::Rescheduled) => {
            Ok(StatusUpdate::Apply(ConfirmationAction::Rescheduled))
        }
        Some(ConfirmationStatus::Cancelled) => {
            Ok(StatusUpdate::Apply(ConfirmationAction::Cancelled))
        }
        Some(other) => Ok(StatusUpdate::SetStatus(other)),
        None => Err(ConfirmationError::MissingAction),
    }
}

/// Applies `update` to `record` in place. Any action is accepted from any
/// status.
pub fn apply_update(
    record: &mut ConfirmationRequest,
    update: StatusUpdate,
    request: &UpdateConfirmationRequest,
    now: DateTime<Utc>,
) {
    match update {
        StatusUpdate::Apply(action) => apply_action(record, action, request, now),
        StatusUpdate::SetStatus(status) => record.status = status,
    }

    if let Some(notes) = &request.response_notes {
        record.response_notes = Some(notes.clone());
    }
    record.updated_at = now;
    record.updated_by = request
        .updated_by
        .clone()
        .unwrap_or_else(|| SYSTEM_ACTOR.to_string());
}

fn apply_action(
    record: &mut ConfirmationRequest,
    action: ConfirmationAction,
    request: &UpdateConfirmationRequest,
    now: DateTime<Utc>,
) {
    match action {
        ConfirmationAction::Confirmed => {
            record_response(record, ConfirmationStatus::Confirmed, now);
            record.escalation_level = EscalationLevel::None;
            record.requires_follow_up = false;
        }
        ConfirmationAction::Rescheduled => {
            record_response(record, ConfirmationStatus::Rescheduled, now);
            raise_follow_up(record, request, DEFAULT_RESCHEDULE_FOLLOW_UP);
        }
        ConfirmationAction::Cancelled => {
            record_response(record, ConfirmationStatus::Cancelled, now);
            raise_follow_up(record, request, DEFAULT_CANCELLATION_FOLLOW_UP);
        }
        ConfirmationAction::Escalate => {
            record.escalation_attempts = record.escalation_attempts.saturating_add(1);
            record.escalation_level = EscalationLevel::for_attempts(record.escalation_attempts);
            record.last_escalation_at = Some(now);
            if let Some(reason) = &request.escalation_reason {
                record.escalation_reason = Some(reason.clone());
            }
            if record.escalation_level == EscalationLevel::Escalated {
                record.requires_follow_up = true;
                if let Some(action) = &request.follow_up_action {
                    record.follow_up_action = Some(action.clone());
                }
                if let Some(at) = request.follow_up_scheduled_at {
                    record.follow_up_scheduled_at = Some(at);
                }
            }
        }
        ConfirmationAction::MarkFollowedUp => {
            record.requires_follow_up = false;
            record.follow_up_scheduled_at = None;
        }
    }
}

fn record_response(
    record: &mut ConfirmationRequest,
    status: ConfirmationStatus,
    now: DateTime<Utc>,
) {
    record.status = status;
    record.responded_at = Some(now);
    record.response_time_minutes = record
        .sent_at
        .map(|sent| (now - sent).num_minutes());
}

fn raise_follow_up(
    record: &mut ConfirmationRequest,
    request: &UpdateConfirmationRequest,
    default_action: &str,
) {
    record.requires_follow_up = true;
    record.follow_up_action = Some(
        request
            .follow_up_action
            .clone()
            .unwrap_or_else(|| default_action.to_string()),
    );
    if let Some(at) = request.follow_up_scheduled_at {
        record.follow_up_scheduled_at = Some(at);
    }
}
