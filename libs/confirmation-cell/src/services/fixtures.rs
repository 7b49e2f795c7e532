use chrono::{DateTime, Duration, Utc};

use crate::models::{
    ConfirmationRequest, ConfirmationStatus, ContactChannel, EscalationLevel, NoShowRisk,
};

struct Seed {
    appointment_id: &'static str,
    patient_id: &'static str,
    patient_name: &'static str,
    patient_phone: &'static str,
    patient_email: Option<&'static str>,
    service_name: &'static str,
    practitioner_id: &'static str,
    practitioner_name: &'static str,
    starts_in_hours: i64,
    duration_minutes: i64,
    status: ConfirmationStatus,
    primary_channel: ContactChannel,
    secondary_channels: &'static [ContactChannel],
    no_show_risk: NoShowRisk,
    escalation_attempts: u32,
    sent_hours_ago: i64,
    response_minutes: Option<i64>,
    follow_up_action: Option<&'static str>,
}

const SEEDS: &[Seed] = &[
    Seed {
        appointment_id: "apt-1001",
        patient_id: "p-001",
        patient_name: "Sarah Johnson",
        patient_phone: "(555) 201-3344",
        patient_email: Some("sarah.johnson@example.com"),
        service_name: "Botox - Forehead",
        practitioner_id: "prov-1",
        practitioner_name: "Dr. Emily Chen",
        starts_in_hours: 26,
        duration_minutes: 30,
        status: ConfirmationStatus::Confirmed,
        primary_channel: ContactChannel::Sms,
        secondary_channels: &[ContactChannel::Email],
        no_show_risk: NoShowRisk::Low,
        escalation_attempts: 0,
        sent_hours_ago: 20,
        response_minutes: Some(42),
        follow_up_action: None,
    },
    Seed {
        appointment_id: "apt-1002",
        patient_id: "p-002",
        patient_name: "Michael Rivera",
        patient_phone: "(555) 318-7721",
        patient_email: Some("m.rivera@example.com"),
        service_name: "Dermal Filler - Lips",
        practitioner_id: "prov-2",
        practitioner_name: "Jessica Moore, NP",
        starts_in_hours: 20,
        duration_minutes: 45,
        status: ConfirmationStatus::Pending,
        primary_channel: ContactChannel::Sms,
        secondary_channels: &[],
        no_show_risk: NoShowRisk::High,
        escalation_attempts: 1,
        sent_hours_ago: 30,
        response_minutes: None,
        follow_up_action: None,
    },
    Seed {
        appointment_id: "apt-1003",
        patient_id: "p-003",
        patient_name: "Olivia Brooks",
        patient_phone: "(555) 447-0192",
        patient_email: None,
        service_name: "HydraFacial",
        practitioner_id: "prov-3",
        practitioner_name: "Amanda Lee, LE",
        starts_in_hours: 8,
        duration_minutes: 60,
        status: ConfirmationStatus::Pending,
        primary_channel: ContactChannel::Phone,
        secondary_channels: &[ContactChannel::Sms],
        no_show_risk: NoShowRisk::High,
        escalation_attempts: 2,
        sent_hours_ago: 48,
        response_minutes: None,
        follow_up_action: Some("Call patient before end of day"),
    },
    Seed {
        appointment_id: "apt-1004",
        patient_id: "p-004",
        patient_name: "Daniel Kim",
        patient_phone: "(555) 590-6630",
        patient_email: Some("dkim@example.com"),
        service_name: "Microneedling",
        practitioner_id: "prov-1",
        practitioner_name: "Dr. Emily Chen",
        starts_in_hours: 50,
        duration_minutes: 60,
        status: ConfirmationStatus::Rescheduled,
        primary_channel: ContactChannel::Email,
        secondary_channels: &[],
        no_show_risk: NoShowRisk::Medium,
        escalation_attempts: 0,
        sent_hours_ago: 12,
        response_minutes: Some(95),
        follow_up_action: Some("Confirm new appointment time"),
    },
    Seed {
        appointment_id: "apt-1005",
        patient_id: "p-005",
        patient_name: "Priya Patel",
        patient_phone: "(555) 633-2087",
        patient_email: Some("priya.patel@example.com"),
        service_name: "Chemical Peel",
        practitioner_id: "prov-3",
        practitioner_name: "Amanda Lee, LE",
        starts_in_hours: 32,
        duration_minutes: 45,
        status: ConfirmationStatus::Cancelled,
        primary_channel: ContactChannel::Sms,
        secondary_channels: &[ContactChannel::Push],
        no_show_risk: NoShowRisk::Medium,
        escalation_attempts: 0,
        sent_hours_ago: 18,
        response_minutes: Some(12),
        follow_up_action: Some("Follow up on rescheduling"),
    },
    Seed {
        appointment_id: "apt-1006",
        patient_id: "p-006",
        patient_name: "Grace Thompson",
        patient_phone: "(555) 712-9004",
        patient_email: None,
        service_name: "Botox - Crow's Feet",
        practitioner_id: "prov-2",
        practitioner_name: "Jessica Moore, NP",
        starts_in_hours: 4,
        duration_minutes: 30,
        status: ConfirmationStatus::NoResponse,
        primary_channel: ContactChannel::Sms,
        secondary_channels: &[ContactChannel::Phone],
        no_show_risk: NoShowRisk::High,
        escalation_attempts: 3,
        sent_hours_ago: 52,
        response_minutes: None,
        follow_up_action: Some("Call patient before end of day"),
    },
    Seed {
        appointment_id: "apt-1007",
        patient_id: "p-007",
        patient_name: "Ethan Walker",
        patient_phone: "(555) 804-1156",
        patient_email: Some("ethan.walker@example.com"),
        service_name: "Laser Hair Removal",
        practitioner_id: "prov-4",
        practitioner_name: "Dr. Marcus Bell",
        starts_in_hours: 72,
        duration_minutes: 30,
        status: ConfirmationStatus::Pending,
        primary_channel: ContactChannel::Email,
        secondary_channels: &[],
        no_show_risk: NoShowRisk::Low,
        escalation_attempts: 0,
        sent_hours_ago: 2,
        response_minutes: None,
        follow_up_action: None,
    },
    Seed {
        appointment_id: "apt-1008",
        patient_id: "p-001",
        patient_name: "Sarah Johnson",
        patient_phone: "(555) 201-3344",
        patient_email: Some("sarah.johnson@example.com"),
        service_name: "Follow-up Consultation",
        practitioner_id: "prov-1",
        practitioner_name: "Dr. Emily Chen",
        starts_in_hours: 340,
        duration_minutes: 15,
        status: ConfirmationStatus::Confirmed,
        primary_channel: ContactChannel::Push,
        secondary_channels: &[ContactChannel::Sms],
        no_show_risk: NoShowRisk::Low,
        escalation_attempts: 0,
        sent_hours_ago: 6,
        response_minutes: Some(3),
        follow_up_action: None,
    },
];

/// Mock confirmations laid out around `now`, covering every status.
pub fn seed_confirmations(now: DateTime<Utc>) -> Vec<ConfirmationRequest> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let appointment_start = now + Duration::hours(seed.starts_in_hours);
            let sent_at = now - Duration::hours(seed.sent_hours_ago);
            let responded_at = seed
                .response_minutes
                .map(|minutes| sent_at + Duration::minutes(minutes));
            let escalation_level = if seed.status == ConfirmationStatus::Confirmed {
                EscalationLevel::None
            } else {
                EscalationLevel::for_attempts(seed.escalation_attempts)
            };

            ConfirmationRequest {
                id: format!("conf-{:03}", index + 1),
                appointment_id: seed.appointment_id.to_string(),
                patient_id: seed.patient_id.to_string(),
                patient_name: seed.patient_name.to_string(),
                patient_phone: seed.patient_phone.to_string(),
                patient_email: seed.patient_email.map(str::to_string),
                service_name: seed.service_name.to_string(),
                practitioner_id: seed.practitioner_id.to_string(),
                practitioner_name: seed.practitioner_name.to_string(),
                appointment_start,
                appointment_end: appointment_start + Duration::minutes(seed.duration_minutes),
                status: seed.status,
                primary_channel: seed.primary_channel,
                secondary_channels: seed.secondary_channels.to_vec(),
                no_show_risk: seed.no_show_risk,
                escalation_level,
                escalation_attempts: seed.escalation_attempts,
                last_escalation_at: (seed.escalation_attempts > 0)
                    .then(|| now - Duration::hours(1)),
                escalation_reason: (seed.escalation_attempts > 0)
                    .then(|| "No response to confirmation request".to_string()),
                sent_at: Some(sent_at),
                responded_at,
                response_time_minutes: seed.response_minutes,
                response_notes: None,
                requires_follow_up: seed.follow_up_action.is_some(),
                follow_up_action: seed.follow_up_action.map(str::to_string),
                follow_up_scheduled_at: None,
                created_at: sent_at,
                updated_at: responded_at.unwrap_or(sent_at),
                created_by: "system".to_string(),
                updated_by: "system".to_string(),
            }
        })
        .collect()
}
