use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_utils::ids::generate_id;
use shared_utils::query::non_empty;

use crate::error::ChatError;
use crate::models::{
    ChatMessageRequest, ChatResponse, KeywordClassification, PatientIntent, PatientSentiment,
    UrgencyLevel,
};
use crate::services::classifier::KeywordClassifier;
use crate::services::intents::{
    detect_intent, detect_sentiment, extract_keywords, suggested_actions,
};
use crate::services::responses::ResponseTemplates;

pub const EMERGENCY_CONFIDENCE: f64 = 1.0;
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Deterministic patient support assistant: keyword pre-filter, then intent
/// rules and canned replies.
#[derive(Debug, Clone)]
pub struct PatientAssistant {
    classifier: KeywordClassifier,
    templates: ResponseTemplates,
}

impl PatientAssistant {
    pub fn new(classifier: KeywordClassifier, templates: ResponseTemplates) -> Self {
        Self {
            classifier,
            templates,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            KeywordClassifier::default(),
            ResponseTemplates::new(config.clinic_name.clone(), config.nurse_line_phone.clone()),
        )
    }

    pub fn classify(&self, message: Option<&str>) -> Result<KeywordClassification, ChatError> {
        let message = require_message(message)?;
        let classification = self.classifier.classify(message);
        debug!(
            "Classified message as {:?} ({} keywords)",
            classification.category,
            classification.matched_keywords.len()
        );
        Ok(classification)
    }

    pub fn respond(&self, request: &ChatMessageRequest) -> Result<ChatResponse, ChatError> {
        let message = require_message(request.message.as_deref())?;
        let classification = self.classifier.classify(message);

        let (intent, response, sentiment, confidence) = if classification.is_emergency {
            (
                PatientIntent::EmergencyMedical,
                self.templates.emergency(),
                PatientSentiment::Urgent,
                EMERGENCY_CONFIDENCE,
            )
        } else if classification.is_complication {
            (
                PatientIntent::SideEffectReport,
                self.templates.complication(&classification.matched_keywords),
                PatientSentiment::Concerned,
                DEFAULT_CONFIDENCE,
            )
        } else {
            let intent = detect_intent(message);
            let sentiment = detect_sentiment(message, &classification);
            let reply = self.templates.reply(intent);
            let reply = self.templates.adjust_for_sentiment(
                reply,
                sentiment,
                non_empty(request.patient_name.as_deref()),
            );
            (intent, reply, sentiment, DEFAULT_CONFIDENCE)
        };

        let urgency = urgency_for(intent);
        let escalate = urgency >= UrgencyLevel::High;
        if escalate {
            warn!(
                "Escalating chat message: {:?} with urgency {:?}",
                intent, urgency
            );
        }

        Ok(ChatResponse {
            conversation_id: non_empty(request.conversation_id.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| generate_id("conv")),
            intent,
            response,
            urgency,
            sentiment,
            suggested_actions: suggested_actions(intent)
                .iter()
                .map(|action| action.to_string())
                .collect(),
            escalate,
            confidence,
            classification,
            keywords: extract_keywords(message),
        })
    }
}

fn require_message(message: Option<&str>) -> Result<&str, ChatError> {
    non_empty(message).ok_or(ChatError::EmptyMessage)
}

pub fn urgency_for(intent: PatientIntent) -> UrgencyLevel {
    match intent {
        PatientIntent::EmergencyMedical => UrgencyLevel::Critical,
        PatientIntent::SideEffectReport | PatientIntent::UrgentConcern => UrgencyLevel::High,
        PatientIntent::AppointmentCancellation
        | PatientIntent::AppointmentRescheduling
        | PatientIntent::PostTreatmentFollowup => UrgencyLevel::Low,
        _ => UrgencyLevel::None,
    }
}
