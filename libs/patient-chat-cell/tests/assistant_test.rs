use assert_matches::assert_matches;

use patient_chat_cell::services::classifier::{EMERGENCY_KEYWORDS, POSITIVE_KEYWORDS};
use patient_chat_cell::services::intents::{extract_keywords, MAX_KEYWORDS};
use patient_chat_cell::services::{KeywordClassifier, PatientAssistant, ResponseTemplates};
use patient_chat_cell::*;

fn assistant() -> PatientAssistant {
    PatientAssistant::new(
        KeywordClassifier::default(),
        ResponseTemplates::new("Glow Clinic", "(555) 222-3333"),
    )
}

fn message(text: &str) -> ChatMessageRequest {
    ChatMessageRequest {
        message: Some(text.to_string()),
        ..Default::default()
    }
}

// ==============================================================================
// CLASSIFIER
// ==============================================================================

#[test]
fn test_chest_pain_and_swelling_is_emergency() {
    let result = KeywordClassifier::default().classify("chest pain and swelling");

    assert_eq!(result.category, MessageCategory::Emergency);
    assert!(result.is_emergency);
    assert!(!result.is_complication);
    assert!(result.matched_keywords.contains(&"chest pain".to_string()));
    assert!(!result.matched_keywords.contains(&"swelling".to_string()));
}

#[test]
fn test_emergency_keywords_win_over_everything_else() {
    let classifier = KeywordClassifier::default();

    for keyword in EMERGENCY_KEYWORDS {
        let text = format!("Love the results, some bruising, and also {}", keyword.to_uppercase());
        let result = classifier.classify(&text);
        assert!(result.is_emergency, "'{}' should be an emergency", keyword);
        assert!(result.matched_keywords.contains(&keyword.to_string()));
    }
}

#[test]
fn test_complication_beats_positive() {
    let result = KeywordClassifier::default().classify("Thank you! Just some bruising and redness");

    assert_eq!(result.category, MessageCategory::Complication);
    assert_eq!(
        result.matched_keywords,
        vec!["bruising".to_string(), "redness".to_string()]
    );
}

#[test]
fn test_positive_and_neutral_messages() {
    let classifier = KeywordClassifier::default();

    let positive = classifier.classify("I love my lips, thank you so much");
    assert!(positive.is_positive);
    assert_eq!(
        positive.matched_keywords,
        vec!["love".to_string(), "thank you".to_string()]
    );

    let neutral = classifier.classify("Are you open on Saturday?");
    assert_eq!(neutral.category, MessageCategory::Neutral);
    assert!(neutral.matched_keywords.is_empty());
    assert!(!neutral.is_emergency && !neutral.is_complication && !neutral.is_positive);
}

#[test]
fn test_every_positive_keyword_is_detected() {
    let classifier = KeywordClassifier::default();
    for keyword in POSITIVE_KEYWORDS {
        assert!(classifier.classify(keyword).is_positive, "{}", keyword);
    }
}

// ==============================================================================
// RESPONSE GENERATOR
// ==============================================================================

#[test]
fn test_emergency_response_escalates_with_critical_urgency() {
    let response = assistant()
        .respond(&message("I can't breathe after my filler"))
        .unwrap();

    assert_eq!(response.intent, PatientIntent::EmergencyMedical);
    assert_eq!(response.urgency, UrgencyLevel::Critical);
    assert_eq!(response.sentiment, PatientSentiment::Urgent);
    assert!(response.escalate);
    assert_eq!(response.confidence, 1.0);
    assert_eq!(response.suggested_actions[0], "Call 911");
    assert!(response.response.contains("911"));
}

#[test]
fn test_complication_response_names_symptoms() {
    let response = assistant()
        .respond(&message("There is a small lump near my lip"))
        .unwrap();

    assert_eq!(response.intent, PatientIntent::SideEffectReport);
    assert_eq!(response.urgency, UrgencyLevel::High);
    assert_eq!(response.sentiment, PatientSentiment::Concerned);
    assert!(response.escalate);
    assert!(response.response.contains("lump"));
    assert!(response.response.contains("(555) 222-3333"));
    assert!(response.suggested_actions.contains(&"Speak to Nurse".to_string()));
}

#[test]
fn test_routine_intents_do_not_escalate() {
    let cases = [
        ("Can I book a Botox appointment?", PatientIntent::AppointmentBooking, UrgencyLevel::None),
        ("What time is my appointment?", PatientIntent::AppointmentInquiry, UrgencyLevel::None),
        ("I need to cancel tomorrow", PatientIntent::AppointmentCancellation, UrgencyLevel::Low),
        ("I need to reschedule", PatientIntent::AppointmentRescheduling, UrgencyLevel::Low),
        (
            "Can I change my appointment to Friday?",
            PatientIntent::AppointmentRescheduling,
            UrgencyLevel::Low,
        ),
        ("How much are lip fillers?", PatientIntent::PricingInquiry, UrgencyLevel::None),
        ("What is your address?", PatientIntent::LocationHours, UrgencyLevel::None),
        ("Tell me about microneedling", PatientIntent::TreatmentQuestion, UrgencyLevel::None),
        ("How is recovery going to be?", PatientIntent::PostTreatmentFollowup, UrgencyLevel::Low),
        ("Should I avoid alcohol?", PatientIntent::PreTreatmentQuestion, UrgencyLevel::None),
        ("I'd like to leave some feedback", PatientIntent::Feedback, UrgencyLevel::None),
        ("hello", PatientIntent::GeneralInquiry, UrgencyLevel::None),
    ];

    for (text, intent, urgency) in cases {
        let response = assistant().respond(&message(text)).unwrap();
        assert_eq!(response.intent, intent, "{}", text);
        assert_eq!(response.urgency, urgency, "{}", text);
        assert!(!response.escalate, "{}", text);
        assert_eq!(response.confidence, 0.9);
        assert!(!response.suggested_actions.is_empty());
    }
}

#[test]
fn test_location_reply_uses_clinic_details() {
    let response = assistant().respond(&message("What are your hours?")).unwrap();

    assert!(response.response.starts_with("Glow Clinic is open"));
    assert!(response.response.contains("(555) 222-3333"));
}

#[test]
fn test_sentiment_prefixes() {
    let frustrated = ChatMessageRequest {
        message: Some("I'm frustrated and need to cancel".to_string()),
        patient_name: Some("Nora".to_string()),
        ..Default::default()
    };
    let response = assistant().respond(&frustrated).unwrap();
    assert_eq!(response.sentiment, PatientSentiment::Frustrated);
    assert!(response.response.starts_with("Nora, I apologize"));

    let anonymous = assistant()
        .respond(&message("I'm frustrated and need to cancel"))
        .unwrap();
    assert!(anonymous.response.starts_with("I understand you need to cancel"));

    let concerned = assistant()
        .respond(&message("I'm nervous about my filler"))
        .unwrap();
    assert_eq!(concerned.sentiment, PatientSentiment::Concerned);
    assert!(concerned.response.starts_with("I understand your concerns"));

    let positive = assistant().respond(&message("Best spa ever")).unwrap();
    assert_eq!(positive.sentiment, PatientSentiment::Positive);
    assert_eq!(positive.classification.category, MessageCategory::Positive);
}

#[test]
fn test_conversation_id_is_echoed_or_generated() {
    let request = ChatMessageRequest {
        message: Some("hello".to_string()),
        conversation_id: Some("conv-42".to_string()),
        ..Default::default()
    };
    assert_eq!(assistant().respond(&request).unwrap().conversation_id, "conv-42");

    let generated = assistant().respond(&message("hello")).unwrap();
    assert!(generated.conversation_id.starts_with("conv-"));
}

#[test]
fn test_empty_messages_are_rejected() {
    let assistant = assistant();

    assert_matches!(
        assistant.respond(&ChatMessageRequest::default()),
        Err(ChatError::EmptyMessage)
    );
    assert_matches!(assistant.respond(&message("   ")), Err(ChatError::EmptyMessage));
    assert_matches!(assistant.classify(Some("")), Err(ChatError::EmptyMessage));
}

// ==============================================================================
// KEYWORD EXTRACTION
// ==============================================================================

#[test]
fn test_keywords_drop_short_and_stop_words() {
    let keywords =
        extract_keywords("Where are you located and what are your hours for Botox this weekend");

    assert_eq!(keywords, vec!["located", "your", "hours", "botox", "weekend"]);
}

#[test]
fn test_keywords_are_unique_and_capped() {
    let keywords = extract_keywords(
        "alpha alpha bravo charlie delta echoes foxtrot golfing hotel india juliet kilo lima mike",
    );

    assert_eq!(keywords.len(), MAX_KEYWORDS);
    assert_eq!(keywords[0], "alpha");
    assert_eq!(keywords[1], "bravo");
    assert!(!keywords.contains(&"kilo".to_string()));
}
