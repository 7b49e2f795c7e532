use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{KeywordClassification, PatientIntent, PatientSentiment};

pub const MAX_KEYWORDS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "have", "this", "that", "from", "what", "when", "where",
];

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("separator pattern is valid"));

/// Phrase rules, checked in order. The first rule with any phrase contained in
/// the lower-cased message decides the intent. Cancellation and rescheduling
/// come first: "reschedule" contains "schedule" and "change my appointment"
/// contains "my appointment".
const INTENT_RULES: &[(PatientIntent, &[&str])] = &[
    (PatientIntent::AppointmentCancellation, &["cancel"]),
    (
        PatientIntent::AppointmentRescheduling,
        &["reschedule", "change my appointment", "move my appointment"],
    ),
    (
        PatientIntent::AppointmentBooking,
        &["book", "schedule", "make an appointment", "want to come in"],
    ),
    (
        PatientIntent::AppointmentInquiry,
        &["my appointment", "when is", "what time"],
    ),
    (
        PatientIntent::PricingInquiry,
        &["price", "cost", "how much", "pricing"],
    ),
    (
        PatientIntent::LocationHours,
        &["location", "address", "where are", "hours", "open", "directions"],
    ),
    (
        PatientIntent::TreatmentQuestion,
        &["botox", "filler", "treatment", "procedure", "what is", "tell me about"],
    ),
    (
        PatientIntent::PostTreatmentFollowup,
        &["after my", "recovery", "healing", "how long until"],
    ),
    (
        PatientIntent::PreTreatmentQuestion,
        &["before my", "prepare", "what should i", "avoid"],
    ),
    (PatientIntent::Feedback, &["feedback", "review", "experience"]),
];

const FRUSTRATED_PHRASES: &[&str] = &["frustrated", "annoyed", "disappointed", "upset"];
const CONCERNED_PHRASES: &[&str] = &["worried", "concerned", "nervous", "anxious"];

fn contains_any(lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lower.contains(phrase))
}

pub fn detect_intent(message: &str) -> PatientIntent {
    let lower = message.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|(_, phrases)| contains_any(&lower, phrases))
        .map(|(intent, _)| *intent)
        .unwrap_or(PatientIntent::GeneralInquiry)
}

pub fn detect_sentiment(message: &str, classification: &KeywordClassification) -> PatientSentiment {
    if classification.is_positive {
        return PatientSentiment::Positive;
    }

    let lower = message.to_lowercase();
    if contains_any(&lower, FRUSTRATED_PHRASES) {
        PatientSentiment::Frustrated
    } else if contains_any(&lower, CONCERNED_PHRASES) {
        PatientSentiment::Concerned
    } else {
        PatientSentiment::Neutral
    }
}

pub fn suggested_actions(intent: PatientIntent) -> &'static [&'static str] {
    match intent {
        PatientIntent::AppointmentBooking => {
            &["Book Appointment", "View Services", "Check Availability"]
        }
        PatientIntent::AppointmentInquiry => &["View My Appointments", "Confirm Appointment"],
        PatientIntent::AppointmentCancellation => &["Cancel Appointment", "Reschedule Instead"],
        PatientIntent::AppointmentRescheduling => &["Reschedule Appointment", "View Availability"],
        PatientIntent::TreatmentQuestion => &["View Treatments", "Book Consultation"],
        PatientIntent::PostTreatmentFollowup => &["View Aftercare", "Speak to Nurse"],
        PatientIntent::SideEffectReport => &["Speak to Nurse", "Call Office Now", "View Aftercare"],
        PatientIntent::PreTreatmentQuestion => &["View Pre-Care Instructions", "Speak to Staff"],
        PatientIntent::PricingInquiry => &["View Pricing", "Book Consultation", "View Packages"],
        PatientIntent::LocationHours => &["Get Directions", "Call Office", "Book Appointment"],
        PatientIntent::GeneralInquiry => &["Speak to Staff", "View FAQ"],
        PatientIntent::Feedback => &["Leave Review", "Contact Management"],
        PatientIntent::EmergencyMedical => &["Call 911", "Go to ER", "Call Emergency Line"],
        PatientIntent::UrgentConcern => &["Call Nurse Line", "Speak to Staff"],
    }
}

/// Lower-cased words longer than three characters, stop words removed,
/// first occurrence order, at most `MAX_KEYWORDS`.
pub fn extract_keywords(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let mut seen = HashSet::new();

    WORD_SEPARATOR
        .split(lower.trim())
        .filter(|word| word.chars().count() > 3 && !STOP_WORDS.contains(word))
        .filter(|word| seen.insert(*word))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_wins_over_later_rules() {
        assert_eq!(
            detect_intent("Can I book a botox appointment?"),
            PatientIntent::AppointmentBooking
        );
    }

    #[test]
    fn rescheduling_is_not_swallowed_by_booking_or_inquiry() {
        assert_eq!(
            detect_intent("I need to reschedule"),
            PatientIntent::AppointmentRescheduling
        );
        assert_eq!(
            detect_intent("Can I change my appointment to Friday?"),
            PatientIntent::AppointmentRescheduling
        );
        assert_eq!(
            detect_intent("Can I schedule a facial?"),
            PatientIntent::AppointmentBooking
        );
    }

    #[test]
    fn unmatched_message_is_general() {
        assert_eq!(detect_intent("hello there"), PatientIntent::GeneralInquiry);
    }
}
