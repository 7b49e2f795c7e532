// =====================================================================================
// EMERGENCY / COMPLICATION KEYWORD CLASSIFIER
// =====================================================================================
//
// Case-insensitive literal substring matching against three static lists.
// The first category with a hit wins: emergency, then complication, then
// positive. No context beyond the single message is considered.

use crate::models::{KeywordClassification, MessageCategory};

pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency",
    "urgent",
    "911",
    "severe pain",
    "bleeding",
    "allergic reaction",
    "cant breathe",
    "can't breathe",
    "cannot breathe",
    "chest pain",
    "infection",
    "swelling face",
    "vision loss",
    "numbness",
    "fever",
    "seizure",
    "unconscious",
];

pub const COMPLICATION_KEYWORDS: &[&str] = &[
    "bruising",
    "swelling",
    "pain",
    "redness",
    "bump",
    "lump",
    "asymmetry",
    "drooping",
    "migration",
    "hard spot",
    "infection signs",
    "yellow discharge",
    "excessive bleeding",
    "blistering",
];

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "love",
    "amazing",
    "perfect",
    "excellent",
    "wonderful",
    "fantastic",
    "great results",
    "so happy",
    "thank you",
    "best",
    "recommend",
];

#[derive(Debug, Clone, Copy)]
pub struct KeywordClassifier {
    emergency: &'static [&'static str],
    complication: &'static [&'static str],
    positive: &'static [&'static str],
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(EMERGENCY_KEYWORDS, COMPLICATION_KEYWORDS, POSITIVE_KEYWORDS)
    }
}

impl KeywordClassifier {
    /// Keyword lists are expected in lower case.
    pub fn new(
        emergency: &'static [&'static str],
        complication: &'static [&'static str],
        positive: &'static [&'static str],
    ) -> Self {
        Self {
            emergency,
            complication,
            positive,
        }
    }

    pub fn classify(&self, message: &str) -> KeywordClassification {
        let lower = message.to_lowercase();

        let tiers = [
            (MessageCategory::Emergency, self.emergency),
            (MessageCategory::Complication, self.complication),
            (MessageCategory::Positive, self.positive),
        ];

        for (category, keywords) in tiers {
            let matched = matches(&lower, keywords);
            if !matched.is_empty() {
                return KeywordClassification::new(category, matched);
            }
        }

        KeywordClassification::new(MessageCategory::Neutral, Vec::new())
    }
}

fn matches(lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        let result = KeywordClassifier::default().classify("I LOVE my results");
        assert_eq!(result.category, MessageCategory::Positive);
        assert_eq!(result.matched_keywords, vec!["love".to_string()]);
    }

    #[test]
    fn custom_lists_are_honoured() {
        let classifier = KeywordClassifier::new(&["stroke"], &["itch"], &["yay"]);
        assert!(classifier.classify("slight itch").is_complication);
        assert!(!classifier.classify("chest pain").is_emergency);
    }
}
