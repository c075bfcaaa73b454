//! Question deduplication filter.
//!
//! Strips AI-generated question candidates that duplicate the static bank,
//! either exactly (after normalization) or by sharing a key phrase with
//! ground the bank already covers. The key-phrase rule is substring
//! containment against short phrases in both directions, which makes the
//! filter conservative and lossy: a legitimate distinct question that
//! happens to mention "treatment" is dropped too. Dropping a borderline
//! candidate beats showing the patient the same question twice, so keep it
//! broad.
//!
//! Filtering preserves input order and is idempotent; nothing is reordered,
//! only removed.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::bank;
use crate::models::Question;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Topics the standard questionnaire already covers. A candidate whose
/// normalized text contains one of these (or is contained by one) is
/// rejected as semantically duplicate.
pub const KEY_PHRASES: &[&str] = &[
    "medications",
    "medication",
    "supplements",
    "vitamins",
    "drugs",
    "allergies",
    "allergic",
    "allergy",
    "previous episodes",
    "experienced before",
    "similar symptoms",
    "treatment",
    "effective",
    "main concern",
    "concern about",
];

/// Lowercase, strip punctuation, collapse whitespace runs, trim.
pub fn normalize_question(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Anything that carries a question text can go through the filter.
pub trait QuestionText {
    fn question_text(&self) -> &str;
}

impl QuestionText for String {
    fn question_text(&self) -> &str {
        self
    }
}

impl QuestionText for &str {
    fn question_text(&self) -> &str {
        self
    }
}

impl QuestionText for Question {
    fn question_text(&self) -> &str {
        &self.text
    }
}

/// Duplicate detector built from a bank of known question texts.
#[derive(Debug, Clone)]
pub struct DuplicateFilter {
    normalized_bank: HashSet<String>,
    normalized_phrases: Vec<String>,
}

impl DuplicateFilter {
    pub fn new<I, S>(bank_texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            normalized_bank: bank_texts
                .into_iter()
                .map(|t| normalize_question(t.as_ref()))
                .collect(),
            normalized_phrases: KEY_PHRASES.iter().map(|p| normalize_question(p)).collect(),
        }
    }

    /// Filter against the built-in question bank.
    pub fn standard() -> Self {
        Self::new(bank::BANK_TEXTS.iter().copied())
    }

    /// Whether `text` duplicates the bank, exactly or by key phrase.
    pub fn is_duplicate(&self, text: &str) -> bool {
        let normalized = normalize_question(text);
        if self.normalized_bank.contains(&normalized) {
            return true;
        }
        self.normalized_phrases
            .iter()
            .any(|phrase| normalized.contains(phrase.as_str()) || phrase.contains(&normalized))
    }

    /// Remove duplicates from `candidates`, preserving the order of the
    /// survivors.
    pub fn filter<T: QuestionText>(&self, candidates: Vec<T>) -> Vec<T> {
        let original = candidates.len();
        let kept: Vec<T> = candidates
            .into_iter()
            .filter(|c| {
                let duplicate = self.is_duplicate(c.question_text());
                if duplicate {
                    tracing::debug!(question = c.question_text(), "filtered duplicate question");
                }
                !duplicate
            })
            .collect();
        let dropped = original - kept.len();
        if dropped > 0 {
            tracing::info!(dropped, kept = kept.len(), "deduplicated question candidates");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_case_punctuation_whitespace() {
        assert_eq!(
            normalize_question("  What   ALLERGIES do you have?! "),
            "what allergies do you have"
        );
    }

    #[test]
    fn exact_normalized_bank_entry_is_duplicate() {
        let filter = DuplicateFilter::standard();
        // Same bank entry without the question mark and with different case.
        assert!(filter.is_duplicate(
            "do you have any known allergies to medications, foods, or environmental factors"
        ));
    }

    #[test]
    fn key_phrase_containment_is_duplicate() {
        let filter = DuplicateFilter::standard();
        assert!(filter.is_duplicate("What allergies do you have?"));
        assert!(filter.is_duplicate("Which treatment helped the most?"));
    }

    #[test]
    fn unrelated_question_survives() {
        let filter = DuplicateFilter::standard();
        assert!(!filter.is_duplicate("Does the pain worsen when you climb stairs?"));
    }

    #[test]
    fn filter_preserves_order() {
        let filter = DuplicateFilter::standard();
        let kept = filter.filter(vec![
            "Does the pain radiate to your jaw?".to_string(),
            "What medications are you on?".to_string(),
            "When did the dizziness start?".to_string(),
        ]);
        assert_eq!(
            kept,
            vec![
                "Does the pain radiate to your jaw?".to_string(),
                "When did the dizziness start?".to_string(),
            ]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let filter = DuplicateFilter::standard();
        let input = vec![
            "Does the pain radiate to your jaw?".to_string(),
            "Do you take vitamins?".to_string(),
            "Is the cough worse at night?".to_string(),
        ];
        let once = filter.filter(input.clone());
        let twice = filter.filter(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn structured_questions_filter_by_text() {
        use crate::models::enums::QuestionType;
        let filter = DuplicateFilter::standard();
        let kept = filter.filter(vec![
            Question::new("a", "Are you allergic to pollen?", QuestionType::YesNo),
            Question::new("b", "Is the headache one-sided?", QuestionType::YesNo),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }
}
