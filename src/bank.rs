//! The static question bank: default questions every patient answers, and
//! symptom-keyed follow-up sets. Texts are fixed at compile time; the dedup
//! filter treats them as the authority on what is already covered.

use crate::models::enums::QuestionType;
use crate::models::Question;

/// Question texts every patient sees regardless of presentation. The dedup
/// filter uses these to reject AI candidates that re-ask covered ground.
pub const BANK_TEXTS: &[&str] = &[
    "Are you currently taking any medications (including over-the-counter drugs, vitamins, or supplements)?",
    "Please list all medications you are currently taking:",
    "Do you have any known allergies to medications, foods, or environmental factors?",
    "Please describe your allergies and reactions:",
    "Have you experienced similar symptoms before?",
    "What treatment did you receive previously and was it effective?",
    "What is your main concern about these symptoms?",
];

/// Default questions everyone gets, with their conditional follow-ups.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new("medications", BANK_TEXTS[0], QuestionType::YesNo)
            .required()
            .reveals("Yes", ["medication_list"]),
        Question::new("medication_list", BANK_TEXTS[1], QuestionType::Text).required(),
        Question::new("allergies", BANK_TEXTS[2], QuestionType::YesNo)
            .required()
            .reveals("Yes", ["allergy_list"]),
        Question::new("allergy_list", BANK_TEXTS[3], QuestionType::Text).required(),
        Question::new("previous_episodes", BANK_TEXTS[4], QuestionType::YesNo)
            .required()
            .reveals("Yes", ["previous_treatment"]),
        Question::new("previous_treatment", BANK_TEXTS[5], QuestionType::Text).required(),
        Question::new("main_concern", BANK_TEXTS[6], QuestionType::Text).required(),
    ]
}

/// Symptom-specific question sets, keyed by catalog entry.
pub fn symptom_questions(symptom_type: &str) -> Vec<Question> {
    match symptom_type.to_lowercase().as_str() {
        "headache" => vec![
            Question::new(
                "headache_worst",
                "Is this the worst headache you have ever experienced?",
                QuestionType::YesNo,
            )
            .required()
            .reveals("Yes", ["headache_emergency"]),
            Question::new(
                "headache_emergency",
                "Do you have neck stiffness, fever, sensitivity to light, vision changes, or confusion?",
                QuestionType::Multiselect,
            )
            .required()
            .with_options([
                "Neck stiffness",
                "Fever",
                "Sensitivity to light",
                "Vision changes",
                "Confusion",
                "None",
            ]),
            Question::new(
                "headache_triggers",
                "What triggers your headaches?",
                QuestionType::Multiselect,
            )
            .required()
            .with_options([
                "Stress",
                "Lack of sleep",
                "Certain foods",
                "Bright lights",
                "Weather changes",
                "Unknown",
            ]),
            Question::new(
                "headache_location",
                "Where is the headache located?",
                QuestionType::Select,
            )
            .required()
            .with_options([
                "One side of head",
                "Both sides",
                "Forehead",
                "Back of head",
                "Top of head",
                "Around eyes",
            ]),
        ],
        "chest pain" => vec![
            Question::new(
                "chest_quality",
                "How would you describe the chest pain?",
                QuestionType::Multiselect,
            )
            .required()
            .with_options([
                "Crushing/squeezing",
                "Sharp/stabbing",
                "Burning",
                "Dull ache",
                "Pressure",
            ]),
            Question::new(
                "chest_radiation",
                "Does the pain spread to other areas?",
                QuestionType::Multiselect,
            )
            .required()
            .with_options([
                "Left arm",
                "Right arm",
                "Jaw",
                "Neck",
                "Back",
                "Stomach",
                "No spread",
            ]),
            Question::new(
                "chest_breathing",
                "Are you having difficulty breathing?",
                QuestionType::YesNo,
            )
            .required(),
            Question::new(
                "chest_family_history",
                "Family history of heart disease?",
                QuestionType::Select,
            )
            .required()
            .with_options(["Yes", "No", "Unknown"]),
        ],
        "fatigue" => vec![
            Question::new(
                "fatigue_duration",
                "How long have you been experiencing fatigue?",
                QuestionType::Select,
            )
            .required()
            .with_options(["Days", "Weeks", "Months", "Years"]),
            Question::new(
                "fatigue_rest",
                "Does rest improve your energy?",
                QuestionType::Select,
            )
            .required()
            .with_options([
                "Yes, significantly",
                "Somewhat",
                "No improvement",
                "Makes it worse",
            ]),
            Question::new(
                "fatigue_weight",
                "Any unexplained weight changes?",
                QuestionType::Select,
            )
            .with_options(["Weight loss", "Weight gain", "No change"])
            .reveals("Weight loss", ["weight_details"])
            .reveals("Weight gain", ["weight_details"]),
            Question::new(
                "weight_details",
                "How much weight change and over what period?",
                QuestionType::Text,
            ),
        ],
        "nausea" => vec![
            Question::new("nausea_vomiting", "Are you vomiting?", QuestionType::YesNo)
                .required()
                .reveals("Yes", ["vomit_frequency"]),
            Question::new(
                "vomit_frequency",
                "How often are you vomiting?",
                QuestionType::Select,
            )
            .with_options([
                "Once daily",
                "Multiple times daily",
                "Few times weekly",
                "Rarely",
            ]),
            Question::new(
                "nausea_triggers",
                "What triggers the nausea?",
                QuestionType::Multiselect,
            )
            .with_options([
                "Eating",
                "Smells",
                "Motion",
                "Stress",
                "Morning",
                "No trigger identified",
            ]),
            Question::new(
                "nausea_fluids",
                "Can you keep fluids down?",
                QuestionType::Select,
            )
            .required()
            .with_options(["Yes, easily", "Sometimes", "Rarely", "No"]),
        ],
        _ => Vec::new(),
    }
}

/// The concatenated symptom-specific sets for the patient's current symptom
/// list, in symptom order.
pub fn questions_for_symptoms<S: AsRef<str>>(symptom_types: &[S]) -> Vec<Question> {
    symptom_types
        .iter()
        .flat_map(|s| symptom_questions(s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_questions_match_bank_texts() {
        let texts: Vec<String> = default_questions().into_iter().map(|q| q.text).collect();
        assert_eq!(texts, BANK_TEXTS);
    }

    #[test]
    fn default_question_ids_unique() {
        let questions = default_questions();
        let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), questions.len());
    }

    #[test]
    fn select_questions_carry_options() {
        for symptom in ["headache", "chest pain", "fatigue", "nausea"] {
            for q in symptom_questions(symptom) {
                match q.question_type {
                    crate::models::enums::QuestionType::Select
                    | crate::models::enums::QuestionType::Multiselect => {
                        assert!(q.options.is_some(), "{} has no options", q.id)
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn unknown_symptom_has_no_specific_questions() {
        assert!(symptom_questions("hiccups").is_empty());
    }

    #[test]
    fn follow_up_targets_exist_in_same_set() {
        let sets = [
            default_questions(),
            symptom_questions("headache"),
            symptom_questions("fatigue"),
            symptom_questions("nausea"),
        ];
        for set in sets {
            let ids: HashSet<&str> = set.iter().map(|q| q.id.as_str()).collect();
            for q in &set {
                for children in q.follow_up.iter().flat_map(|m| m.values()) {
                    for child in children {
                        assert!(ids.contains(child.as_str()), "dangling follow-up {child}");
                    }
                }
            }
        }
    }

    #[test]
    fn symptom_sets_concatenate_in_order() {
        let questions = questions_for_symptoms(&["nausea", "headache"]);
        assert_eq!(questions[0].id, "nausea_vomiting");
        assert_eq!(questions[4].id, "headache_worst");
    }
}
