//! Deterministic summary and formatting helpers: severity bucketing,
//! duration-unit pluralization, and the narrative summary used as the cheap
//! path when the oracle is unreachable. Pure string templating — identical
//! input produces byte-identical output.

use std::collections::BTreeMap;

use crate::models::enums::SeverityCategory;
use crate::models::{Phq9Response, Symptom};

/// Bucket a 1..=10 severity: ≤3 low, 4..=6 moderate, ≥7 severe.
pub fn severity_category(severity: u8) -> SeverityCategory {
    match severity {
        0..=3 => SeverityCategory::Low,
        4..=6 => SeverityCategory::Moderate,
        _ => SeverityCategory::Severe,
    }
}

/// Render a duration unit for a count. Units follow the `"word(s)"`
/// convention: count 1 strips the suffix, anything else pluralizes it.
/// Units outside the convention fall back to naive `s` stripping/appending.
pub fn format_unit(unit: &str, count: u32) -> String {
    if let Some(base) = unit.strip_suffix("(s)") {
        if count == 1 {
            base.to_string()
        } else {
            format!("{base}s")
        }
    } else if count == 1 {
        unit.strip_suffix('s').unwrap_or(unit).to_string()
    } else if unit.ends_with('s') {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// One symptom clause: `"{type} (severity {s}/10, {frequency}, {n} {unit})"`.
pub fn symptom_clause(symptom: &Symptom) -> String {
    format!(
        "{} (severity {}/10, {}, {} {})",
        symptom.symptom_type,
        symptom.severity,
        symptom.frequency,
        symptom.duration_number,
        format_unit(symptom.duration_unit.as_str(), symptom.duration_number),
    )
}

fn yes(responses: &BTreeMap<String, String>, id: &str) -> bool {
    responses
        .get(id)
        .is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}

fn answer<'a>(responses: &'a BTreeMap<String, String>, id: &str) -> &'a str {
    responses.get(id).map(String::as_str).unwrap_or("")
}

/// Assemble the narrative patient summary without any oracle involvement.
/// Clause order is fixed: symptoms, medications, allergies, previous
/// episodes, main concern, PHQ-9.
pub fn narrative_summary(
    symptoms: &[Symptom],
    responses: &BTreeMap<String, String>,
    phq9: Option<&Phq9Response>,
) -> String {
    let symptom_parts = symptoms
        .iter()
        .filter(|s| s.has_type())
        .map(symptom_clause)
        .collect::<Vec<_>>()
        .join("; ");

    let mut summary = format!("Patient is experiencing: {symptom_parts}. ");

    if yes(responses, "medications") {
        summary.push_str(&format!(
            "Current medications include {}. ",
            answer(responses, "medication_list")
        ));
    }
    if yes(responses, "allergies") {
        summary.push_str(&format!(
            "Allergies noted: {}. ",
            answer(responses, "allergy_list")
        ));
    }
    if yes(responses, "previous_episodes") {
        summary.push_str(&format!(
            "History of similar episodes; prior treatment: {}. ",
            answer(responses, "previous_treatment")
        ));
    }
    let concern = answer(responses, "main_concern");
    if !concern.is_empty() {
        summary.push_str(&format!("Primary concern: {concern}. "));
    }
    if let Some(phq9) = phq9 {
        let score = phq9.score();
        if score > 0 {
            summary.push_str(&format!("PHQ-9 score {score}/27 ({}).", phq9.band()));
        }
    }

    summary.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{DurationUnit, Frequency};

    fn symptom(name: &str, severity: u8, n: u32, unit: DurationUnit) -> Symptom {
        Symptom {
            symptom_type: name.into(),
            severity,
            frequency: Frequency::Intermittent,
            duration_number: n,
            duration_unit: unit,
            description: None,
        }
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(severity_category(3), SeverityCategory::Low);
        assert_eq!(severity_category(4), SeverityCategory::Moderate);
        assert_eq!(severity_category(6), SeverityCategory::Moderate);
        assert_eq!(severity_category(7), SeverityCategory::Severe);
    }

    #[test]
    fn unit_formatting_with_convention() {
        assert_eq!(format_unit("day(s)", 1), "day");
        assert_eq!(format_unit("day(s)", 3), "days");
        assert_eq!(format_unit("hour(s)", 1), "hour");
        assert_eq!(format_unit("year(s)", 2), "years");
    }

    #[test]
    fn unit_formatting_naive_fallback() {
        assert_eq!(format_unit("weeks", 1), "week");
        assert_eq!(format_unit("week", 2), "weeks");
        assert_eq!(format_unit("weeks", 2), "weeks");
    }

    #[test]
    fn symptom_clause_format() {
        let s = symptom("headache", 7, 3, DurationUnit::Days);
        assert_eq!(
            symptom_clause(&s),
            "headache (severity 7/10, intermittent, 3 days)"
        );
    }

    #[test]
    fn narrative_includes_only_affirmed_clauses() {
        let symptoms = vec![symptom("headache", 7, 1, DurationUnit::Days)];
        let mut responses = BTreeMap::new();
        responses.insert("medications".to_string(), "yes".to_string());
        responses.insert("medication_list".to_string(), "ibuprofen".to_string());
        responses.insert("allergies".to_string(), "No".to_string());
        responses.insert("allergy_list".to_string(), "pollen".to_string());

        let text = narrative_summary(&symptoms, &responses, None);
        assert_eq!(
            text,
            "Patient is experiencing: headache (severity 7/10, intermittent, 1 day). \
             Current medications include ibuprofen."
        );
    }

    #[test]
    fn narrative_appends_phq9_only_when_scored() {
        let symptoms = vec![symptom("fatigue", 4, 2, DurationUnit::Weeks)];
        let responses = BTreeMap::new();

        let silent = Phq9Response::default();
        let text = narrative_summary(&symptoms, &responses, Some(&silent));
        assert!(!text.contains("PHQ-9"));

        let endorsed = Phq9Response {
            q1: 3,
            q2: 3,
            q3: 3,
            q4: 3,
            q5: 3,
            difficulty: Some(2),
            ..Default::default()
        };
        let text = narrative_summary(&symptoms, &responses, Some(&endorsed));
        assert!(text.ends_with("PHQ-9 score 15/27 (severe)."));
    }

    #[test]
    fn narrative_is_byte_stable() {
        let symptoms = vec![
            symptom("headache", 7, 3, DurationUnit::Days),
            symptom("nausea", 4, 1, DurationUnit::Weeks),
        ];
        let mut responses = BTreeMap::new();
        responses.insert("main_concern".to_string(), "it keeps returning".to_string());
        let a = narrative_summary(&symptoms, &responses, None);
        let b = narrative_summary(&symptoms, &responses, None);
        assert_eq!(a, b);
        assert!(a.contains("headache (severity 7/10, intermittent, 3 days); nausea"));
        assert!(a.contains("Primary concern: it keeps returning."));
    }
}
