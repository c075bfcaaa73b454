//! Lenient parsing of oracle responses.
//!
//! Unparseable JSON is an error (the caller falls back); parseable JSON
//! with missing or mistyped fields is recovered field by field with safe
//! defaults, and malformed array items are skipped rather than failing the
//! whole response.

use serde_json::Value;

use crate::models::enums::RiskLevel;

use super::{DiagnosticSuggestions, IntakeAnalysis, OracleError, SuggestedQuestion};

pub fn parse_suggestions(content: &str) -> Result<DiagnosticSuggestions, OracleError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| OracleError::Malformed(e.to_string()))?;

    Ok(DiagnosticSuggestions {
        diagnostic_questions: lenient_questions(value.get("diagnosticQuestions")),
        potential_diseases: string_array(value.get("potentialDiseases")),
        red_flags: string_array(value.get("redFlags")),
        recommendations: string_array(value.get("recommendations")),
        patient_summary: string_field(value.get("patientSummary"), ""),
    })
}

pub fn parse_analysis(content: &str) -> Result<IntakeAnalysis, OracleError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| OracleError::Malformed(e.to_string()))?;

    let risk_level = value
        .get("riskLevel")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(RiskLevel::Moderate);

    let urgency_score = value
        .get("urgencyScore")
        .and_then(Value::as_u64)
        .map(|v| v.clamp(1, 10) as u8)
        .unwrap_or(5);

    Ok(IntakeAnalysis {
        summary: string_field(value.get("summary"), "Analysis completed"),
        risk_level,
        key_symptoms: string_array(value.get("keySymptoms")),
        recommendations: string_array(value.get("recommendations")),
        follow_up_questions: string_array(value.get("followUpQuestions")),
        doctor_notes: string_field(value.get("doctorNotes"), ""),
        urgency_score,
    })
}

/// Question candidates arrive either as plain strings or as
/// `{text, type, options}` objects; anything without usable text is skipped.
fn lenient_questions(value: Option<&Value>) -> Vec<SuggestedQuestion> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) if !text.trim().is_empty() => Some(SuggestedQuestion {
                text: text.clone(),
                question_type: crate::models::enums::QuestionType::YesNo,
                options: None,
            }),
            Value::Object(_) => serde_json::from_value::<SuggestedQuestion>(item.clone())
                .ok()
                .filter(|q| !q.text.trim().is_empty()),
            _ => None,
        })
        .collect()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn string_field(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
