use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationIssue};

use super::patient::{HealthMetrics, PatientInfo, Symptom};
use super::phq9::Phq9Response;

/// Full questionnaire payload submitted for analysis at the end of the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientQuestionnaire {
    pub patient_info: PatientInfo,
    pub symptoms: Vec<Symptom>,
    pub health_metrics: HealthMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phq9: Option<Phq9Response>,
    /// Question id → recorded answer (multiselect answers are comma-joined).
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub submission_date: DateTime<Utc>,
}

impl PatientQuestionnaire {
    /// Symptom rows the patient actually filled in.
    pub fn typed_symptoms(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.iter().filter(|s| s.has_type())
    }

    /// Validate the payload, collecting every field-level issue rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.patient_info.name.trim().is_empty() {
            issues.push(ValidationIssue::new("patientInfo.name", "Name is required"));
        }

        if self.typed_symptoms().next().is_none() {
            issues.push(ValidationIssue::new(
                "symptoms",
                "At least one symptom is required",
            ));
        }
        for (idx, symptom) in self.symptoms.iter().enumerate() {
            if symptom.has_type() && !(1..=10).contains(&symptom.severity) {
                issues.push(ValidationIssue::new(
                    format!("symptoms[{idx}].severity"),
                    "Severity must be between 1 and 10",
                ));
            }
            if symptom.has_type() && symptom.duration_number == 0 {
                issues.push(ValidationIssue::new(
                    format!("symptoms[{idx}].durationNumber"),
                    "Duration must be a positive number",
                ));
            }
        }

        validate_metrics(&self.health_metrics, &mut issues);

        if let Some(phq9) = &self.phq9 {
            for (i, value) in phq9.items().iter().enumerate() {
                if *value > 3 {
                    issues.push(ValidationIssue::new(
                        format!("phq9.q{}", i + 1),
                        "PHQ-9 items are scored 0 to 3",
                    ));
                }
            }
            match phq9.difficulty {
                Some(d) if d > 3 => issues.push(ValidationIssue::new(
                    "phq9.difficulty",
                    "Difficulty is scored 0 to 3",
                )),
                None if phq9.any_endorsed() => issues.push(ValidationIssue::new(
                    "phq9.difficulty",
                    "Difficulty rating is required when any item is endorsed",
                )),
                _ => {}
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

fn validate_metrics(metrics: &HealthMetrics, issues: &mut Vec<ValidationIssue>) {
    let scales = [
        ("healthMetrics.sleep.quality", metrics.sleep.quality),
        ("healthMetrics.mood.overall", metrics.mood.overall),
        ("healthMetrics.mood.anxiety", metrics.mood.anxiety),
        ("healthMetrics.mood.depression", metrics.mood.depression),
        ("healthMetrics.mood.stress", metrics.mood.stress),
        ("healthMetrics.energy.level", metrics.energy.level),
        ("healthMetrics.appetite.level", metrics.appetite.level),
    ];
    for (field, value) in scales {
        if !(1..=10).contains(&value) {
            issues.push(ValidationIssue::new(field, "Scale values run from 1 to 10"));
        }
    }
    if !(0.0..=24.0).contains(&metrics.sleep.hours_per_night) {
        issues.push(ValidationIssue::new(
            "healthMetrics.sleep.hoursPerNight",
            "Hours per night must be between 0 and 24",
        ));
    }
}
