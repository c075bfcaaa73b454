//! Derived patient context for rule evaluation.
//!
//! Recomputed in full from the current symptom list, health metrics, and
//! PHQ-9 responses every time rule evaluation is triggered. Never mutated
//! in place. Every boolean flag is a fixed threshold function of its source
//! metric; the thresholds live here as named functions so each can be
//! tested on its own.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::enums::BodySystem;
use crate::models::{HealthMetrics, MoodMetrics, PatientInfo, Phq9Response, SleepMetrics, Symptom};
use crate::taxonomy;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    pub age: u32,
    pub gender: String,
    pub race: String,
    pub symptom_types: BTreeSet<String>,
    pub max_severity: u8,
    pub has_multiple_symptoms: bool,
    pub poor_sleep: bool,
    pub high_stress: bool,
    pub mood_concerns: bool,
    pub low_energy: bool,
    /// PHQ-9 total, 0 when the screen was not completed.
    pub phq9_score: u8,
    pub affected_systems: BTreeSet<BodySystem>,
}

impl PatientContext {
    /// Derive the context from raw entry state. `today` is passed in so the
    /// derivation stays a pure function.
    pub fn derive(
        info: &PatientInfo,
        symptoms: &[Symptom],
        metrics: &HealthMetrics,
        phq9: Option<&Phq9Response>,
        today: NaiveDate,
    ) -> Self {
        let typed: Vec<&Symptom> = symptoms.iter().filter(|s| s.has_type()).collect();
        let symptom_types: BTreeSet<String> = typed
            .iter()
            .map(|s| s.symptom_type.to_lowercase())
            .collect();
        let type_list: Vec<&str> = typed.iter().map(|s| s.symptom_type.as_str()).collect();

        Self {
            age: info.age_on(today),
            gender: info.gender.clone(),
            race: info.race.clone(),
            max_severity: max_severity(&typed),
            has_multiple_symptoms: typed.len() > 1,
            poor_sleep: poor_sleep(&metrics.sleep),
            high_stress: high_stress(&metrics.mood),
            mood_concerns: mood_concerns(&metrics.mood),
            low_energy: low_energy(metrics.energy.level),
            phq9_score: phq9.map(Phq9Response::score).unwrap_or(0),
            affected_systems: taxonomy::classify(&type_list),
            symptom_types,
        }
    }
}

/// quality ≤ 4 or under six hours a night.
pub fn poor_sleep(sleep: &SleepMetrics) -> bool {
    sleep.quality <= 4 || sleep.hours_per_night < 6.0
}

/// stress ≥ 7 or anxiety ≥ 7.
pub fn high_stress(mood: &MoodMetrics) -> bool {
    mood.stress >= 7 || mood.anxiety >= 7
}

/// overall mood ≤ 4 or depression ≥ 6.
pub fn mood_concerns(mood: &MoodMetrics) -> bool {
    mood.overall <= 4 || mood.depression >= 6
}

/// energy level ≤ 4.
pub fn low_energy(level: u8) -> bool {
    level <= 4
}

fn max_severity(typed: &[&Symptom]) -> u8 {
    typed.iter().map(|s| s.severity).max().unwrap_or(0)
}
