use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::enums::{AppetiteChange, DurationUnit, FatigueFrequency, Frequency};

// ---------------------------------------------------------------------------
// PatientInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub ethnicity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_id: Option<String>,
}

impl PatientInfo {
    /// Whole years between date of birth and `today`, accounting for whether
    /// the birthday has occurred yet this year. 0 when no DOB is recorded.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let Some(dob) = self.date_of_birth else {
            return 0;
        };
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}

// ---------------------------------------------------------------------------
// Symptom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    /// Taxonomy key from the symptom catalog; empty until the patient picks one.
    #[serde(rename = "type")]
    pub symptom_type: String,
    /// 1..=10 scale.
    pub severity: u8,
    pub frequency: Frequency,
    pub duration_number: u32,
    pub duration_unit: DurationUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Symptom {
    /// Blank row as presented to the patient before any selection.
    pub fn blank() -> Self {
        Self {
            symptom_type: String::new(),
            severity: 1,
            frequency: Frequency::Intermittent,
            duration_number: 1,
            duration_unit: DurationUnit::Days,
            description: None,
        }
    }

    /// A row counts only once the patient has picked a symptom type.
    pub fn has_type(&self) -> bool {
        !self.symptom_type.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// HealthMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepMetrics {
    /// 1 = very poor, 10 = excellent.
    pub quality: u8,
    pub hours_per_night: f32,
    #[serde(default)]
    pub difficulty_falling_asleep: bool,
    #[serde(default)]
    pub frequent_waking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodMetrics {
    /// 1 = very low, 10 = very high.
    pub overall: u8,
    pub anxiety: u8,
    pub depression: u8,
    pub stress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyMetrics {
    pub level: u8,
    pub fatigue_frequency: FatigueFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppetiteMetrics {
    pub level: u8,
    pub changes: AppetiteChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub sleep: SleepMetrics,
    pub mood: MoodMetrics,
    pub energy: EnergyMetrics,
    pub appetite: AppetiteMetrics,
}

impl Default for HealthMetrics {
    fn default() -> Self {
        Self {
            sleep: SleepMetrics {
                quality: 5,
                hours_per_night: 7.0,
                difficulty_falling_asleep: false,
                frequent_waking: false,
            },
            mood: MoodMetrics {
                overall: 5,
                anxiety: 5,
                depression: 5,
                stress: 5,
            },
            energy: EnergyMetrics {
                level: 5,
                fatigue_frequency: FatigueFrequency::Sometimes,
            },
            appetite: AppetiteMetrics {
                level: 5,
                changes: AppetiteChange::NoChange,
            },
        }
    }
}
