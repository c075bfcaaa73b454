//! The questionnaire session aggregate.
//!
//! All mutation goes through `apply`, a pure `(state, event) -> state`
//! reducer, so every transition in the multi-page flow is testable without
//! a UI harness. Page gating mirrors the form: demographics must be
//! complete before moving past page 0, and at least one symptom must be
//! typed before moving past page 1.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HealthMetrics, PatientInfo, PatientQuestionnaire, Phq9Response, Symptom};

/// Pages of the intake flow, in order.
pub const PAGE_DEMOGRAPHICS: usize = 0;
pub const PAGE_SYMPTOMS: usize = 1;
pub const PAGE_METRICS: usize = 2;
pub const PAGE_GENERAL: usize = 3;
pub const PAGE_SPECIFIC: usize = 4;
pub const PAGE_RESULTS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no symptom at index {0}")]
    SymptomIndexOutOfRange(usize),

    #[error("at least one symptom row must remain")]
    LastSymptomRow,

    #[error("cannot advance: {0}")]
    IncompletePage(&'static str),
}

/// Every way the patient can change the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    UpdatePatientInfo(PatientInfo),
    AddSymptom,
    UpdateSymptom { index: usize, symptom: Symptom },
    RemoveSymptom { index: usize },
    SetHealthMetrics(HealthMetrics),
    SetPhq9(Phq9Response),
    RecordAnswer { id: String, answer: String },
    NextPage,
    PrevPage,
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSession {
    pub id: Uuid,
    pub page: usize,
    pub patient_info: PatientInfo,
    pub symptoms: Vec<Symptom>,
    pub health_metrics: HealthMetrics,
    pub phq9: Option<Phq9Response>,
    pub responses: BTreeMap<String, String>,
}

impl QuestionnaireSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            page: PAGE_DEMOGRAPHICS,
            patient_info: PatientInfo::default(),
            symptoms: vec![Symptom::blank()],
            health_metrics: HealthMetrics::default(),
            phq9: None,
            responses: BTreeMap::new(),
        }
    }

    /// Apply one event, producing the next state. Invalid transitions leave
    /// no partial mutation behind — the error carries the untouched state's
    /// reason for rejection.
    pub fn apply(mut self, event: SessionEvent) -> Result<Self, SessionError> {
        match event {
            SessionEvent::UpdatePatientInfo(info) => {
                self.patient_info = info;
            }
            SessionEvent::AddSymptom => {
                self.symptoms.push(Symptom::blank());
            }
            SessionEvent::UpdateSymptom { index, symptom } => {
                if index >= self.symptoms.len() {
                    return Err(SessionError::SymptomIndexOutOfRange(index));
                }
                self.symptoms[index] = symptom;
            }
            SessionEvent::RemoveSymptom { index } => {
                if index >= self.symptoms.len() {
                    return Err(SessionError::SymptomIndexOutOfRange(index));
                }
                if self.symptoms.len() == 1 {
                    return Err(SessionError::LastSymptomRow);
                }
                self.symptoms.remove(index);
            }
            SessionEvent::SetHealthMetrics(metrics) => {
                self.health_metrics = metrics;
            }
            SessionEvent::SetPhq9(phq9) => {
                self.phq9 = Some(phq9);
            }
            SessionEvent::RecordAnswer { id, answer } => {
                self.responses.insert(id, answer);
            }
            SessionEvent::NextPage => {
                self.check_page_complete()?;
                self.page = (self.page + 1).min(PAGE_RESULTS);
            }
            SessionEvent::PrevPage => {
                self.page = self.page.saturating_sub(1);
            }
            SessionEvent::Reset => {
                return Ok(Self::new());
            }
        }
        Ok(self)
    }

    fn check_page_complete(&self) -> Result<(), SessionError> {
        match self.page {
            PAGE_DEMOGRAPHICS => {
                if self.patient_info.name.trim().is_empty() {
                    return Err(SessionError::IncompletePage("name is required"));
                }
                if self.patient_info.date_of_birth.is_none() {
                    return Err(SessionError::IncompletePage("date of birth is required"));
                }
                if self.patient_info.gender.trim().is_empty() {
                    return Err(SessionError::IncompletePage("gender is required"));
                }
            }
            PAGE_SYMPTOMS => {
                if !self.symptoms.iter().any(Symptom::has_type) {
                    return Err(SessionError::IncompletePage(
                        "at least one symptom is required",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Freeze the session into the analysis payload at submission time.
    pub fn into_questionnaire(self, submission_date: DateTime<Utc>) -> PatientQuestionnaire {
        PatientQuestionnaire {
            patient_info: self.patient_info,
            symptoms: self.symptoms,
            health_metrics: self.health_metrics,
            phq9: self.phq9,
            responses: self.responses,
            additional_notes: None,
            submission_date,
        }
    }
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete_demographics(session: QuestionnaireSession) -> QuestionnaireSession {
        session
            .apply(SessionEvent::UpdatePatientInfo(PatientInfo {
                name: "Jane Doe".into(),
                date_of_birth: NaiveDate::from_ymd_opt(1980, 2, 2),
                gender: "female".into(),
                ..Default::default()
            }))
            .unwrap()
    }

    fn typed_symptom(name: &str) -> Symptom {
        let mut s = Symptom::blank();
        s.symptom_type = name.into();
        s
    }

    #[test]
    fn new_session_starts_with_one_blank_row() {
        let session = QuestionnaireSession::new();
        assert_eq!(session.page, PAGE_DEMOGRAPHICS);
        assert_eq!(session.symptoms.len(), 1);
        assert!(!session.symptoms[0].has_type());
    }

    #[test]
    fn demographics_gate_blocks_advance() {
        let session = QuestionnaireSession::new();
        let err = session.apply(SessionEvent::NextPage).unwrap_err();
        assert_eq!(err, SessionError::IncompletePage("name is required"));
    }

    #[test]
    fn completed_demographics_advance() {
        let session = complete_demographics(QuestionnaireSession::new());
        let session = session.apply(SessionEvent::NextPage).unwrap();
        assert_eq!(session.page, PAGE_SYMPTOMS);
    }

    #[test]
    fn symptom_gate_requires_typed_row() {
        let session = complete_demographics(QuestionnaireSession::new())
            .apply(SessionEvent::NextPage)
            .unwrap();
        let err = session.clone().apply(SessionEvent::NextPage).unwrap_err();
        assert_eq!(
            err,
            SessionError::IncompletePage("at least one symptom is required")
        );

        let session = session
            .apply(SessionEvent::UpdateSymptom {
                index: 0,
                symptom: typed_symptom("headache"),
            })
            .unwrap();
        let session = session.apply(SessionEvent::NextPage).unwrap();
        assert_eq!(session.page, PAGE_METRICS);
    }

    #[test]
    fn last_symptom_row_cannot_be_removed() {
        let session = QuestionnaireSession::new();
        let err = session
            .apply(SessionEvent::RemoveSymptom { index: 0 })
            .unwrap_err();
        assert_eq!(err, SessionError::LastSymptomRow);
    }

    #[test]
    fn add_then_remove_symptom_round_trips() {
        let session = QuestionnaireSession::new()
            .apply(SessionEvent::AddSymptom)
            .unwrap();
        assert_eq!(session.symptoms.len(), 2);
        let session = session
            .apply(SessionEvent::RemoveSymptom { index: 1 })
            .unwrap();
        assert_eq!(session.symptoms.len(), 1);
    }

    #[test]
    fn update_out_of_range_rejected() {
        let err = QuestionnaireSession::new()
            .apply(SessionEvent::UpdateSymptom {
                index: 3,
                symptom: typed_symptom("nausea"),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::SymptomIndexOutOfRange(3));
    }

    #[test]
    fn answers_accumulate() {
        let session = QuestionnaireSession::new()
            .apply(SessionEvent::RecordAnswer {
                id: "medications".into(),
                answer: "Yes".into(),
            })
            .unwrap()
            .apply(SessionEvent::RecordAnswer {
                id: "medications".into(),
                answer: "No".into(),
            })
            .unwrap();
        assert_eq!(session.responses.get("medications").unwrap(), "No");
    }

    #[test]
    fn prev_page_saturates_at_zero() {
        let session = QuestionnaireSession::new()
            .apply(SessionEvent::PrevPage)
            .unwrap();
        assert_eq!(session.page, PAGE_DEMOGRAPHICS);
    }

    #[test]
    fn reset_returns_fresh_state() {
        let session = complete_demographics(QuestionnaireSession::new())
            .apply(SessionEvent::Reset)
            .unwrap();
        assert!(session.patient_info.name.is_empty());
        assert_eq!(session.page, PAGE_DEMOGRAPHICS);
    }

    #[test]
    fn into_questionnaire_carries_state() {
        let session = complete_demographics(QuestionnaireSession::new())
            .apply(SessionEvent::UpdateSymptom {
                index: 0,
                symptom: typed_symptom("fatigue"),
            })
            .unwrap();
        let submitted = session.into_questionnaire("2025-03-01T09:00:00Z".parse().unwrap());
        assert_eq!(submitted.patient_info.name, "Jane Doe");
        assert_eq!(submitted.symptoms[0].symptom_type, "fatigue");
    }
}
