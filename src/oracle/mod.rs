//! External AI question/summary generation boundary.
//!
//! The oracle is an unreliable collaborator: it can time out, return
//! garbage, or be absent entirely (no credential configured). Callers in
//! `analysis` treat every error here as a signal to take the local
//! contextual fallback; nothing from this module ever reaches the patient
//! as a hard failure.

pub mod latest;
pub mod openai;
pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dedup::QuestionText;
use crate::models::enums::{QuestionType, RiskLevel};
use crate::models::PatientQuestionnaire;

pub use latest::{RequestSequence, RequestTicket};
pub use openai::OpenAiOracle;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request timed out after {0}s")]
    Timeout(u64),

    #[error("oracle transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("oracle returned HTTP {0}")]
    Http(u16),

    /// Response was not the JSON shape we asked for.
    #[error("oracle response malformed: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age: u32,
    pub gender: String,
}

/// Request for diagnostic question candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub current_symptoms: Vec<String>,
    pub patient_info: Demographics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phq9_responses: Option<BTreeMap<String, u8>>,
}

impl QuestionRequest {
    pub fn from_context(context: &crate::context::PatientContext) -> Self {
        Self {
            current_symptoms: context.symptom_types.iter().cloned().collect(),
            patient_info: Demographics {
                age: context.age,
                gender: context.gender.clone(),
            },
            phq9_responses: None,
        }
    }
}

/// One AI-proposed question candidate, before deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedQuestion {
    pub text: String,
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

fn default_question_type() -> QuestionType {
    QuestionType::YesNo
}

impl QuestionText for SuggestedQuestion {
    fn question_text(&self) -> &str {
        &self.text
    }
}

/// The oracle's full answer to a question request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSuggestions {
    pub diagnostic_questions: Vec<SuggestedQuestion>,
    pub potential_diseases: Vec<String>,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
    pub patient_summary: String,
}

/// The oracle's answer to a full-questionnaire analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeAnalysis {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub key_symptoms: Vec<String>,
    pub recommendations: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub doctor_notes: String,
    /// 1..=10.
    pub urgency_score: u8,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The oracle contract as the engine sees it. Implementations own transport,
/// prompting, and parsing; callers own fallback behavior.
#[allow(async_fn_in_trait)]
pub trait QuestionOracle {
    async fn diagnostic_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<DiagnosticSuggestions, OracleError>;

    async fn analyze(
        &self,
        questionnaire: &PatientQuestionnaire,
    ) -> Result<IntakeAnalysis, OracleError>;
}
