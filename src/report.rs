//! Doctor hand-off: the finalized report payload and its serialization into
//! the report view's URL query parameters. Nothing is persisted server-side;
//! the URL carries the whole payload.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::charts::ChartData;
use crate::config;
use crate::models::enums::RiskLevel;
use crate::models::PatientQuestionnaire;
use crate::oracle::IntakeAnalysis;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("report payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub analysis_version: &'static str,
}

/// Everything the report renderer consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorHandoff {
    pub patient_summary: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub urgency_level: RiskLevel,
    pub chart_data: ChartData,
    pub metadata: HandoffMetadata,
}

pub fn doctor_handoff(
    questionnaire: &PatientQuestionnaire,
    analysis: &IntakeAnalysis,
    chart_data: ChartData,
    generated_at: DateTime<Utc>,
) -> DoctorHandoff {
    DoctorHandoff {
        patient_summary: analysis.summary.clone(),
        key_findings: analysis.key_symptoms.clone(),
        recommendations: analysis.recommendations.clone(),
        urgency_level: analysis.risk_level,
        chart_data,
        metadata: HandoffMetadata {
            generated_at,
            patient_id: questionnaire.patient_info.medical_id.clone(),
            analysis_version: config::ANALYSIS_VERSION,
        },
    }
}

/// Build the report view URL: questionnaire under `data`, analysis (when
/// present) under `analysis`, both as URL-encoded JSON.
pub fn handoff_url(
    base: &str,
    questionnaire: &PatientQuestionnaire,
    analysis: Option<&IntakeAnalysis>,
) -> Result<reqwest::Url, ReportError> {
    let mut url =
        reqwest::Url::parse(base).map_err(|e| ReportError::InvalidBaseUrl(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("data", &serde_json::to_string(questionnaire)?);
        if let Some(analysis) = analysis {
            pairs.append_pair("analysis", &serde_json::to_string(analysis)?);
        }
    }
    Ok(url)
}
