//! OpenAI-compatible chat-completions client for the oracle boundary.
//!
//! One request per call, JSON response format, fixed timeout budget. No
//! credential means no client — `from_env` returns `None` and callers fall
//! through to the contextual engine without attempting the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bank;
use crate::config;
use crate::models::PatientQuestionnaire;

use super::parser;
use super::{DiagnosticSuggestions, IntakeAnalysis, OracleError, QuestionOracle, QuestionRequest};

pub struct OpenAiOracle {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiOracle {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config::ORACLE_BASE_URL.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config::ORACLE_MODEL.to_string(),
            timeout: Duration::from_secs(config::ORACLE_TIMEOUT_SECS),
        }
    }

    /// Build from the environment credential; `None` when the oracle is not
    /// configured.
    pub fn from_env() -> Option<Self> {
        config::oracle_api_key().map(Self::new)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one prompt and return the raw message content. The whole round
    /// trip (send + body) shares a single timeout budget.
    async fn send_chat(&self, prompt: &str) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.3,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let budget_secs = self.timeout.as_secs();
        let response = tokio::time::timeout(self.timeout, async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(OracleError::Http(status.as_u16()));
            }
            let parsed: ChatResponse = response.json().await?;
            Ok(parsed)
        })
        .await
        .map_err(|_| OracleError::Timeout(budget_secs))??;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OracleError::Malformed("no choices in completion".into()))
    }
}

impl QuestionOracle for OpenAiOracle {
    async fn diagnostic_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<DiagnosticSuggestions, OracleError> {
        let prompt = question_prompt(request);
        tracing::debug!(
            symptoms = request.current_symptoms.len(),
            "requesting diagnostic questions"
        );
        let content = self.send_chat(&prompt).await?;
        parser::parse_suggestions(&content)
    }

    async fn analyze(
        &self,
        questionnaire: &PatientQuestionnaire,
    ) -> Result<IntakeAnalysis, OracleError> {
        let prompt = analysis_prompt(questionnaire)?;
        let content = self.send_chat(&prompt).await?;
        parser::parse_analysis(&content)
    }
}

// ---------------------------------------------------------------------------
// Wire bodies
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Diagnostic-question prompt. Tells the model what the standard intake
/// already covers so it does not re-ask; the dedup filter still runs on
/// whatever comes back.
fn question_prompt(request: &QuestionRequest) -> String {
    let symptoms = request.current_symptoms.join(", ");
    let age = if request.patient_info.age == 0 {
        "unknown".to_string()
    } else {
        request.patient_info.age.to_string()
    };
    let gender = if request.patient_info.gender.is_empty() {
        "unknown"
    } else {
        request.patient_info.gender.as_str()
    };
    let covered = bank::BANK_TEXTS
        .iter()
        .map(|text| format!("- {text}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert medical AI diagnostician with advanced clinical reasoning capabilities.\n\
         \n\
         PATIENT PRESENTATION:\n\
         Symptoms: {symptoms}\n\
         Demographics: Age {age}, Gender {gender}\n\
         \n\
         IMPORTANT: Do NOT generate questions about topics already covered in the standard questionnaire:\n\
         {covered}\n\
         \n\
         Generate specific, targeted diagnostic questions based on the patient's symptoms that help refine \
         the differential diagnosis, assess symptom characteristics (onset, duration, severity, triggers, \
         relieving factors), evaluate associated and constitutional symptoms, gather relevant history and \
         risk factors, and identify red flags.\n\
         \n\
         Respond in valid JSON with this shape:\n\
         {{\n\
           \"diagnosticQuestions\": [{{\"text\": \"...\", \"type\": \"text|yesno|select|multiselect\", \"options\": [\"...\"]}}],\n\
           \"potentialDiseases\": [\"...\"],\n\
           \"redFlags\": [\"...\"],\n\
           \"recommendations\": [\"...\"],\n\
           \"patientSummary\": \"A single concise paragraph summarizing the presentation.\"\n\
         }}"
    )
}

/// Full-questionnaire analysis prompt.
fn analysis_prompt(questionnaire: &PatientQuestionnaire) -> Result<String, OracleError> {
    let payload = serde_json::to_string(questionnaire)
        .map_err(|e| OracleError::Malformed(e.to_string()))?;
    Ok(format!(
        "You are a medical AI assistant helping doctors review patient intake data. The system never \
         diagnoses; it proposes candidates for a human clinician. Analyze this questionnaire and return \
         JSON with fields: summary, riskLevel (\"low\"|\"moderate\"|\"high\"|\"urgent\"), keySymptoms, \
         recommendations, followUpQuestions, doctorNotes, urgencyScore (1-10). Always recommend seeing a \
         healthcare provider for proper diagnosis.\n\
         \n\
         Patient Data:\n{payload}"
    ))
}
