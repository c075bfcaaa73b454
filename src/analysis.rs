//! Orchestration over the oracle boundary.
//!
//! Two flows: follow-up question generation during intake, and full
//! questionnaire analysis at submission. Both treat the oracle as
//! optional and unreliable — any failure falls through to the contextual
//! rule engine and the static narrative summary, and the dedup filter runs
//! on whichever question list is ultimately used, regardless of provenance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::charts::{self, ChartData};
use crate::context::PatientContext;
use crate::dedup::DuplicateFilter;
use crate::error::ValidationError;
use crate::models::enums::{QuestionType, RiskLevel, RuleCategory};
use crate::models::{PatientQuestionnaire, Question};
use crate::oracle::{
    DiagnosticSuggestions, IntakeAnalysis, QuestionOracle, QuestionRequest,
};
use crate::rules::{self, DEFAULT_MAX_RESULTS, DEFAULT_RULES};
use crate::summary;

/// Which path produced the question set the patient will see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
    Oracle,
    ContextRules,
}

#[derive(Debug, Clone)]
pub struct GeneratedQuestions {
    pub questions: Vec<Question>,
    pub origin: QuestionOrigin,
    /// The full oracle payload when it was used (diseases, red flags, ...).
    pub suggestions: Option<DiagnosticSuggestions>,
}

/// Produce the follow-up question set for the current context. Never fails
/// and never returns an empty list: oracle errors, absent credentials, and
/// fully-deduplicated oracle output all fall back to the rule engine.
pub async fn generate_questions<O: QuestionOracle>(
    oracle: Option<&O>,
    context: &PatientContext,
    filter: &DuplicateFilter,
) -> GeneratedQuestions {
    if let Some(oracle) = oracle {
        let request = QuestionRequest::from_context(context);
        match oracle.diagnostic_questions(&request).await {
            Ok(suggestions) => {
                let kept = filter.filter(suggestions.diagnostic_questions.clone());
                if kept.is_empty() {
                    tracing::info!("oracle suggestions fully deduplicated, using rule engine");
                } else {
                    let questions = kept
                        .into_iter()
                        .enumerate()
                        .map(|(i, s)| {
                            let mut q = Question::new(
                                format!("ai_question_{i}"),
                                ensure_question_mark(&s.text),
                                s.question_type,
                            )
                            .required();
                            q.options = s.options;
                            q
                        })
                        .collect();
                    return GeneratedQuestions {
                        questions,
                        origin: QuestionOrigin::Oracle,
                        suggestions: Some(suggestions),
                    };
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "oracle question generation failed, using rule engine");
            }
        }
    }

    GeneratedQuestions {
        questions: fallback_questions(context, filter),
        origin: QuestionOrigin::ContextRules,
        suggestions: None,
    }
}

/// Contextual rule-engine questions, deduplicated against the bank.
pub fn fallback_questions(context: &PatientContext, filter: &DuplicateFilter) -> Vec<Question> {
    let texts = rules::select_questions(context, DEFAULT_RULES, DEFAULT_MAX_RESULTS);
    filter
        .filter(texts)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            Question::new(format!("context_question_{i}"), text, QuestionType::Text).required()
        })
        .collect()
}

fn ensure_question_mark(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with('?') {
        trimmed.to_string()
    } else {
        format!("{trimmed}?")
    }
}

// ---------------------------------------------------------------------------
// Full questionnaire analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    pub name: String,
    pub submission_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub analysis: IntakeAnalysis,
    pub chart_data: ChartData,
    pub patient_info: PatientRef,
}

/// Validate and analyze a submitted questionnaire. Validation failures are
/// the only error path; oracle failures degrade to the local analysis.
pub async fn analyze_patient<O: QuestionOracle>(
    oracle: Option<&O>,
    questionnaire: &PatientQuestionnaire,
    today: NaiveDate,
) -> Result<AnalysisBundle, ValidationError> {
    questionnaire.validate()?;

    let context = PatientContext::derive(
        &questionnaire.patient_info,
        &questionnaire.symptoms,
        &questionnaire.health_metrics,
        questionnaire.phq9.as_ref(),
        today,
    );

    let analysis = match oracle {
        Some(oracle) => match oracle.analyze(questionnaire).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(error = %err, "oracle analysis failed, using local analysis");
                local_analysis(questionnaire, &context)
            }
        },
        None => local_analysis(questionnaire, &context),
    };

    Ok(AnalysisBundle {
        analysis,
        chart_data: charts::build_chart_data(questionnaire),
        patient_info: PatientRef {
            name: questionnaire.patient_info.name.clone(),
            submission_date: questionnaire.submission_date,
        },
    })
}

/// Deterministic analysis assembled without the oracle: the static
/// narrative summary, threshold-derived risk, and rule-engine follow-ups.
pub fn local_analysis(
    questionnaire: &PatientQuestionnaire,
    context: &PatientContext,
) -> IntakeAnalysis {
    let risk_level = derive_risk(context);
    let filter = DuplicateFilter::standard();

    let mut key_symptoms: Vec<String> = questionnaire
        .typed_symptoms()
        .filter(|s| s.severity >= 7)
        .map(|s| s.symptom_type.clone())
        .collect();
    if key_symptoms.is_empty() {
        key_symptoms = questionnaire
            .typed_symptoms()
            .max_by_key(|s| s.severity)
            .map(|s| vec![s.symptom_type.clone()])
            .unwrap_or_default();
    }

    IntakeAnalysis {
        summary: summary::narrative_summary(
            &questionnaire.symptoms,
            &questionnaire.responses,
            questionnaire.phq9.as_ref(),
        ),
        risk_level,
        key_symptoms,
        recommendations: vec![
            "Share this report with a healthcare provider for evaluation.".to_string(),
            "Track symptom changes until the visit and note anything new.".to_string(),
        ],
        follow_up_questions: filter.filter(rules::select_questions(
            context,
            DEFAULT_RULES,
            DEFAULT_MAX_RESULTS,
        )),
        doctor_notes: "Automated analysis unavailable; generated from intake responses only."
            .to_string(),
        urgency_score: match risk_level {
            RiskLevel::Low => 3,
            RiskLevel::Moderate => 5,
            _ => 8,
        },
    }
}

/// Local risk derivation. Never produces `urgent` — that call is left to
/// the oracle and, ultimately, a clinician.
pub fn derive_risk(context: &PatientContext) -> RiskLevel {
    let urgent_rule_fired = DEFAULT_RULES
        .iter()
        .any(|rule| rule.category == RuleCategory::Urgent && rule.matches(context));
    if context.max_severity >= 8 || urgent_rule_fired {
        RiskLevel::High
    } else if context.phq9_score >= 10 || context.max_severity >= 5 || context.has_multiple_symptoms
    {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Frequency;
    use crate::models::{HealthMetrics, PatientInfo, Symptom};
    use crate::oracle::{OracleError, SuggestedQuestion};
    use std::collections::BTreeMap;

    /// Scripted oracle for exercising both sides of the fallback boundary.
    struct StubOracle {
        suggestions: Option<DiagnosticSuggestions>,
        analysis: Option<IntakeAnalysis>,
    }

    impl StubOracle {
        fn failing() -> Self {
            Self {
                suggestions: None,
                analysis: None,
            }
        }
    }

    impl QuestionOracle for StubOracle {
        async fn diagnostic_questions(
            &self,
            _request: &QuestionRequest,
        ) -> Result<DiagnosticSuggestions, OracleError> {
            self.suggestions.clone().ok_or(OracleError::Timeout(30))
        }

        async fn analyze(
            &self,
            _questionnaire: &PatientQuestionnaire,
        ) -> Result<IntakeAnalysis, OracleError> {
            self.analysis.clone().ok_or(OracleError::Timeout(30))
        }
    }

    fn symptom(name: &str, severity: u8) -> Symptom {
        Symptom {
            symptom_type: name.into(),
            severity,
            frequency: Frequency::Intermittent,
            duration_number: 2,
            duration_unit: crate::models::enums::DurationUnit::Days,
            description: None,
        }
    }

    fn context(symptoms: &[(&str, u8)]) -> PatientContext {
        let rows: Vec<Symptom> = symptoms.iter().map(|(n, s)| symptom(n, *s)).collect();
        PatientContext::derive(
            &PatientInfo::default(),
            &rows,
            &HealthMetrics::default(),
            None,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
    }

    fn questionnaire(symptoms: &[(&str, u8)]) -> PatientQuestionnaire {
        PatientQuestionnaire {
            patient_info: PatientInfo {
                name: "Pat".into(),
                ..Default::default()
            },
            symptoms: symptoms.iter().map(|(n, s)| symptom(n, *s)).collect(),
            health_metrics: HealthMetrics::default(),
            phq9: None,
            responses: BTreeMap::new(),
            additional_notes: None,
            submission_date: "2025-03-01T10:00:00Z".parse().unwrap(),
        }
    }

    fn suggestion(text: &str) -> SuggestedQuestion {
        SuggestedQuestion {
            text: text.into(),
            question_type: QuestionType::YesNo,
            options: None,
        }
    }

    #[tokio::test]
    async fn oracle_timeout_falls_back_to_rule_engine() {
        let filter = DuplicateFilter::standard();
        let ctx = context(&[("headache", 6)]);
        let generated =
            generate_questions(Some(&StubOracle::failing()), &ctx, &filter).await;

        assert_eq!(generated.origin, QuestionOrigin::ContextRules);
        assert!(!generated.questions.is_empty());
        for q in &generated.questions {
            assert!(!filter.is_duplicate(&q.text));
        }
    }

    #[tokio::test]
    async fn absent_oracle_uses_rule_engine() {
        let filter = DuplicateFilter::standard();
        let ctx = context(&[("headache", 6)]);
        let generated = generate_questions::<StubOracle>(None, &ctx, &filter).await;
        assert_eq!(generated.origin, QuestionOrigin::ContextRules);
        assert!(!generated.questions.is_empty());
    }

    #[tokio::test]
    async fn oracle_output_is_deduplicated() {
        let oracle = StubOracle {
            suggestions: Some(DiagnosticSuggestions {
                diagnostic_questions: vec![
                    suggestion("What medications are you taking?"),
                    suggestion("Does the headache wake you at night"),
                ],
                ..Default::default()
            }),
            analysis: None,
        };
        let filter = DuplicateFilter::standard();
        let ctx = context(&[("headache", 6)]);
        let generated = generate_questions(Some(&oracle), &ctx, &filter).await;

        assert_eq!(generated.origin, QuestionOrigin::Oracle);
        assert_eq!(generated.questions.len(), 1);
        // Converted questions get ids, required, and a trailing question mark.
        assert_eq!(generated.questions[0].id, "ai_question_0");
        assert_eq!(
            generated.questions[0].text,
            "Does the headache wake you at night?"
        );
        assert!(generated.questions[0].required);
    }

    #[tokio::test]
    async fn fully_deduplicated_oracle_output_falls_back() {
        let oracle = StubOracle {
            suggestions: Some(DiagnosticSuggestions {
                diagnostic_questions: vec![
                    suggestion("What medications are you taking?"),
                    suggestion("Any allergies we should know about?"),
                ],
                ..Default::default()
            }),
            analysis: None,
        };
        let filter = DuplicateFilter::standard();
        let ctx = context(&[("headache", 6)]);
        let generated = generate_questions(Some(&oracle), &ctx, &filter).await;
        assert_eq!(generated.origin, QuestionOrigin::ContextRules);
        assert!(!generated.questions.is_empty());
    }

    #[tokio::test]
    async fn analyze_rejects_invalid_payload() {
        let mut q = questionnaire(&[("headache", 6)]);
        q.patient_info.name.clear();
        let err = analyze_patient::<StubOracle>(None, &q, today())
            .await
            .unwrap_err();
        assert_eq!(err.issues[0].field, "patientInfo.name");
    }

    fn today() -> NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn analyze_falls_back_to_local_analysis() {
        let q = questionnaire(&[("headache", 9)]);
        let bundle = analyze_patient(Some(&StubOracle::failing()), &q, today())
            .await
            .unwrap();
        assert_eq!(bundle.analysis.risk_level, RiskLevel::High);
        assert!(bundle.analysis.summary.starts_with("Patient is experiencing: headache"));
        assert!(!bundle.analysis.follow_up_questions.is_empty());
        assert_eq!(bundle.chart_data.pain_heatmap.len(), 1);
    }

    #[tokio::test]
    async fn analyze_uses_oracle_result_when_available() {
        let oracle = StubOracle {
            suggestions: None,
            analysis: Some(IntakeAnalysis {
                summary: "From the oracle".into(),
                risk_level: RiskLevel::Urgent,
                key_symptoms: vec!["chest pain".into()],
                recommendations: vec![],
                follow_up_questions: vec![],
                doctor_notes: String::new(),
                urgency_score: 9,
            }),
        };
        let q = questionnaire(&[("chest pain", 9)]);
        let bundle = analyze_patient(Some(&oracle), &q, today()).await.unwrap();
        assert_eq!(bundle.analysis.summary, "From the oracle");
        assert_eq!(bundle.analysis.risk_level, RiskLevel::Urgent);
    }

    #[test]
    fn risk_derivation_bands() {
        assert_eq!(derive_risk(&context(&[("headache", 2)])), RiskLevel::Low);
        assert_eq!(
            derive_risk(&context(&[("headache", 5)])),
            RiskLevel::Moderate
        );
        assert_eq!(
            derive_risk(&context(&[("headache", 3), ("nausea", 2)])),
            RiskLevel::Moderate
        );
        assert_eq!(derive_risk(&context(&[("headache", 8)])), RiskLevel::High);
        // An urgent-category rule (cardiovascular involvement) escalates
        // even at moderate severity.
        assert_eq!(
            derive_risk(&context(&[("chest pain", 4)])),
            RiskLevel::High
        );
    }

    #[test]
    fn local_analysis_never_reports_urgent() {
        let q = questionnaire(&[("chest pain", 10), ("shortness of breath", 9)]);
        let ctx = context(&[("chest pain", 10), ("shortness of breath", 9)]);
        let analysis = local_analysis(&q, &ctx);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(analysis.urgency_score, 8);
        assert_eq!(
            analysis.key_symptoms,
            vec!["chest pain".to_string(), "shortness of breath".to_string()]
        );
    }
}
