use serde::Serialize;
use thiserror::Error;

/// A single field-level problem found while validating patient input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `symptoms[0].severity`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Malformed or incomplete questionnaire input. Surfaced to the caller with
/// field-level detail; the request is rejected rather than recovered.
#[derive(Debug, Clone, Error)]
#[error("invalid patient data ({} issue(s))", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

/// A string did not name any variant of a wire enum.
#[derive(Debug, Clone, Error)]
#[error("invalid {field} value: {value}")]
pub struct EnumParseError {
    pub field: &'static str,
    pub value: String,
}
