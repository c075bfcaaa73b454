use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::QuestionType;

/// A single intake question. `follow_up` maps a trigger answer to the ids of
/// child questions revealed by that answer. Bank questions are compiled in
/// and immutable; generated ones are session-scoped and discarded on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<BTreeMap<String, Vec<String>>>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_type,
            options: None,
            required: false,
            follow_up: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Reveal the listed child questions when this question is answered with
    /// `trigger`.
    pub fn reveals<I, S>(mut self, trigger: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.follow_up
            .get_or_insert_with(BTreeMap::new)
            .insert(trigger.into(), children.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_follow_ups() {
        let q = Question::new("medications", "Taking anything?", QuestionType::YesNo)
            .required()
            .reveals("Yes", ["medication_list"]);
        assert!(q.required);
        assert_eq!(
            q.follow_up.unwrap().get("Yes").unwrap(),
            &vec!["medication_list".to_string()]
        );
    }

    #[test]
    fn serializes_with_camel_case_follow_up() {
        let q = Question::new("q", "Text", QuestionType::Select)
            .with_options(["A", "B"])
            .reveals("A", ["child"]);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "select");
        assert_eq!(json["followUp"]["A"][0], "child");
    }
}
