//! Follow-up visibility resolver.
//!
//! The question bank declares follow-up edges on the parent
//! (`followUp: trigger answer → child ids`). Rendering needs the reverse
//! view: for each child, which parent answers reveal it. The index is
//! rebuilt and visibility recomputed in full on every answer change — there
//! is no incremental state to invalidate.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::Question;

/// Reverse index: child question id → its parents, each with the union of
/// trigger answers declared for that (parent, child) pair.
#[derive(Debug, Default)]
pub struct FollowUpIndex {
    parents: HashMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl FollowUpIndex {
    pub fn build(questions: &[Question]) -> Self {
        let mut parents: HashMap<String, BTreeMap<String, BTreeSet<String>>> = HashMap::new();
        for question in questions {
            let Some(follow_up) = &question.follow_up else {
                continue;
            };
            for (trigger, children) in follow_up {
                for child in children {
                    parents
                        .entry(child.clone())
                        .or_default()
                        .entry(question.id.clone())
                        .or_default()
                        .insert(trigger.clone());
                }
            }
        }
        Self { parents }
    }

    /// Whether the question is a follow-up target at all. Questions not in
    /// the index are always visible.
    pub fn is_follow_up(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// A follow-up is visible iff some parent's recorded answer matches one
    /// of its trigger answers.
    pub fn is_visible(&self, id: &str, answers: &BTreeMap<String, String>) -> bool {
        match self.parents.get(id) {
            None => true,
            Some(parents) => parents.iter().any(|(parent_id, triggers)| {
                answers
                    .get(parent_id)
                    .is_some_and(|answer| answer_matches(answer, triggers))
            }),
        }
    }
}

/// Multiselect parents store their answer comma-joined, so a trigger counts
/// as matched when it equals the whole stored answer or any one of its
/// comma-separated selections.
fn answer_matches(answer: &str, triggers: &BTreeSet<String>) -> bool {
    if triggers.contains(answer) {
        return true;
    }
    answer.split(',').any(|token| triggers.contains(token))
}

/// Ids of the questions currently visible given the recorded answers.
pub fn compute_visibility(
    questions: &[Question],
    answers: &BTreeMap<String, String>,
) -> BTreeSet<String> {
    let index = FollowUpIndex::build(questions);
    questions
        .iter()
        .filter(|q| index.is_visible(&q.id, answers))
        .map(|q| q.id.clone())
        .collect()
}
