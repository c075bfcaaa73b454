//! Contextual rule engine: a declarative condition → question table with
//! priority-based conflict resolution. Evaluation is deterministic — the
//! same context and rule set always produce the same ordered list, no
//! matter how many times or in what order rules are declared to match.

pub mod predicates;

use crate::context::PatientContext;
use crate::models::enums::RuleCategory;

pub const DEFAULT_MAX_RESULTS: usize = 12;

/// One rule of the contextual table. Predicates must be pure; questions are
/// plain texts, ranked by the rule's priority (higher first).
pub struct Rule {
    pub name: &'static str,
    pub predicate: fn(&PatientContext) -> bool,
    pub questions: &'static [&'static str],
    pub priority: i32,
    pub category: RuleCategory,
}

impl Rule {
    pub fn matches(&self, context: &PatientContext) -> bool {
        (self.predicate)(context)
    }
}

/// The deployed rule table. Ends with a catch-all so evaluation can never
/// come back empty.
pub static DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "severe_presentation",
        predicate: predicates::severe_presentation,
        questions: &[
            "Are your symptoms currently preventing you from performing normal daily activities?",
            "Have your symptoms suddenly become much worse in the last 24 hours?",
        ],
        priority: 10,
        category: RuleCategory::Urgent,
    },
    Rule {
        name: "cardiovascular_involvement",
        predicate: predicates::cardiovascular_involvement,
        questions: &[
            "Do your symptoms worsen with physical exertion?",
            "Have you experienced fainting or near-fainting episodes?",
        ],
        priority: 9,
        category: RuleCategory::Urgent,
    },
    Rule {
        name: "neurological_involvement",
        predicate: predicates::neurological_involvement,
        questions: &[
            "Have you noticed any changes in your vision, speech, or coordination?",
            "Do your symptoms wake you from sleep?",
        ],
        priority: 8,
        category: RuleCategory::Diagnostic,
    },
    Rule {
        name: "multiple_symptoms",
        predicate: predicates::multiple_symptoms,
        questions: &[
            "Did your symptoms start at the same time or one after another?",
            "Do any of your symptoms seem to trigger the others?",
        ],
        priority: 6,
        category: RuleCategory::Diagnostic,
    },
    Rule {
        name: "mood_concerns",
        predicate: predicates::mood_concerns,
        questions: &[
            "Have you lost interest in activities you usually enjoy?",
            "Is there someone you can talk to when you are feeling low?",
        ],
        priority: 5,
        category: RuleCategory::Diagnostic,
    },
    Rule {
        name: "older_adult",
        predicate: predicates::older_adult,
        questions: &[
            "Have you had any falls in the past six months?",
            "Are you able to manage your daily routine on your own?",
        ],
        priority: 5,
        category: RuleCategory::Demographic,
    },
    Rule {
        name: "pediatric",
        predicate: predicates::pediatric,
        questions: &["Has a parent or guardian noticed changes in appetite or behavior?"],
        priority: 5,
        category: RuleCategory::Demographic,
    },
    Rule {
        name: "poor_sleep",
        predicate: predicates::poor_sleep,
        questions: &[
            "Has anything changed recently in your sleep routine or environment?",
            "Do you use screens within an hour of going to bed?",
        ],
        priority: 4,
        category: RuleCategory::Lifestyle,
    },
    Rule {
        name: "high_stress",
        predicate: predicates::high_stress,
        questions: &[
            "Have you experienced any major life changes or stressful events recently?",
            "What do you currently do to unwind at the end of the day?",
        ],
        priority: 4,
        category: RuleCategory::Lifestyle,
    },
    Rule {
        name: "low_energy",
        predicate: predicates::low_energy,
        questions: &[
            "Does your energy improve after resting?",
            "Have you changed your diet or caffeine intake recently?",
        ],
        priority: 3,
        category: RuleCategory::Lifestyle,
    },
    Rule {
        name: "catch_all",
        predicate: predicates::always,
        questions: &[
            "When do your symptoms typically occur?",
            "Are your symptoms getting better, worse, or staying the same?",
            "How do your symptoms affect your daily activities?",
        ],
        priority: 0,
        category: RuleCategory::Diagnostic,
    },
];

/// Evaluate the rule table against a context and return the ranked,
/// deduplicated question list, truncated to `max_results`.
pub fn select_questions(
    context: &PatientContext,
    rules: &[Rule],
    max_results: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, i32)> = Vec::new();
    let mut matched = 0usize;
    for rule in rules {
        if rule.matches(context) {
            matched += 1;
            for question in rule.questions {
                candidates.push((*question, rule.priority));
            }
        }
    }

    // Stable sort: ties keep first-seen (rule declaration) order.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen = std::collections::HashSet::new();
    let selected: Vec<String> = candidates
        .into_iter()
        .filter(|(text, _)| seen.insert(*text))
        .map(|(text, _)| text.to_string())
        .take(max_results)
        .collect();

    tracing::debug!(
        matched_rules = matched,
        selected = selected.len(),
        "contextual rule selection"
    );
    selected
}
