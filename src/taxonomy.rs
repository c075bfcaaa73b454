//! Symptom catalog and body-system pattern matcher.
//!
//! Matching is case-insensitive substring containment in both directions
//! (`symptom.contains(pattern) || pattern.contains(symptom)`). That is
//! deliberately loose: short patterns can light up more than one system
//! ("shortness of breath" tags both cardiovascular and respiratory), and
//! the tests below pin the behavior so any tightening is a conscious change.

use std::collections::BTreeSet;

use crate::models::enums::BodySystem;

/// The full symptom catalog offered to the patient, grouped by system.
pub const SYMPTOM_TYPES: &[&str] = &[
    // Neurological
    "headache",
    "dizziness",
    "confusion",
    "memory issues",
    "sensitivity to light",
    "sensitivity to sound",
    "balance problems",
    "concentration difficulty",
    "seizure",
    "weakness",
    "numbness",
    "tingling",
    "speech problems",
    "vision changes",
    // Gastrointestinal
    "nausea",
    "vomiting",
    "abdominal pain",
    "diarrhea",
    "constipation",
    "loss of appetite",
    "bloating",
    "heartburn",
    "difficulty swallowing",
    // Cardiovascular/Respiratory
    "chest pain",
    "shortness of breath",
    "cough",
    "palpitations",
    "rapid heartbeat",
    "swelling legs",
    "fatigue",
    "exercise intolerance",
    // Musculoskeletal
    "joint pain",
    "muscle pain",
    "back pain",
    "neck pain",
    "stiffness",
    "swelling joints",
    // Constitutional
    "fever",
    "chills",
    "night sweats",
    "weight loss",
    "weight gain",
    "mood changes",
    "sleep disturbance",
    "anxiety",
    "depression",
    // Genitourinary
    "urinary frequency",
    "urinary urgency",
    "painful urination",
    "blood in urine",
    // Other
    "skin rash",
    "lump or mass",
    "other",
];

/// Per-system keyword lists driving the matcher.
const SYSTEM_PATTERNS: &[(BodySystem, &[&str])] = &[
    (
        BodySystem::Neurological,
        &[
            "headache",
            "dizziness",
            "confusion",
            "memory issues",
            "sensitivity to light",
            "sensitivity to sound",
            "balance problems",
            "seizure",
            "weakness",
            "numbness",
            "speech problems",
            "vision changes",
        ],
    ),
    (
        BodySystem::Cardiovascular,
        &[
            "chest pain",
            "shortness of breath",
            "palpitations",
            "rapid heartbeat",
            "swelling legs",
        ],
    ),
    (
        BodySystem::Gastrointestinal,
        &[
            "nausea",
            "vomiting",
            "abdominal pain",
            "diarrhea",
            "constipation",
            "loss of appetite",
        ],
    ),
    (BodySystem::Respiratory, &["cough", "shortness of breath"]),
    (
        BodySystem::Musculoskeletal,
        &["joint pain", "muscle pain", "back pain", "neck pain"],
    ),
    (
        BodySystem::Constitutional,
        &["fever", "chills", "fatigue", "weight loss", "weight gain"],
    ),
    (
        BodySystem::Genitourinary,
        &[
            "urinary frequency",
            "urinary urgency",
            "painful urination",
            "blood in urine",
        ],
    ),
    (BodySystem::Other, &["skin rash", "lump or mass"]),
];

/// Tag a symptom list with the body systems it touches.
/// Empty input yields an empty set; unrecognized symptoms tag nothing.
pub fn classify<S: AsRef<str>>(symptom_types: &[S]) -> BTreeSet<BodySystem> {
    let lowered: Vec<String> = symptom_types
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .filter(|s| !s.trim().is_empty())
        .collect();

    let mut systems = BTreeSet::new();
    for (system, patterns) in SYSTEM_PATTERNS {
        let hit = patterns
            .iter()
            .any(|pattern| lowered.iter().any(|s| s.contains(pattern) || pattern.contains(s.as_str())));
        if hit {
            systems.insert(*system);
        }
    }
    systems
}
