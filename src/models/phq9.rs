use serde::{Deserialize, Serialize};

use super::enums::PhqBand;

/// PHQ-9 depression screen: nine items scored 0..=3, plus the functional
/// difficulty item asked only when any symptom item is endorsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phq9Response {
    pub q1: u8,
    pub q2: u8,
    pub q3: u8,
    pub q4: u8,
    pub q5: u8,
    pub q6: u8,
    pub q7: u8,
    pub q8: u8,
    pub q9: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
}

impl Phq9Response {
    pub fn items(&self) -> [u8; 9] {
        [
            self.q1, self.q2, self.q3, self.q4, self.q5, self.q6, self.q7, self.q8, self.q9,
        ]
    }

    /// Total score, 0..=27.
    pub fn score(&self) -> u8 {
        self.items().iter().sum()
    }

    pub fn band(&self) -> PhqBand {
        phq9_band(self.score())
    }

    /// Whether any symptom item is endorsed, which makes `difficulty` required.
    pub fn any_endorsed(&self) -> bool {
        self.items().iter().any(|&v| v > 0)
    }
}

/// Standard PHQ-9 severity banding.
pub fn phq9_band(score: u8) -> PhqBand {
    match score {
        0..=4 => PhqBand::Minimal,
        5..=9 => PhqBand::Mild,
        10..=14 => PhqBand::Moderate,
        _ => PhqBand::Severe,
    }
}
