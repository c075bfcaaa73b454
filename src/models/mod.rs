pub mod enums;
pub mod patient;
pub mod phq9;
pub mod question;
pub mod questionnaire;

pub use patient::{
    AppetiteMetrics, EnergyMetrics, HealthMetrics, MoodMetrics, PatientInfo, SleepMetrics, Symptom,
};
pub use phq9::{phq9_band, Phq9Response};
pub use question::Question;
pub use questionnaire::PatientQuestionnaire;
