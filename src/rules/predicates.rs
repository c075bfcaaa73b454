//! Named rule predicates. Each is a pure function of the derived context so
//! the rule table stays declarative and every condition can be tested on
//! its own.

use crate::context::PatientContext;
use crate::models::enums::BodySystem;

pub fn always(_: &PatientContext) -> bool {
    true
}

pub fn severe_presentation(ctx: &PatientContext) -> bool {
    ctx.max_severity >= 8
}

pub fn cardiovascular_involvement(ctx: &PatientContext) -> bool {
    ctx.affected_systems.contains(&BodySystem::Cardiovascular)
}

pub fn neurological_involvement(ctx: &PatientContext) -> bool {
    ctx.affected_systems.contains(&BodySystem::Neurological)
}

pub fn multiple_symptoms(ctx: &PatientContext) -> bool {
    ctx.has_multiple_symptoms
}

pub fn mood_concerns(ctx: &PatientContext) -> bool {
    ctx.mood_concerns
}

pub fn poor_sleep(ctx: &PatientContext) -> bool {
    ctx.poor_sleep
}

pub fn high_stress(ctx: &PatientContext) -> bool {
    ctx.high_stress
}

pub fn low_energy(ctx: &PatientContext) -> bool {
    ctx.low_energy
}

pub fn older_adult(ctx: &PatientContext) -> bool {
    ctx.age >= 65
}

/// Age 0 means "no date of birth recorded" and is not treated as pediatric.
pub fn pediatric(ctx: &PatientContext) -> bool {
    (1..18).contains(&ctx.age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthMetrics, PatientInfo, Symptom};
    use chrono::NaiveDate;

    fn base_context() -> PatientContext {
        let mut symptom = Symptom::blank();
        symptom.symptom_type = "headache".into();
        symptom.severity = 3;
        PatientContext::derive(
            &PatientInfo::default(),
            &[symptom],
            &HealthMetrics::default(),
            None,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
    }

    #[test]
    fn always_is_always_true() {
        assert!(always(&base_context()));
    }

    #[test]
    fn severe_presentation_at_eight() {
        let mut ctx = base_context();
        ctx.max_severity = 7;
        assert!(!severe_presentation(&ctx));
        ctx.max_severity = 8;
        assert!(severe_presentation(&ctx));
    }

    #[test]
    fn system_predicates_follow_affected_systems() {
        let ctx = base_context();
        assert!(neurological_involvement(&ctx));
        assert!(!cardiovascular_involvement(&ctx));
    }

    #[test]
    fn age_bands() {
        let mut ctx = base_context();
        ctx.age = 0;
        assert!(!pediatric(&ctx));
        assert!(!older_adult(&ctx));
        ctx.age = 10;
        assert!(pediatric(&ctx));
        ctx.age = 17;
        assert!(pediatric(&ctx));
        ctx.age = 18;
        assert!(!pediatric(&ctx));
        ctx.age = 65;
        assert!(older_adult(&ctx));
    }
}
