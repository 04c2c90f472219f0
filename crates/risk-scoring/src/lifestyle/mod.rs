//! Additive rule table scoring lifestyle and reproductive history.

mod request;
mod rules;

pub use request::{AssessmentError, LifestyleProfile, LifestyleRequest, MenopauseStatus};
pub use rules::RiskFactor;

use crate::scoring::{RiskLabel, RiskResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HIGH_RISK_SCORE: f64 = 0.5;
pub const MODERATE_RISK_SCORE: f64 = 0.2;

/// Stateless assessor applying the fixed rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifestyleAssessor;

impl LifestyleAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Parses, coerces and scores a raw request body.
    pub fn assess_value(&self, body: Value) -> Result<LifestyleAssessment, AssessmentError> {
        let profile = LifestyleRequest::from_value(body)?.into_profile()?;
        Ok(self.assess(&profile))
    }

    pub fn assess(&self, profile: &LifestyleProfile) -> LifestyleAssessment {
        let (components, total) = rules::score_profile(profile);
        let score = total.min(1.0);

        LifestyleAssessment {
            score,
            label: label_for_score(score),
            components,
        }
    }
}

/// Discrete contribution to a lifestyle score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub weight: f64,
    pub notes: String,
}

/// Clamped score, its label, and the rules that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleAssessment {
    pub score: f64,
    pub label: RiskLabel,
    pub components: Vec<ScoreComponent>,
}

impl LifestyleAssessment {
    pub fn response(&self) -> RiskResponse {
        RiskResponse::new(self.score, self.label)
    }
}

pub fn label_for_score(score: f64) -> RiskLabel {
    if score >= HIGH_RISK_SCORE {
        RiskLabel::High
    } else if score >= MODERATE_RISK_SCORE {
        RiskLabel::Moderate
    } else {
        RiskLabel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assess(body: Value) -> LifestyleAssessment {
        LifestyleAssessor::new()
            .assess_value(body)
            .expect("assessment succeeds")
    }

    fn weight_of(assessment: &LifestyleAssessment, factor: RiskFactor) -> Option<f64> {
        assessment
            .components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.weight)
    }

    #[test]
    fn label_boundaries() {
        assert_eq!(label_for_score(0.5), RiskLabel::High);
        assert_eq!(label_for_score(0.49), RiskLabel::Moderate);
        assert_eq!(label_for_score(0.2), RiskLabel::Moderate);
        assert_eq!(label_for_score(0.19), RiskLabel::Low);
        assert_eq!(label_for_score(0.0), RiskLabel::Low);
    }

    #[test]
    fn empty_body_scores_moderate() {
        let assessment = assess(json!({}));
        // age 0.1, bmi 0.05, menarche 0.1, menopause "0" 0.1, children 0.1
        assert!((assessment.score - 0.45).abs() < 1e-9);
        assert_eq!(assessment.label, RiskLabel::Moderate);
        assert_eq!(assessment.response().risk_score, 0.45);
    }

    #[test]
    fn high_risk_profile_clamps_to_one() {
        let assessment = assess(json!({
            "age": 60,
            "familyHistory": "yes",
            "geneticMutation": "yes",
            "bmi": 35,
            "hormoneTherapy": "yes",
            "menarcheAge": 10,
            "menopauseAge": 45,
            "children": "2"
        }));
        let unclamped: f64 = assessment.components.iter().map(|c| c.weight).sum();
        assert!((unclamped - 1.2).abs() < 1e-9);
        assert_eq!(assessment.score, 1.0);
        assert_eq!(assessment.label, RiskLabel::High);
        assert_eq!(weight_of(&assessment, RiskFactor::Children), None);
    }

    #[test]
    fn ongoing_menopause_adds_five_hundredths() {
        let assessment = assess(json!({ "menopauseAge": "ongoing" }));
        assert_eq!(weight_of(&assessment, RiskFactor::MenopauseAge), Some(0.05));
    }

    #[test]
    fn unrecognized_menopause_is_ignored() {
        let assessment = assess(json!({ "menopauseAge": "abc" }));
        assert_eq!(weight_of(&assessment, RiskFactor::MenopauseAge), None);
    }

    #[test]
    fn late_menopause_contributes_nothing() {
        let assessment = assess(json!({ "menopauseAge": 50 }));
        assert_eq!(weight_of(&assessment, RiskFactor::MenopauseAge), None);
    }

    #[test]
    fn low_risk_profile() {
        let assessment = assess(json!({
            "age": 40,
            "bmi": 22.5,
            "familyHistory": "no",
            "menarcheAge": 14,
            "menopauseAge": 52,
            "children": "3"
        }));
        // age 0.1 + bmi 0.05
        assert!((assessment.score - 0.15).abs() < 1e-9);
        assert_eq!(assessment.label, RiskLabel::Low);
    }

    #[test]
    fn answers_are_case_insensitive() {
        let assessment = assess(json!({ "familyHistory": "Yes", "hormoneTherapy": "YES" }));
        assert_eq!(weight_of(&assessment, RiskFactor::FamilyHistory), Some(0.2));
        assert_eq!(weight_of(&assessment, RiskFactor::HormoneTherapy), Some(0.1));
    }

    #[test]
    fn coercion_failure_surfaces_as_error() {
        let err = LifestyleAssessor::new()
            .assess_value(json!({ "age": "sixty" }))
            .expect_err("age is not an integer");
        assert!(matches!(err, AssessmentError::InvalidInteger { field: "age", .. }));
    }

    #[test]
    fn repeated_assessments_are_identical() {
        let body = json!({ "age": 55, "bmi": 28.4, "menopauseAge": "ongoing" });
        assert_eq!(assess(body.clone()), assess(body));
    }
}
