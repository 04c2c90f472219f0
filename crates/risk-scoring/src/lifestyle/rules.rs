use super::request::{LifestyleProfile, MenopauseStatus};
use super::ScoreComponent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskFactor {
    Age,
    FamilyHistory,
    GeneticMutation,
    Bmi,
    HormoneTherapy,
    MenarcheAge,
    MenopauseAge,
    Children,
}

/// Applies the additive rule table in a fixed order, returning the fired rules and the
/// unclamped total.
pub(crate) fn score_profile(profile: &LifestyleProfile) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::new();
    let mut total = 0.0_f64;

    let mut add = |factor: RiskFactor, weight: f64, notes: String| {
        total += weight;
        components.push(ScoreComponent {
            factor,
            weight,
            notes,
        });
    };

    if profile.age > 50 {
        add(RiskFactor::Age, 0.2, format!("age {} over 50", profile.age));
    } else {
        add(RiskFactor::Age, 0.1, format!("age {} at or under 50", profile.age));
    }

    if profile.family_history == "yes" {
        add(
            RiskFactor::FamilyHistory,
            0.2,
            "family history reported".to_string(),
        );
    }

    if profile.genetic_mutation == "yes" {
        add(
            RiskFactor::GeneticMutation,
            0.3,
            "genetic mutation reported".to_string(),
        );
    }

    if profile.bmi > 30.0 {
        add(RiskFactor::Bmi, 0.2, format!("bmi {:.1} over 30", profile.bmi));
    } else {
        add(
            RiskFactor::Bmi,
            0.05,
            format!("bmi {:.1} at or under 30", profile.bmi),
        );
    }

    if profile.hormone_therapy == "yes" {
        add(
            RiskFactor::HormoneTherapy,
            0.1,
            "hormone therapy reported".to_string(),
        );
    }

    if profile.menarche_age <= 12 {
        add(
            RiskFactor::MenarcheAge,
            0.1,
            format!("menarche at {} (12 or earlier)", profile.menarche_age),
        );
    }

    match &profile.menopause {
        MenopauseStatus::Ongoing => add(
            RiskFactor::MenopauseAge,
            0.05,
            "menopause not yet reached".to_string(),
        ),
        MenopauseStatus::Age(age) if *age < 50 => add(
            RiskFactor::MenopauseAge,
            0.1,
            format!("menopause at {age} (before 50)"),
        ),
        MenopauseStatus::Age(_) | MenopauseStatus::Unrecognized(_) => {}
    }

    if profile.children == "0" {
        add(RiskFactor::Children, 0.1, "no children".to_string());
    }

    (components, total)
}
