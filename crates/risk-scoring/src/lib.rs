//! Risk scoring for clinical measurements and lifestyle history.
//!
//! Two independent scorers share the HTTP surface built by [`router::scoring_router`]:
//! a classifier loaded once at startup ([`clinical`]) and a fixed additive rule table
//! ([`lifestyle`]).

pub mod clinical;
pub mod config;
pub mod error;
pub mod lifestyle;
pub mod model;
pub mod router;
pub mod scoring;
pub mod telemetry;

pub use clinical::{ClinicalError, ClinicalPrediction, ClinicalPredictor};
pub use lifestyle::{AssessmentError, LifestyleAssessment, LifestyleAssessor};
pub use model::{ClassifierModel, LogisticModel, ModelError, ModelMetadata};
pub use router::scoring_router;
pub use scoring::{RiskLabel, RiskResponse};
