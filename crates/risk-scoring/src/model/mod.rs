//! Classifier artifacts loaded once at startup and shared read-only.

mod logistic;

pub use logistic::{LogisticModel, ModelArtifact, StandardScaler};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Trained binary classifier scored by the clinical predictor.
pub trait ClassifierModel: Send + Sync {
    /// Ordered feature names the model expects.
    fn feature_names(&self) -> &[String];

    /// Positive-class probability for a single row ordered as [`Self::feature_names`].
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// Provenance for the artifact currently being served.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("model expects {expected} features, received {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("model produced a non-finite probability")]
    NonFiniteProbability,
}
