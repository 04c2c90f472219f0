use super::{ClassifierModel, ModelError, ModelMetadata};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOGISTIC_REGRESSION: &str = "logistic_regression";

/// On-disk form of an exported logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

fn default_model_type() -> String {
    LOGISTIC_REGRESSION.to_string()
}

/// Per-feature standardization applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Binary logistic regression scored in `f64`.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    artifact: ModelArtifact,
    metadata: ModelMetadata,
}

impl LogisticModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut model = Self::from_artifact(artifact)?;
        model.metadata.source = path.to_path_buf();
        Ok(model)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        validate(&artifact)?;

        let metadata = ModelMetadata {
            model_type: artifact.model_type.clone(),
            feature_names: artifact.feature_names.clone(),
            source: PathBuf::new(),
            loaded_at: Utc::now(),
        };

        Ok(Self { artifact, metadata })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn decision_value(&self, features: &[f64]) -> f64 {
        let ModelArtifact {
            coefficients,
            intercept,
            scaler,
            ..
        } = &self.artifact;

        features
            .iter()
            .enumerate()
            .fold(*intercept, |acc, (idx, value)| {
                let scaled = match scaler {
                    Some(scaler) => (value - scaler.mean[idx]) / scaler.scale[idx],
                    None => *value,
                };
                acc + coefficients[idx] * scaled
            })
    }
}

impl ClassifierModel for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let expected = self.artifact.feature_names.len();
        if features.len() != expected {
            return Err(ModelError::FeatureCount {
                expected,
                found: features.len(),
            });
        }

        let probability = sigmoid(self.decision_value(features));
        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(ModelError::NonFiniteProbability)
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn validate(artifact: &ModelArtifact) -> Result<(), ModelError> {
    if artifact.model_type != LOGISTIC_REGRESSION {
        return Err(ModelError::Invalid(format!(
            "unsupported model_type '{}'",
            artifact.model_type
        )));
    }

    let width = artifact.feature_names.len();
    if width == 0 {
        return Err(ModelError::Invalid(
            "feature_names must not be empty".to_string(),
        ));
    }
    if artifact.coefficients.len() != width {
        return Err(ModelError::Invalid(format!(
            "{} coefficients for {} features",
            artifact.coefficients.len(),
            width
        )));
    }
    if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ModelError::Invalid(
            "weights must be finite numbers".to_string(),
        ));
    }

    if let Some(scaler) = &artifact.scaler {
        if scaler.mean.len() != width || scaler.scale.len() != width {
            return Err(ModelError::Invalid(format!(
                "scaler shape ({}, {}) does not match {} features",
                scaler.mean.len(),
                scaler.scale.len(),
                width
            )));
        }
        if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ModelError::Invalid(
                "scaler scale entries must be finite and non-zero".to_string(),
            ));
        }
    }

    Ok(())
}
