//! Classifier-backed clinical risk prediction.

mod features;

use crate::model::{ClassifierModel, ModelError};
use crate::scoring::{RiskLabel, RiskResponse};
use features::{missing_features, numeric_value, quoted_list};
use serde_json::Value;
use std::sync::Arc;

/// Probabilities strictly above this value are labelled high risk.
pub const HIGH_RISK_PROBABILITY: f64 = 0.7;

/// Validates clinical requests against the model's feature list and scores them.
pub struct ClinicalPredictor<M> {
    model: Arc<M>,
}

impl<M> ClinicalPredictor<M>
where
    M: ClassifierModel,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    pub fn predict(&self, body: &Value) -> Result<ClinicalPrediction, ClinicalError> {
        let required = self.model.feature_names();
        let fields = body.as_object();

        let missing = missing_features(required, fields);
        if !missing.is_empty() {
            return Err(ClinicalError::MissingFeatures(missing));
        }

        let mut row = Vec::with_capacity(required.len());
        for name in required {
            let value = fields
                .and_then(|fields| fields.get(name))
                .unwrap_or(&Value::Null);
            let number = numeric_value(value).ok_or_else(|| ClinicalError::InvalidFeature {
                name: name.clone(),
                value: value.to_string(),
            })?;
            row.push(number);
        }

        let probability = self.model.predict_probability(&row)?;
        Ok(ClinicalPrediction {
            probability,
            label: label_for_probability(probability),
        })
    }
}

/// Unrounded model output with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClinicalPrediction {
    pub probability: f64,
    pub label: RiskLabel,
}

impl ClinicalPrediction {
    pub fn response(&self) -> RiskResponse {
        RiskResponse::new(self.probability, self.label)
    }
}

pub fn label_for_probability(probability: f64) -> RiskLabel {
    if probability > HIGH_RISK_PROBABILITY {
        RiskLabel::High
    } else {
        RiskLabel::Low
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicalError {
    #[error("Missing features: {}", quoted_list(.0))]
    MissingFeatures(Vec<String>),
    #[error("feature {name} must be numeric (found {value})")]
    InvalidFeature { name: String, value: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}
