use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::clinical::{ClinicalError, ClinicalPredictor};
use crate::lifestyle::LifestyleAssessor;
use crate::model::ClassifierModel;

/// Router builder exposing the clinical and lifestyle scoring endpoints.
pub fn scoring_router<M>(predictor: Arc<ClinicalPredictor<M>>) -> Router
where
    M: ClassifierModel + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<M>))
        .route("/assess-risk", post(assess_handler))
        .with_state(predictor)
}

pub async fn predict_handler<M>(
    State(predictor): State<Arc<ClinicalPredictor<M>>>,
    Json(body): Json<Value>,
) -> Response
where
    M: ClassifierModel + 'static,
{
    match predictor.predict(&body) {
        Ok(prediction) => {
            debug!(
                probability = prediction.probability,
                label = %prediction.label,
                "clinical prediction scored"
            );
            (StatusCode::OK, Json(prediction.response())).into_response()
        }
        Err(err @ ClinicalError::MissingFeatures(_)) => {
            warn!(error = %err, "clinical request rejected");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "clinical prediction failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub async fn assess_handler(Json(body): Json<Value>) -> Response {
    match LifestyleAssessor::new().assess_value(body) {
        Ok(assessment) => {
            debug!(
                score = assessment.score,
                label = %assessment.label,
                rules = assessment.components.len(),
                "lifestyle assessment scored"
            );
            (StatusCode::OK, Json(assessment.response())).into_response()
        }
        Err(err) => {
            warn!(error = %err, "lifestyle assessment rejected");
            let payload = json!({ "error": format!("Failed to process input: {err}") });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}
