use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use risk_scoring::{scoring_router, ClassifierModel, ClinicalPredictor, ModelMetadata};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Serialize)]
pub(crate) struct ModelInfoResponse {
    #[serde(flatten)]
    pub(crate) metadata: ModelMetadata,
    pub(crate) uptime_seconds: i64,
}

pub(crate) fn with_operational_routes<M>(predictor: Arc<ClinicalPredictor<M>>) -> axum::Router
where
    M: ClassifierModel + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    scoring_router(predictor)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/model", axum::routing::get(model_info_endpoint))
        .layer(cors)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn model_info_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ModelInfoResponse> {
    let metadata = state.model.as_ref().clone();
    let uptime_seconds = (Utc::now() - metadata.loaded_at).num_seconds().max(0);
    Json(ModelInfoResponse {
        metadata,
        uptime_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use risk_scoring::LogisticModel;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn bundled_model() -> LogisticModel {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/model.json");
        LogisticModel::from_path(path).expect("bundled model loads")
    }

    fn app(ready: bool) -> axum::Router {
        let model = bundled_model();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(
                metrics_exporter_prometheus::PrometheusBuilder::new()
                    .build_recorder()
                    .handle(),
            ),
            model: Arc::new(model.metadata().clone()),
        };
        with_operational_routes(Arc::new(ClinicalPredictor::new(Arc::new(model))))
            .layer(Extension(state))
    }

    async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn model_info_lists_features_in_order() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/model")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["model_type"], "logistic_regression");
        assert_eq!(payload["feature_names"][0], "ClumpThickness");
        assert_eq!(
            payload["feature_names"]
                .as_array()
                .expect("feature list")
                .len(),
            9
        );
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = app(true)
            .oneshot(
                Request::post("/assess-risk")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("cors header"),
            "*"
        );
    }
}
