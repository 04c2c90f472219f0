use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use risk_scoring::{scoring_router, ClinicalPredictor, LogisticModel};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> axum::Router {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/model.json");
    let model = LogisticModel::from_path(path).expect("bundled model loads");
    scoring_router(Arc::new(ClinicalPredictor::new(Arc::new(model))))
}

async fn post_assess(body: &str) -> Response {
    router()
        .oneshot(
            Request::post("/assess-risk")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn empty_body_is_moderate_risk() {
    let response = post_assess("{}").await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "riskScore": 0.45, "label": "Moderate Risk" }));
}

#[tokio::test]
async fn every_risk_factor_clamps_to_one() {
    let body = json!({
        "age": 60,
        "familyHistory": "yes",
        "geneticMutation": "yes",
        "bmi": 35,
        "hormoneTherapy": "yes",
        "menarcheAge": 10,
        "menopauseAge": 45,
        "children": "2"
    });
    let response = post_assess(&body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["riskScore"].as_f64(), Some(1.0));
    assert_eq!(payload["label"], "High Risk");
}

#[tokio::test]
async fn ongoing_and_unparseable_menopause_differ_by_five_hundredths() {
    let base = json!({ "age": 40, "bmi": 24, "menarcheAge": 13, "children": "1" });

    let mut ongoing = base.clone();
    ongoing["menopauseAge"] = json!("ongoing");
    let mut garbage = base;
    garbage["menopauseAge"] = json!("abc");

    let ongoing = read_json_body(post_assess(&ongoing.to_string()).await).await;
    let garbage_response = post_assess(&garbage.to_string()).await;
    assert_eq!(garbage_response.status(), StatusCode::OK);
    let garbage = read_json_body(garbage_response).await;

    // 0.1 age + 0.05 bmi, plus 0.05 for ongoing
    assert_eq!(garbage, json!({ "riskScore": 0.15, "label": "Low Risk" }));
    assert_eq!(ongoing, json!({ "riskScore": 0.2, "label": "Moderate Risk" }));
}

#[tokio::test]
async fn uncoercible_age_is_a_processing_error() {
    let response = post_assess(r#"{"age": "sixty"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "error": "Failed to process input: invalid integer for age: \"sixty\"" })
    );
}

#[tokio::test]
async fn array_body_is_a_processing_error() {
    let response = post_assess("[1, 2, 3]").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .starts_with("Failed to process input:"));
}

#[tokio::test]
async fn repeated_assessments_are_identical() {
    let body = r#"{"age": "52", "bmi": "29.9", "familyHistory": "YES", "children": 0}"#;
    let first = read_json_body(post_assess(body).await).await;
    let second = read_json_body(post_assess(body).await).await;
    assert_eq!(first, second);
}
