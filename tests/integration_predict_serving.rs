//! Integration tests for artifact loading and serving
//!
//! Writes realistic JSON artifacts to disk, loads them the way `serve`
//! does at startup, and drives the full router, including the fail-soft
//! startup path with artifacts missing.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::util::ServiceExt;

use catador::api::{create_router, AppState, ErrorResponse, HealthResponse, PredictResponse};
use catador::artifact::{self, Artifacts};

/// Scaler fitted on the red-wine training set (means and deviations per
/// feature, canonical order)
const SCALER_JSON: &str = r#"{
    "mean": [8.32, 0.53, 0.27, 2.54, 0.087, 15.87, 46.47, 0.9967, 3.31, 0.66, 10.42],
    "scale": [1.74, 0.18, 0.19, 1.41, 0.047, 10.46, 32.89, 0.0019, 0.15, 0.17, 1.07]
}"#;

/// Small ensemble with thresholds in scaled units: alcohol below the
/// training mean costs quality, high volatile acidity costs more
const MODEL_JSON: &str = r#"{
    "base_score": 5.64,
    "trees": [
        {"nodes": [
            {"feature": 10, "threshold": 0.0, "left": 1, "right": 2},
            {"value": -0.35},
            {"value": 0.41}
        ]},
        {"nodes": [
            {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
            {"value": 0.12},
            {"value": -0.27}
        ]}
    ]
}"#;

const RED_WINE_SAMPLE: &str = r#"{
    "fixed acidity": 7.4,
    "volatile acidity": 0.7,
    "citric acid": 0.0,
    "residual sugar": 1.9,
    "chlorides": 0.076,
    "free sulfur dioxide": 11.0,
    "total sulfur dioxide": 34.0,
    "density": 0.9978,
    "pH": 3.51,
    "sulphates": 0.56,
    "alcohol": 9.4
}"#;

/// Expected score for the sample against the artifacts above:
/// alcohol scaled (9.4 - 10.42) / 1.07 < 0 -> -0.35;
/// volatile acidity scaled (0.7 - 0.53) / 0.18 ~ 0.94 >= 0.5 -> -0.27;
/// 5.64 - 0.35 - 0.27 = 5.02
const EXPECTED_QUALITY: f64 = 5.02;

fn write_artifacts(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let model_path = dir.join("model.json");
    let scaler_path = dir.join("scaler.json");
    std::fs::File::create(&model_path)
        .expect("create model file")
        .write_all(MODEL_JSON.as_bytes())
        .expect("write model");
    std::fs::File::create(&scaler_path)
        .expect("create scaler file")
        .write_all(SCALER_JSON.as_bytes())
        .expect("write scaler");
    (model_path, scaler_path)
}

fn loaded_app(dir: &Path) -> Router {
    let (model_path, scaler_path) = write_artifacts(dir);
    let artifacts = Artifacts::load(&model_path, &scaler_path);
    assert!(artifacts.complete(), "artifacts on disk should load");
    create_router(AppState::from_artifacts(artifacts))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

async fn post_json(app: Router, uri: &str, json: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

#[test]
fn test_strict_loaders_accept_artifacts_on_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (model_path, scaler_path) = write_artifacts(dir.path());

    let model = artifact::load_model(&model_path).expect("model loads");
    assert_eq!(model.trees.len(), 2);

    let scaler = artifact::load_scaler(&scaler_path).expect("scaler loads");
    assert_eq!(scaler.mean.len(), 11);
}

#[tokio::test]
async fn test_predict_end_to_end_from_disk_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = loaded_app(dir.path());

    let (status, body) = post_json(app, "/api/predict", RED_WINE_SAMPLE).await;
    assert_eq!(status, StatusCode::OK);

    let result: PredictResponse = serde_json::from_slice(&body).expect("predict body");
    assert_eq!(result.predicted_quality, EXPECTED_QUALITY);
    assert_eq!(result.message, "prediction successful");

    let submitted: BTreeMap<String, f64> =
        serde_json::from_str::<BTreeMap<String, f64>>(RED_WINE_SAMPLE).expect("sample parses");
    assert_eq!(result.input_features, submitted);
}

#[tokio::test]
async fn test_predict_deterministic_across_requests() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (model_path, scaler_path) = write_artifacts(dir.path());
    let state = AppState::from_artifacts(Artifacts::load(&model_path, &scaler_path));

    let (_, first) = post_json(create_router(state.clone()), "/api/predict", RED_WINE_SAMPLE).await;
    let (_, second) = post_json(create_router(state), "/api/predict", RED_WINE_SAMPLE).await;

    let first: PredictResponse = serde_json::from_slice(&first).expect("predict body");
    let second: PredictResponse = serde_json::from_slice(&second).expect("predict body");
    assert_eq!(first.predicted_quality, second.predicted_quality);
}

#[tokio::test]
async fn test_predict_missing_alcohol_reports_exact_key() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = loaded_app(dir.path());

    let mut payload: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(RED_WINE_SAMPLE).expect("sample parses");
    payload.remove("alcohol");
    let text = serde_json::to_string(&payload).expect("serialize");

    let (status, body) = post_json(app, "/api/predict", &text).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_slice(&body).expect("error body");
    assert_eq!(error.missing_features, Some(vec!["alcohol".to_string()]));
}

#[tokio::test]
async fn test_fail_soft_startup_without_artifacts() {
    // Point the loader at paths that do not exist: the server still comes
    // up, health answers, predict and model-info report unavailable
    let dir = tempfile::tempdir().expect("temp dir");
    let artifacts = Artifacts::load(
        &dir.path().join("missing-model.json"),
        &dir.path().join("missing-scaler.json"),
    );
    assert!(!artifacts.complete());
    let state = AppState::from_artifacts(artifacts);

    let (status, body) = get_json(create_router(state.clone()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).expect("health body");
    assert_eq!(health.status, "healthy");
    assert!(!health.model_loaded);
    assert!(!health.scaler_loaded);

    let (status, _) = get_json(create_router(state.clone()), "/api/info").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = post_json(create_router(state), "/api/predict", RED_WINE_SAMPLE).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_partial_artifacts_still_unavailable_for_predict() {
    // Scaler loads, model does not: predict must not attempt partial work
    let dir = tempfile::tempdir().expect("temp dir");
    let (_, scaler_path) = write_artifacts(dir.path());
    let artifacts = Artifacts::load(&dir.path().join("missing-model.json"), &scaler_path);
    assert!(artifacts.scaler.is_some());
    assert!(artifacts.model.is_none());
    let state = AppState::from_artifacts(artifacts);

    let (status, body) = post_json(create_router(state), "/api/predict", RED_WINE_SAMPLE).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: ErrorResponse = serde_json::from_slice(&body).expect("error body");
    assert_eq!(error.error, "Model not loaded");
}

#[tokio::test]
async fn test_corrupt_model_artifact_is_fail_soft() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (model_path, scaler_path) = write_artifacts(dir.path());
    std::fs::write(&model_path, "corrupted bytes").expect("overwrite model");

    let artifacts = Artifacts::load(&model_path, &scaler_path);
    assert!(artifacts.model.is_none());
    assert!(artifacts.scaler.is_some());

    let (status, _) = get_json(
        create_router(AppState::from_artifacts(artifacts)),
        "/health",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
