//! API tests
//!
//! Router-level tests driving the handlers through `tower::oneshot`.
//!
//! - endpoints: success paths over the demo artifacts
//! - error_paths: validation failures and the unavailable-artifact state


use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::util::ServiceExt;

use crate::api::{create_router, AppState};

/// Reference red-wine sample used across tests
pub(super) const RED_WINE_SAMPLE: &str = r#"{
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

/// Demo prediction for the reference sample:
/// base 5.0, alcohol 9.4 < 10 -> -0.5, volatile acidity 0.7 >= 0.6 -> -0.3
pub(super) const RED_WINE_DEMO_QUALITY: f64 = 4.2;

fn demo_app() -> Router {
    create_router(AppState::demo().expect("demo artifacts validate"))
}

fn unavailable_app() -> Router {
    create_router(AppState::unavailable())
}

async fn do_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
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

async fn do_post_json(app: Router, uri: &str, json: &str) -> (StatusCode, Vec<u8>) {
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
