// ABOUTME: Integration tests for the upload, activity, health and index routes
// ABOUTME: Drives the full router with tower oneshot requests over an in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{
    create_test_resources, encode_fit, init_test_logging, memory_config, multipart_body,
    multipart_content_type, steady_samples, FitSample,
};
use fitanalysis::database::MetadataStore;
use fitanalysis::resources::ServerResources;
use fitanalysis::server::build_router;
use std::sync::Arc;
use serde_json::Value;
use tower::ServiceExt;

async fn test_router() -> Router {
    build_router(create_test_resources(memory_config()).await)
}

fn upload_request(uri: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body("file", file_name, contents)))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_upload_returns_series_and_metrics() {
    let fit = encode_fit(&[
        FitSample::new(0, Some(100), Some(150)),
        FitSample::new(1, Some(101), Some(151)),
        FitSample::new(2, None, Some(152)),
    ]);

    let (status, body) = send(
        test_router().await,
        upload_request("/upload?threshold_power=200", "ride.fit", &fit),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["timestamps"],
        serde_json::json!(["2025-07-05 10:00:00", "2025-07-05 10:00:01", "2025-07-05 10:00:02"])
    );
    assert_eq!(body["power"], serde_json::json!([150.0, 151.0, 152.0]));
    assert_eq!(body["heart_rate"], serde_json::json!([100.0, 101.0, null]));
    assert_eq!(body["metrics"]["status"], "ok");
    assert_eq!(body["metrics"]["threshold_power"], 200.0);
    assert_eq!(body["summary"]["record_count"], 3);
    assert!(body.get("recorded").is_none());
}

#[tokio::test]
async fn test_upload_trailing_slash_without_threshold() {
    let fit = encode_fit(&steady_samples(10, 200, 130));
    let (status, body) = send(
        test_router().await,
        upload_request("/upload/", "RIDE.FIT", &fit),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["metrics"].is_null());
    assert_eq!(body["power"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_upload_invalid_threshold_is_reported_in_status() {
    let fit = encode_fit(&steady_samples(60, 100, 120));
    let (status, body) = send(
        test_router().await,
        upload_request("/upload?threshold_power=-5", "ride.fit", &fit),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["status"], "invalid_threshold");
    assert!(body["metrics"]["tss"].is_null());
}

#[tokio::test]
async fn test_upload_without_records_returns_empty_arrays() {
    let (status, body) = send(
        test_router().await,
        upload_request("/upload?threshold_power=250", "empty.fit", &encode_fit(&[])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timestamps"], serde_json::json!([]));
    assert_eq!(body["power"], serde_json::json!([]));
    assert_eq!(body["heart_rate"], serde_json::json!([]));
    assert_eq!(body["metrics"]["status"], "no_data");
}

#[tokio::test]
async fn test_upload_rejects_wrong_extension() {
    let (status, body) = send(
        test_router().await,
        upload_request("/upload", "ride.gpx", b"<gpx/>"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid file type. Please upload a .fit file."
    );
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_rejects_corrupted_file() {
    let (status, body) = send(
        test_router().await,
        upload_request("/upload", "broken.fit", b"this is not a fit file"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing file:"));
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let (status, body) = send(
        test_router().await,
        upload_request("/upload?threshold_power=250", "ride.fit", &[]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing file:"));
}

#[tokio::test]
async fn test_error_body_carries_request_id() {
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .header("x-request-id", "upload-req-1")
        .body(Body::from(multipart_body("file", "notes.txt", b"x")))
        .unwrap();

    let response = test_router().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-request-id"], "upload-req-1");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["request_id"], "upload-req-1");

    let (status, body) = send(
        test_router().await,
        Request::builder()
            .uri("/activities/missing")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["request_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body("attachment", "ride.fit", b"x")))
        .unwrap();

    let (status, body) = send(test_router().await, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let mut config = memory_config();
    config.web.max_file_size = 1024;
    let app = build_router(create_test_resources(config).await);

    let fit = encode_fit(&steady_samples(600, 200, 130));
    assert!(fit.len() > 1024);

    let (status, body) = send(app, upload_request("/upload", "big.fit", &fit)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_records_activity_once() {
    let app = test_router().await;
    let fit = encode_fit(&steady_samples(120, 220, 150));
    let uri = "/upload?threshold_power=250&activity_id=ride-42&activity_name=Tempo&activity_type=cycling";

    let (status, body) = send(app.clone(), upload_request(uri, "ride.fit", &fit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], "stored");

    let (status, body) = send(app.clone(), upload_request(uri, "ride.fit", &fit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], "already_exists");

    let list = Request::builder()
        .uri("/activities")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), list).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["activity_id"], "ride-42");
    assert_eq!(rows[0]["activity_name"], "Tempo");
    assert_eq!(rows[0]["file_path"], "ride.fit");

    let single = Request::builder()
        .uri("/activities/ride-42")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, single).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threshold_power"], 250.0);
}

#[tokio::test]
async fn test_unknown_activity_is_not_found() {
    let request = Request::builder()
        .uri("/activities/nope")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_router().await, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_index_serves_upload_page() {
    let response = test_router()
        .await
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("multipart/form-data"));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let response = test_router()
        .await
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, body) = send(
        test_router().await,
        Request::builder().uri("/ready").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_ready_reports_closed_store() {
    init_test_logging();
    let config = memory_config();
    let store = Arc::new(MetadataStore::new(&config.database).await.unwrap());
    let app = build_router(Arc::new(ServerResources::new(config, store.clone())));

    let ready = || Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, body) = send(app.clone(), ready()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    store.close().await;
    let (status, body) = send(app, ready()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}
