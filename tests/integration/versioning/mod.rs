//! API version negotiation integration tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use tower::ServiceExt;

use crate::common::{parse_body, request, SpeakersTestApp};

#[tokio::test]
async fn test_version_header_selects_v1_1() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(
            Request::builder()
                .uri("/api/camps/CODECAMP2/speakers")
                .header("x-version", "1.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = parse_body(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Carol");
}

#[tokio::test]
async fn test_explicit_v1_0_returns_plain_array() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(request(
            Method::GET,
            "/api/camps/CODECAMP2/speakers?api-version=1.0",
            None,
            None,
        ))
        .await
        .unwrap();

    assert!(parse_body(resp).await.is_array());
}

#[tokio::test]
async fn test_unsupported_version_returns_400() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(request(
            Method::GET,
            "/api/camps/CODECAMP1/speakers?api-version=3.0",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get("api-supported-versions").unwrap(),
        "1.0, 1.1"
    );
    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "UNSUPPORTED_API_VERSION");
}

#[tokio::test]
async fn test_every_speaker_response_advertises_versions() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(request(
            Method::GET,
            "/api/camps/CODECAMP1/speakers/999",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get("api-supported-versions").unwrap(),
        "1.0, 1.1"
    );
}
