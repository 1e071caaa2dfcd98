//! Token issuance and bearer authentication integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::common::{create_test_jwt, parse_body, request, SpeakersTestApp, PASSWORD};

#[tokio::test]
async fn test_issued_token_authenticates_update() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(request(
            Method::POST,
            "/api/auth/token",
            None,
            Some(json!({ "userName": "alice", "password": PASSWORD })),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = parse_body(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expiration"].as_str().is_some());

    let resp = app
        .test_router()
        .oneshot(request(
            Method::PUT,
            "/api/camps/CODECAMP1/speakers/5",
            Some(&token),
            Some(json!({ "name": "Alice via token" })),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        app.store.speaker(5).unwrap().profile.name,
        "Alice via token"
    );
}

#[tokio::test]
async fn test_bad_credentials_return_400() {
    let app = SpeakersTestApp::new();

    for credentials in [
        json!({ "userName": "alice", "password": "wrong" }),
        json!({ "userName": "nobody", "password": PASSWORD }),
    ] {
        let resp = app
            .test_router()
            .oneshot(request(Method::POST, "/api/auth/token", None, Some(credentials)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["message"], "Failed to create token");
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = SpeakersTestApp::new();
    let forged = create_test_jwt("alice", "some_other_secret").unwrap();

    let resp = app
        .test_router()
        .oneshot(request(
            Method::DELETE,
            "/api/camps/CODECAMP1/speakers/5",
            Some(&forged),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.speaker(5).is_some());
}

#[tokio::test]
async fn test_reads_need_no_token() {
    let app = SpeakersTestApp::new();

    let resp = app
        .test_router()
        .oneshot(request(Method::GET, "/api/camps/CODECAMP2/speakers/7", None, None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}
