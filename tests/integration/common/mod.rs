//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - A composed application over in-memory stores
//! - Seeded camps, accounts and speakers
//! - Authentication helpers
//! - Request builders and body parsing

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use chrono::{TimeZone, Utc};
use codecamp_auth::{AuthConfig, CampUser, MemoryUserDirectory};
use codecamp_speakers::{Camp, MemorySpeakerStore, NewSpeaker, SpeakerProfile, Talk};
use serde_json::Value;

static INIT: Once = Once::new();

pub const ISSUER: &str = "codecamp-test";
pub const AUDIENCE: &str = "codecamp";

/// Password shared by every seeded account
pub const PASSWORD: &str = "P@ssw0rd!";

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub jwt_secret: String,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
        });

        Self {
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            issuer: Some(ISSUER.to_string()),
            audience: Some(AUDIENCE.to_string()),
            token_lifetime: chrono::Duration::minutes(15),
        }
    }
}

/// Composed application over in-memory stores.
///
/// Seed data:
/// - camp `CODECAMP1` with speaker 5 (Alice Smith, owned by `alice`, one talk)
/// - camp `CODECAMP2` with speaker 7 (Carol, owned by `carol`)
/// - camp `EMPTY` with no speakers
/// - accounts `alice`, `bob`, `carol`
pub struct SpeakersTestApp {
    pub config: TestConfig,
    pub store: MemorySpeakerStore,
    pub users: MemoryUserDirectory,
}

impl SpeakersTestApp {
    pub fn new() -> Self {
        let config = TestConfig::from_env();
        let store = MemorySpeakerStore::new();
        let users = MemoryUserDirectory::new();

        let camp1 = Camp::new(1, "CODECAMP1", "Atlanta Code Camp");
        let camp2 = Camp::new(2, "CODECAMP2", "Portland Code Camp");
        store.add_camp(camp1.clone());
        store.add_camp(camp2.clone());
        store.add_camp(Camp::new(3, "EMPTY", "Empty Code Camp"));

        let alice = CampUser::new("alice");
        let carol = CampUser::new("carol");
        users.insert_with_password(alice.clone(), PASSWORD);
        users.insert_with_password(CampUser::new("bob"), PASSWORD);
        users.insert_with_password(carol.clone(), PASSWORD);

        let mut profile = SpeakerProfile::named("Alice Smith");
        profile.company_name = Some("Acme".to_string());
        profile.bio = Some("Writes Rust for a living".to_string());
        store.add_speaker(NewSpeaker::new(camp1, alice, profile).into_speaker(5));
        store.add_talk(
            5,
            Talk {
                id: 1,
                title: "Ownership Without Tears".to_string(),
                abstract_text: "Borrowing, moving and lifetimes in practice".to_string(),
                category: Some("Languages".to_string()),
                level: Some("200".to_string()),
                prerequisites: None,
                start_time: Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).single(),
                room: Some("Ballroom A".to_string()),
            },
        );

        store.add_speaker(
            NewSpeaker::new(camp2, carol, SpeakerProfile::named("Carol")).into_speaker(7),
        );

        Self {
            config,
            store,
            users,
        }
    }

    /// Fresh router sharing this app's stores
    pub fn test_router(&self) -> Router {
        codecamp_app::build_router(
            Arc::new(self.store.clone()),
            Arc::new(self.users.clone()),
            self.config.auth_config(),
        )
    }

    /// Token for `user_name` signed with the test secret
    pub fn jwt_for(&self, user_name: &str) -> String {
        create_test_jwt(user_name, &self.config.jwt_secret).unwrap()
    }
}

/// Mint a bearer token the way an external issuer would
pub fn create_test_jwt(user_name: &str, secret: &str) -> Result<String> {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct TestClaims {
        sub: String,
        iss: String,
        aud: String,
        iat: u64,
        exp: u64,
    }

    let now = Utc::now().timestamp() as u64;

    let claims = TestClaims {
        sub: user_name.to_string(),
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
        iat: now,
        exp: now + 3600, // 1 hour
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_ref());

    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

/// Build a request, optionally authenticated and optionally carrying JSON
pub fn request(method: Method, uri: &str, jwt: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = jwt {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    if let Some(b) = body {
        builder = builder.header("content-type", "application/json");
        builder
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Parse response body as JSON Value
pub async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read the raw response body
pub async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
