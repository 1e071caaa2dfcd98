//! CodeCamp application composition root
//!
//! Composes the auth and speakers routers into a single application and
//! provides the shared HTTP layers both binaries install.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use codecamp_auth::{AuthBackend, AuthConfig, PgUserDirectory, UserDirectory};
use codecamp_common::Config;
use codecamp_speakers::{PgSpeakerStore, SpeakerStore, SpeakersState};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router backed by Postgres
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig::from(&config);
    let store: Arc<dyn SpeakerStore> = Arc::new(PgSpeakerStore::new(pool.clone()));
    let users: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(pool));

    Ok(build_router(store, users, auth_config))
}

/// Wire the domain routers around already-constructed capabilities
pub fn build_router(
    store: Arc<dyn SpeakerStore>,
    users: Arc<dyn UserDirectory>,
    auth_config: AuthConfig,
) -> Router {
    let auth = AuthBackend::new(auth_config, users);
    let speakers_state = SpeakersState::new(store, auth.clone());

    Router::new()
        .route("/health", get(health_check))
        .merge(codecamp_auth::routes().with_state(auth))
        .merge(codecamp_speakers::routes().with_state(speakers_state))
}

/// CORS layer from a comma-separated origin list, or `*` for any origin
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-version"),
        ])
        .expose_headers([
            header::LOCATION,
            HeaderName::from_static("api-supported-versions"),
        ]);

    if allowed_origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
