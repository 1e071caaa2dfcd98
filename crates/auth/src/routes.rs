//! Route definitions for the authentication API

use axum::{routing::post, Router};

use crate::backend::AuthBackend;
use crate::handlers;

/// Create all authentication routes
pub fn routes() -> Router<AuthBackend> {
    Router::new().route("/api/auth/token", post(handlers::create_token))
}
