//! Token issuance API handler
//!
//! Implements:
//! - POST /api/auth/token - Exchange a user name and password for a bearer token

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use codecamp_common::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::backend::AuthBackend;
use crate::error::AuthError;

/// Sign-in credentials
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CredentialModel {
    #[validate(length(min = 1))]
    pub user_name: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response shape for `POST /api/auth/token`
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expiration: DateTime<Utc>,
}

/// POST /api/auth/token - Exchange credentials for a signed token
pub async fn create_token(
    State(backend): State<AuthBackend>,
    ValidatedJson(model): ValidatedJson<CredentialModel>,
) -> Result<(StatusCode, Json<TokenResponse>), AuthError> {
    let (token, expiration) = backend.issue_token(&model.user_name, &model.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token, expiration })))
}
