//! JWT validation, issuance, and token extraction helpers

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::CampClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate a bearer JWT signed with the configured secret
pub(crate) fn validate_jwt_token(token: &str, config: &AuthConfig) -> Result<CampClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<CampClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Sign a token for `principal`, valid for the configured lifetime
pub(crate) fn issue_jwt_token(
    principal: &str,
    config: &AuthConfig,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), AuthError> {
    let expiration = now + config.token_lifetime;

    let claims = CampClaims {
        sub: principal.to_string(),
        iat: now.timestamp().max(0) as u64,
        exp: expiration.timestamp().max(0) as u64,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign token");
        AuthError::TokenIssueFailed
    })?;

    Ok((token, expiration))
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}
