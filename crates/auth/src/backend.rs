//! Concrete authentication backend
//!
//! Wraps `AuthConfig` and the injected [`UserDirectory`]. Validates bearer
//! tokens and issues new ones against stored credentials.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use codecamp_common::verify_secret_hash;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::directory::UserDirectory;
use crate::error::AuthError;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
    users: Arc<dyn UserDirectory>,
}

impl AuthBackend {
    pub fn new(config: AuthConfig, users: Arc<dyn UserDirectory>) -> Self {
        Self { config, users }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// The identity-resolution capability this backend was built with
    pub fn users(&self) -> Arc<dyn UserDirectory> {
        Arc::clone(&self.users)
    }

    /// Validate a bearer token and build the request context.
    ///
    /// No account lookup happens here; handlers resolve the principal
    /// themselves when they need the account.
    pub(crate) fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;
        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(AuthContext::from(claims))
    }

    /// Exchange a user name and password for a signed token.
    pub async fn issue_token(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(String, DateTime<Utc>), AuthError> {
        let credentials = self
            .users
            .find_credentials(user_name)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_name = %user_name, "Failed to load credentials");
                AuthError::UserLoadError
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_secret_hash(password, &credentials.password_hash) {
            tracing::debug!(user_name = %user_name, "Password verification failed");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = crate::jwt::issue_jwt_token(&credentials.user_name, &self.config, Utc::now())?;
        tracing::info!(user_name = %credentials.user_name, "Token issued");
        Ok(issued)
    }
}
