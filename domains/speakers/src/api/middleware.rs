//! Speakers domain state, auth backend integration and response middleware

use std::sync::Arc;

use axum::{
    extract::{FromRef, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use codecamp_auth::{AuthBackend, UserDirectory};

use crate::api::version::{ApiVersion, SUPPORTED_VERSIONS_HEADER};
use crate::repository::SpeakerStore;

/// Application state for the Speakers domain
#[derive(Clone)]
pub struct SpeakersState {
    pub store: Arc<dyn SpeakerStore>,
    pub users: Arc<dyn UserDirectory>,
    pub auth: AuthBackend,
}

impl SpeakersState {
    /// Identity resolution comes from the auth backend's directory
    pub fn new(store: Arc<dyn SpeakerStore>, auth: AuthBackend) -> Self {
        Self {
            store,
            users: auth.users(),
            auth,
        }
    }
}

impl FromRef<SpeakersState> for AuthBackend {
    fn from_ref(state: &SpeakersState) -> Self {
        state.auth.clone()
    }
}

/// Advertise the versions this router serves on every response
pub async fn advertise_api_versions(mut response: Response) -> Response {
    if let Ok(value) = HeaderValue::from_str(&ApiVersion::supported_list()) {
        response
            .headers_mut()
            .insert(SUPPORTED_VERSIONS_HEADER, value);
    }
    response
}

/// Reject requests that ask for a version this router does not serve
pub async fn require_supported_version(
    version: ApiVersion,
    request: Request,
    next: Next,
) -> Response {
    tracing::trace!(api_version = %version, "API version negotiated");
    next.run(request).await
}
