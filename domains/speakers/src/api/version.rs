//! API version negotiation
//!
//! Clients pick a version with the `api-version` query parameter or the
//! `X-Version` header; the query parameter wins when both are present and
//! `1.0` applies when neither is.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, HeaderMap, HeaderName, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const VERSION_QUERY_PARAM: &str = "api-version";
pub const VERSION_HEADER: HeaderName = HeaderName::from_static("x-version");
pub const SUPPORTED_VERSIONS_HEADER: HeaderName = HeaderName::from_static("api-supported-versions");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    #[default]
    V1_0,
    V1_1,
}

impl ApiVersion {
    pub const SUPPORTED: [ApiVersion; 2] = [ApiVersion::V1_0, ApiVersion::V1_1];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1_0 => "1.0",
            ApiVersion::V1_1 => "1.1",
        }
    }

    /// Value advertised in `api-supported-versions`
    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(ApiVersion::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Pick the requested version from a request's URI and headers
    pub fn negotiate(uri: &Uri, headers: &HeaderMap) -> Result<Self, UnsupportedApiVersion> {
        let from_query = Query::<HashMap<String, String>>::try_from_uri(uri)
            .ok()
            .and_then(|Query(params)| params.get(VERSION_QUERY_PARAM).cloned());

        let requested = match from_query {
            Some(value) => Some(value),
            None => headers
                .get(&VERSION_HEADER)
                .map(|v| {
                    v.to_str()
                        .map(str::to_string)
                        .map_err(|_| UnsupportedApiVersion("<non-ascii>".to_string()))
                })
                .transpose()?,
        };

        match requested {
            Some(value) => value.parse(),
            None => Ok(ApiVersion::default()),
        }
    }
}

impl fmt::Display for ApiVersion {
    #[mutants::skip] // Delegates to as_str()
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = UnsupportedApiVersion;

    /// Accepts `1`, `1.0` and `1.1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(ApiVersion::V1_0),
            "1.1" => Ok(ApiVersion::V1_1),
            other => Err(UnsupportedApiVersion(other.to_string())),
        }
    }
}

/// Rejection for a version this API does not serve
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The HTTP resource does not support the API version '{0}'")]
pub struct UnsupportedApiVersion(pub String);

impl IntoResponse for UnsupportedApiVersion {
    fn into_response(self) -> Response {
        tracing::debug!(requested = %self.0, "Unsupported API version requested");

        let body = Json(json!({
            "error": {
                "code": "UNSUPPORTED_API_VERSION",
                "message": self.to_string(),
            }
        }));

        (
            StatusCode::BAD_REQUEST,
            [(SUPPORTED_VERSIONS_HEADER, ApiVersion::supported_list())],
            body,
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = UnsupportedApiVersion;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ApiVersion::negotiate(&parts.uri, &parts.headers)
    }
}
