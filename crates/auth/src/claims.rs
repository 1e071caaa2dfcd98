//! JWT claims types

use serde::{Deserialize, Serialize};

/// JWT claims issued and accepted by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampClaims {
    /// Subject (principal user name)
    pub sub: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}
