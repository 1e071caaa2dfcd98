//! Request extractors shared by the CodeCamp routers

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::Error;

/// JSON body that has already passed its `validator` rules.
///
/// Malformed JSON and rule violations answer 400 `VALIDATION_ERROR`. A body
/// cut off by the request size limit answers 413 so clients can tell the two
/// apart.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// The body could not be read or parsed
    Body(JsonRejection),
    /// The body parsed but broke a field rule
    Invalid(ValidationErrors),
}

impl From<ValidatedJsonRejection> for Error {
    fn from(rejection: ValidatedJsonRejection) -> Self {
        match rejection {
            ValidatedJsonRejection::Body(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Error::PayloadTooLarge(e.body_text())
            }
            ValidatedJsonRejection::Body(e) => Error::Validation(e.body_text()),
            ValidatedJsonRejection::Invalid(e) => {
                Error::Validation(format!("Validation failed: {}", e))
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        Error::from(self).into_response()
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Body)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}
