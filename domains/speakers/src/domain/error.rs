//! Speaker operation failures
//!
//! Every variant is a deterministic client-facing outcome. Server-side causes
//! are logged where they happen and collapse into `PersistenceFailure`.

use codecamp_common::Error;

/// Reason returned when a fetched speaker lives under another camp
pub const NOT_IN_CAMP: &str = "Speaker not in specified Camp";

/// Reason returned when a speaker to mutate lives under another camp
pub const CAMP_MISMATCH: &str = "Speaker and Camp do not match";

pub const CAMP_NOT_FOUND: &str = "Could not find camp";
pub const ADD_FAILED: &str = "Could not add new speaker";
pub const UPDATE_FAILED: &str = "Could not update speaker";
pub const DELETE_FAILED: &str = "Could not delete speaker";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeakerError {
    #[error("Speaker not found")]
    NotFound,

    #[error("{0}")]
    LinkageMismatch(&'static str),

    #[error("{}", CAMP_NOT_FOUND)]
    ParentMissing,

    /// Surfaced exactly like a failed save; kept separate for logs and tests
    #[error("{}", ADD_FAILED)]
    IdentityUnresolved,

    #[error("Only the speaker's owner may change it")]
    Forbidden,

    #[error("{0}")]
    PersistenceFailure(&'static str),
}

impl From<SpeakerError> for Error {
    fn from(err: SpeakerError) -> Self {
        let message = err.to_string();
        match err {
            SpeakerError::NotFound => Error::NotFound(message),
            SpeakerError::Forbidden => Error::Authorization(message),
            SpeakerError::LinkageMismatch(_)
            | SpeakerError::ParentMissing
            | SpeakerError::IdentityUnresolved
            | SpeakerError::PersistenceFailure(_) => Error::BadRequest(message),
        }
    }
}
