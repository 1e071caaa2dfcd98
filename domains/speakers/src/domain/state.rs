//! Access gates for speaker operations
//!
//! Every operation on an existing speaker walks the same chain:
//!
//! ```text
//! lookup ──▶ ResolvedSpeaker ──in_camp──▶ LinkageChecked ──owned_by──▶ AuthorizedSpeaker
//!    │                 │                                │
//!    └─ NotFound       └─ LinkageMismatch               └─ Forbidden
//! ```
//!
//! Each stage is a distinct type, so a mutation can only be written against
//! an [`AuthorizedSpeaker`], which only exists once existence and camp linkage
//! have been checked. A non-owner probing a missing or mismatched speaker
//! therefore always sees `NotFound`/`LinkageMismatch`, never `Forbidden`.

use crate::domain::entities::Speaker;
use crate::domain::error::SpeakerError;

/// A speaker that exists in the store
#[derive(Debug, Clone)]
pub struct ResolvedSpeaker(Speaker);

/// A speaker whose camp matches the requested moniker
#[derive(Debug, Clone)]
pub struct LinkageChecked(Speaker);

/// A speaker the acting principal is allowed to mutate
#[derive(Debug, Clone)]
pub struct AuthorizedSpeaker(Speaker);

impl ResolvedSpeaker {
    /// Turn a store lookup into the first stage, or `NotFound`
    pub fn from_lookup(found: Option<Speaker>) -> Result<Self, SpeakerError> {
        found.map(Self).ok_or(SpeakerError::NotFound)
    }

    /// Check that the speaker is recorded under `moniker`.
    ///
    /// `mismatch_reason` is the reason reported to the caller; reads and
    /// writes word it differently.
    pub fn in_camp(
        self,
        moniker: &str,
        mismatch_reason: &'static str,
    ) -> Result<LinkageChecked, SpeakerError> {
        if self.0.belongs_to_camp(moniker) {
            Ok(LinkageChecked(self.0))
        } else {
            tracing::debug!(
                speaker_id = self.0.id,
                requested = %moniker,
                actual = %self.0.camp.moniker,
                "Speaker camp linkage mismatch"
            );
            Err(SpeakerError::LinkageMismatch(mismatch_reason))
        }
    }
}

impl LinkageChecked {
    /// Check that `principal` owns the speaker
    pub fn owned_by(self, principal: &str) -> Result<AuthorizedSpeaker, SpeakerError> {
        if self.0.is_owned_by(principal) {
            Ok(AuthorizedSpeaker(self.0))
        } else {
            tracing::debug!(
                speaker_id = self.0.id,
                principal = %principal,
                "Principal does not own speaker"
            );
            Err(SpeakerError::Forbidden)
        }
    }

    /// Public reads stop here
    pub fn into_inner(self) -> Speaker {
        self.0
    }
}

impl AuthorizedSpeaker {
    pub fn speaker(&self) -> &Speaker {
        &self.0
    }

    pub fn into_inner(self) -> Speaker {
        self.0
    }
}
