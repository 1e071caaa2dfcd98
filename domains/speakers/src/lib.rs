//! Speakers domain: camp-scoped speakers, ownership checks, versioned listing

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Camp, NewSpeaker, Speaker, SpeakerProfile, Talk};
pub use domain::error::SpeakerError;
pub use domain::state::{AuthorizedSpeaker, LinkageChecked, ResolvedSpeaker};

// Re-export repository types
pub use repository::{
    ChangeSet, MemorySpeakerStore, PgSpeakerStore, SaveReceipt, SpeakerChange, SpeakerStore,
};

// Re-export API types
pub use api::models::{SpeakerListResponse, SpeakerModel, SpeakerUpdateModel, TalkModel};
pub use api::routes::{routes, speaker_location};
pub use api::version::ApiVersion;
pub use api::SpeakersState;
