//! Repository layer for the Speakers domain
//!
//! Handlers depend on the [`SpeakerStore`] trait only. Writes are staged in a
//! [`ChangeSet`] and applied in one call, so a request either persists all of
//! its changes or none of them.

pub mod memory;
pub mod postgres;

use codecamp_common::RepositoryError;

use crate::domain::entities::{Camp, NewSpeaker, Speaker};

pub use memory::MemorySpeakerStore;
pub use postgres::PgSpeakerStore;

/// One staged write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerChange {
    Add(NewSpeaker),
    Update(Speaker),
    Delete(i32),
}

/// Ordered list of staged writes, committed together by [`SpeakerStore::save_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<SpeakerChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, speaker: NewSpeaker) -> Self {
        self.changes.push(SpeakerChange::Add(speaker));
        self
    }

    pub fn update(mut self, speaker: Speaker) -> Self {
        self.changes.push(SpeakerChange::Update(speaker));
        self
    }

    pub fn remove(mut self, speaker_id: i32) -> Self {
        self.changes.push(SpeakerChange::Delete(speaker_id));
        self
    }

    pub fn into_changes(self) -> Vec<SpeakerChange> {
        self.changes
    }
}

/// Outcome of a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReceipt {
    pub rows_affected: u64,
    /// Ids assigned to `Add` changes, in staging order
    pub inserted_ids: Vec<i32>,
}

impl SaveReceipt {
    /// A commit that touched nothing did not succeed
    pub fn succeeded(&self) -> bool {
        self.rows_affected > 0
    }

    pub fn first_inserted_id(&self) -> Option<i32> {
        self.inserted_ids.first().copied()
    }
}

/// Persistence capability for camps, speakers and their talks
#[async_trait::async_trait]
pub trait SpeakerStore: Send + Sync {
    /// Find a camp by its moniker
    async fn find_camp(&self, moniker: &str) -> Result<Option<Camp>, RepositoryError>;

    /// All speakers recorded under `moniker`, ordered by id.
    ///
    /// Talks are loaded only when `include_talks` is set.
    async fn list_speakers(
        &self,
        moniker: &str,
        include_talks: bool,
    ) -> Result<Vec<Speaker>, RepositoryError>;

    /// Find a speaker by id regardless of camp
    async fn find_speaker(
        &self,
        speaker_id: i32,
        include_talks: bool,
    ) -> Result<Option<Speaker>, RepositoryError>;

    /// Apply every staged change atomically
    async fn save_all(&self, changes: ChangeSet) -> Result<SaveReceipt, RepositoryError>;
}
