//! In-memory speaker store
//!
//! Used by tests and local experimentation in place of [`super::PgSpeakerStore`].
//! A change set is applied to a copy of the state and swapped in only when
//! every change applied cleanly.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use codecamp_common::RepositoryError;

use super::{ChangeSet, SaveReceipt, SpeakerChange, SpeakerStore};
use crate::domain::entities::{Camp, Speaker, Talk};

#[derive(Debug, Clone, Default)]
struct StoreState {
    camps: HashMap<String, Camp>,
    speakers: BTreeMap<i32, Speaker>,
    /// Talks keep their row even after their speaker is deleted
    talks: Vec<(Option<i32>, Talk)>,
    last_id: i32,
}

impl StoreState {
    fn with_talks(&self, mut speaker: Speaker, include_talks: bool) -> Speaker {
        speaker.talks = include_talks.then(|| {
            self.talks
                .iter()
                .filter(|(owner, _)| *owner == Some(speaker.id))
                .map(|(_, talk)| talk.clone())
                .collect()
        });
        speaker
    }

    fn apply(&mut self, change: SpeakerChange, receipt: &mut SaveReceipt) -> Result<(), RepositoryError> {
        match change {
            SpeakerChange::Add(draft) => {
                if !self.camps.contains_key(&draft.camp.moniker) {
                    return Err(RepositoryError::InvalidData(format!(
                        "camp {} does not exist",
                        draft.camp.moniker
                    )));
                }
                self.last_id += 1;
                let id = self.last_id;
                self.speakers.insert(id, draft.into_speaker(id));
                receipt.inserted_ids.push(id);
                receipt.rows_affected += 1;
            }
            SpeakerChange::Update(speaker) => {
                let existing = self
                    .speakers
                    .get_mut(&speaker.id)
                    .ok_or(RepositoryError::NotFound)?;
                existing.profile = speaker.profile;
                receipt.rows_affected += 1;
            }
            SpeakerChange::Delete(speaker_id) => {
                self.speakers
                    .remove(&speaker_id)
                    .ok_or(RepositoryError::NotFound)?;
                for (owner, _) in self.talks.iter_mut() {
                    if *owner == Some(speaker_id) {
                        *owner = None;
                    }
                }
                receipt.rows_affected += 1;
            }
        }
        Ok(())
    }
}

/// In-memory [`SpeakerStore`] with fault injection
#[derive(Debug, Clone, Default)]
pub struct MemorySpeakerStore {
    state: Arc<Mutex<StoreState>>,
    fail_commits: Arc<AtomicBool>,
    discard_commits: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl MemorySpeakerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_camp(&self, camp: Camp) {
        self.state
            .lock()
            .unwrap()
            .camps
            .insert(camp.moniker.clone(), camp);
    }

    /// Seed a speaker under its own id; later inserts get larger ids
    pub fn add_speaker(&self, speaker: Speaker) {
        let mut state = self.state.lock().unwrap();
        state.last_id = state.last_id.max(speaker.id);
        state.speakers.insert(speaker.id, Speaker { talks: None, ..speaker });
    }

    pub fn add_talk(&self, speaker_id: i32, talk: Talk) {
        self.state
            .lock()
            .unwrap()
            .talks
            .push((Some(speaker_id), talk));
    }

    /// Current stored copy of a speaker, without talks
    pub fn speaker(&self, speaker_id: i32) -> Option<Speaker> {
        self.state.lock().unwrap().speakers.get(&speaker_id).cloned()
    }

    pub fn speaker_count(&self) -> usize {
        self.state.lock().unwrap().speakers.len()
    }

    /// Make every subsequent commit fail with a store error
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent commit report zero affected rows without applying
    pub fn discard_commits(&self, discard: bool) {
        self.discard_commits.store(discard, Ordering::SeqCst);
    }

    /// Make every subsequent read fail with a store error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::InvalidData(
                "speaker store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SpeakerStore for MemorySpeakerStore {
    async fn find_camp(&self, moniker: &str) -> Result<Option<Camp>, RepositoryError> {
        self.check_reads()?;
        Ok(self.state.lock().unwrap().camps.get(moniker).cloned())
    }

    async fn list_speakers(
        &self,
        moniker: &str,
        include_talks: bool,
    ) -> Result<Vec<Speaker>, RepositoryError> {
        self.check_reads()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .speakers
            .values()
            .filter(|s| s.belongs_to_camp(moniker))
            .map(|s| state.with_talks(s.clone(), include_talks))
            .collect())
    }

    async fn find_speaker(
        &self,
        speaker_id: i32,
        include_talks: bool,
    ) -> Result<Option<Speaker>, RepositoryError> {
        self.check_reads()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .speakers
            .get(&speaker_id)
            .map(|s| state.with_talks(s.clone(), include_talks)))
    }

    async fn save_all(&self, changes: ChangeSet) -> Result<SaveReceipt, RepositoryError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(RepositoryError::InvalidData(
                "commit rejected".to_string(),
            ));
        }
        if self.discard_commits.load(Ordering::SeqCst) {
            return Ok(SaveReceipt::default());
        }

        let mut state = self.state.lock().unwrap();
        let mut staged = state.clone();
        let mut receipt = SaveReceipt::default();
        for change in changes.into_changes() {
            staged.apply(change, &mut receipt)?;
        }
        *state = staged;
        Ok(receipt)
    }
}
