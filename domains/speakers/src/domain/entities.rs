//! Domain entities for the Speakers domain
//!
//! A [`Speaker`] always hangs off exactly one [`Camp`] and is owned by exactly
//! one [`CampUser`]. Both links are fixed when the speaker is created; only the
//! [`SpeakerProfile`] changes afterwards.

use chrono::{DateTime, Utc};
use codecamp_auth::CampUser;
use serde::{Deserialize, Serialize};

/// Camp entity, identified externally by its moniker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Camp {
    pub id: i32,
    pub moniker: String,
    pub name: String,
}

impl Camp {
    pub fn new(id: i32, moniker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            moniker: moniker.into(),
            name: name.into(),
        }
    }
}

/// Talk entity (read-only from the speakers API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Talk {
    pub id: i32,
    pub title: String,
    #[sqlx(rename = "abstract")]
    pub abstract_text: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub prerequisites: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub room: Option<String>,
}

/// The client-editable part of a speaker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerProfile {
    pub name: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub twitter_name: Option<String>,
    pub github_name: Option<String>,
    pub bio: Option<String>,
    pub headshot_url: Option<String>,
}

impl SpeakerProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Speaker entity
///
/// `talks` is `None` when the talks were not requested from the store and
/// `Some` (possibly empty) when they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub id: i32,
    pub camp: Camp,
    pub owner: CampUser,
    pub profile: SpeakerProfile,
    pub talks: Option<Vec<Talk>>,
}

impl Speaker {
    /// Whether this speaker is recorded under the camp with `moniker`
    pub fn belongs_to_camp(&self, moniker: &str) -> bool {
        self.camp.moniker == moniker
    }

    /// Whether `principal` is the account that owns this speaker
    pub fn is_owned_by(&self, principal: &str) -> bool {
        self.owner.is_principal(principal)
    }
}

/// A speaker staged for insertion; the store assigns the id on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpeaker {
    pub camp: Camp,
    pub owner: CampUser,
    pub profile: SpeakerProfile,
}

impl NewSpeaker {
    pub fn new(camp: Camp, owner: CampUser, profile: SpeakerProfile) -> Self {
        Self {
            camp,
            owner,
            profile,
        }
    }

    /// Materialize the committed speaker once the store has assigned `id`
    pub fn into_speaker(self, id: i32) -> Speaker {
        Speaker {
            id,
            camp: self.camp,
            owner: self.owner,
            profile: self.profile,
            talks: None,
        }
    }
}
