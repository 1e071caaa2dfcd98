//! Wire models for the speakers API
//!
//! Conversions between [`Speaker`] and [`SpeakerModel`] are plain functions:
//! entity to model is total, model to entity only ever touches the profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::api::routes::speaker_location;
use crate::domain::entities::{Camp, NewSpeaker, Speaker, SpeakerProfile, Talk};
use codecamp_auth::CampUser;

/// Speaker as exchanged with clients.
///
/// `id`, `url`, `campMoniker` and `talks` are output only and ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerModel {
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub camp_moniker: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 100))]
    pub company_name: Option<String>,

    #[validate(length(max = 30))]
    pub phone_number: Option<String>,

    #[validate(length(max = 256))]
    pub website_url: Option<String>,

    #[validate(length(max = 50))]
    pub twitter_name: Option<String>,

    #[serde(rename = "gitHubName")]
    #[validate(length(max = 50))]
    pub github_name: Option<String>,

    #[validate(length(max = 4096))]
    pub bio: Option<String>,

    #[serde(rename = "headShotUrl")]
    #[validate(length(max = 256))]
    pub headshot_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talks: Option<Vec<TalkModel>>,
}

/// Payload for `PUT`.
///
/// Optional fields are tri-state: absent keeps the stored value, `null`
/// clears it and a string replaces it. Output-only keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerUpdateModel {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default, deserialize_with = "explicit")]
    #[validate(length(max = 100))]
    pub company_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit")]
    #[validate(length(max = 30))]
    pub phone_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit")]
    #[validate(length(max = 256))]
    pub website_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit")]
    #[validate(length(max = 50))]
    pub twitter_name: Option<Option<String>>,

    #[serde(rename = "gitHubName", default, deserialize_with = "explicit")]
    #[validate(length(max = 50))]
    pub github_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit")]
    #[validate(length(max = 4096))]
    pub bio: Option<Option<String>>,

    #[serde(rename = "headShotUrl", default, deserialize_with = "explicit")]
    #[validate(length(max = 256))]
    pub headshot_url: Option<Option<String>>,
}

/// Only runs when the key is present, so `null` becomes `Some(None)`
fn explicit<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkModel {
    pub id: i32,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub prerequisites: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub room: Option<String>,
}

/// v1.1 list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerListResponse {
    pub count: usize,
    pub results: Vec<SpeakerModel>,
}

impl From<Vec<SpeakerModel>> for SpeakerListResponse {
    fn from(results: Vec<SpeakerModel>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

impl From<Talk> for TalkModel {
    fn from(t: Talk) -> Self {
        Self {
            id: t.id,
            title: t.title,
            abstract_text: t.abstract_text,
            category: t.category,
            level: t.level,
            prerequisites: t.prerequisites,
            start_time: t.start_time,
            room: t.room,
        }
    }
}

impl From<Speaker> for SpeakerModel {
    fn from(s: Speaker) -> Self {
        let p = s.profile;
        Self {
            id: s.id,
            url: speaker_location(&s.camp.moniker, s.id),
            camp_moniker: s.camp.moniker,
            name: p.name,
            company_name: p.company_name,
            phone_number: p.phone_number,
            website_url: p.website_url,
            twitter_name: p.twitter_name,
            github_name: p.github_name,
            bio: p.bio,
            headshot_url: p.headshot_url,
            talks: s
                .talks
                .map(|talks| talks.into_iter().map(Into::into).collect()),
        }
    }
}

impl SpeakerModel {
    /// Editable fields as a fresh profile
    pub fn into_profile(self) -> SpeakerProfile {
        SpeakerProfile {
            name: self.name,
            company_name: self.company_name,
            phone_number: self.phone_number,
            website_url: self.website_url,
            twitter_name: self.twitter_name,
            github_name: self.github_name,
            bio: self.bio,
            headshot_url: self.headshot_url,
        }
    }

    /// Stage a new speaker under `camp`, owned by `owner`
    pub fn into_new_speaker(self, camp: Camp, owner: CampUser) -> NewSpeaker {
        NewSpeaker::new(camp, owner, self.into_profile())
    }
}

impl SpeakerUpdateModel {
    /// Apply this payload onto an existing profile; `name` always wins
    pub fn merge_into(self, profile: &mut SpeakerProfile) {
        profile.name = self.name;
        merge_field(&mut profile.company_name, self.company_name);
        merge_field(&mut profile.phone_number, self.phone_number);
        merge_field(&mut profile.website_url, self.website_url);
        merge_field(&mut profile.twitter_name, self.twitter_name);
        merge_field(&mut profile.github_name, self.github_name);
        merge_field(&mut profile.bio, self.bio);
        merge_field(&mut profile.headshot_url, self.headshot_url);
    }
}

fn merge_field(target: &mut Option<String>, incoming: Option<Option<String>>) {
    if let Some(value) = incoming {
        *target = value;
    }
}
