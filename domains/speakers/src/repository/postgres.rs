//! Postgres speaker store

use std::collections::HashMap;

use codecamp_auth::CampUser;
use codecamp_common::RepositoryError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{ChangeSet, SaveReceipt, SpeakerChange, SpeakerStore};
use crate::domain::entities::{Camp, NewSpeaker, Speaker, SpeakerProfile, Talk};

/// Speaker columns joined with the owning camp and user
const SPEAKER_SELECT: &str = "\
    SELECT s.id, s.name, s.company_name, s.phone_number, s.website_url, \
           s.twitter_name, s.github_name, s.bio, s.headshot_url, \
           c.id AS camp_id, c.moniker AS camp_moniker, c.name AS camp_name, \
           u.id AS owner_id, u.user_name AS owner_user_name, u.email AS owner_email \
    FROM speakers s \
    JOIN camps c ON c.id = s.camp_id \
    JOIN users u ON u.id = s.owner_id";

const TALK_COLUMNS: &str = "\
    speaker_id, id, title, abstract, category, level, prerequisites, start_time, room";

#[derive(Debug, sqlx::FromRow)]
struct SpeakerRow {
    id: i32,
    name: String,
    company_name: Option<String>,
    phone_number: Option<String>,
    website_url: Option<String>,
    twitter_name: Option<String>,
    github_name: Option<String>,
    bio: Option<String>,
    headshot_url: Option<String>,
    camp_id: i32,
    camp_moniker: String,
    camp_name: String,
    owner_id: Uuid,
    owner_user_name: String,
    owner_email: Option<String>,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Speaker {
            id: row.id,
            camp: Camp::new(row.camp_id, row.camp_moniker, row.camp_name),
            owner: CampUser {
                id: row.owner_id,
                user_name: row.owner_user_name,
                email: row.owner_email,
            },
            profile: SpeakerProfile {
                name: row.name,
                company_name: row.company_name,
                phone_number: row.phone_number,
                website_url: row.website_url,
                twitter_name: row.twitter_name,
                github_name: row.github_name,
                bio: row.bio,
                headshot_url: row.headshot_url,
            },
            talks: None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TalkRow {
    speaker_id: i32,
    #[sqlx(flatten)]
    talk: Talk,
}

/// Postgres-backed [`SpeakerStore`]
#[derive(Clone)]
pub struct PgSpeakerStore {
    pool: PgPool,
}

impl PgSpeakerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load talks for `speakers` in one query and attach them
    async fn attach_talks(&self, speakers: &mut [Speaker]) -> Result<(), RepositoryError> {
        let ids: Vec<i32> = speakers.iter().map(|s| s.id).collect();
        let query = format!(
            "SELECT {TALK_COLUMNS} FROM talks \
             WHERE speaker_id = ANY($1) ORDER BY start_time NULLS LAST, id"
        );
        let rows = sqlx::query_as::<_, TalkRow>(&query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_speaker: HashMap<i32, Vec<Talk>> = HashMap::new();
        for row in rows {
            by_speaker.entry(row.speaker_id).or_default().push(row.talk);
        }
        for speaker in speakers.iter_mut() {
            speaker.talks = Some(by_speaker.remove(&speaker.id).unwrap_or_default());
        }
        Ok(())
    }

    async fn insert(
        tx: &mut Transaction<'static, Postgres>,
        speaker: &NewSpeaker,
    ) -> Result<i32, RepositoryError> {
        let p = &speaker.profile;
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO speakers (
                camp_id, owner_id, name, company_name, phone_number,
                website_url, twitter_name, github_name, bio, headshot_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(speaker.camp.id)
        .bind(speaker.owner.id)
        .bind(&p.name)
        .bind(&p.company_name)
        .bind(&p.phone_number)
        .bind(&p.website_url)
        .bind(&p.twitter_name)
        .bind(&p.github_name)
        .bind(&p.bio)
        .bind(&p.headshot_url)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Camp and owner columns are never written after insert
    async fn update(
        tx: &mut Transaction<'static, Postgres>,
        speaker: &Speaker,
    ) -> Result<u64, RepositoryError> {
        let p = &speaker.profile;
        let result = sqlx::query(
            r#"
            UPDATE speakers
            SET name = $2, company_name = $3, phone_number = $4, website_url = $5,
                twitter_name = $6, github_name = $7, bio = $8, headshot_url = $9
            WHERE id = $1
            "#,
        )
        .bind(speaker.id)
        .bind(&p.name)
        .bind(&p.company_name)
        .bind(&p.phone_number)
        .bind(&p.website_url)
        .bind(&p.twitter_name)
        .bind(&p.github_name)
        .bind(&p.bio)
        .bind(&p.headshot_url)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(
        tx: &mut Transaction<'static, Postgres>,
        speaker_id: i32,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM speakers WHERE id = $1")
            .bind(speaker_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl SpeakerStore for PgSpeakerStore {
    async fn find_camp(&self, moniker: &str) -> Result<Option<Camp>, RepositoryError> {
        let camp = sqlx::query_as::<_, Camp>("SELECT id, moniker, name FROM camps WHERE moniker = $1")
            .bind(moniker)
            .fetch_optional(&self.pool)
            .await?;

        Ok(camp)
    }

    async fn list_speakers(
        &self,
        moniker: &str,
        include_talks: bool,
    ) -> Result<Vec<Speaker>, RepositoryError> {
        let query = format!("{SPEAKER_SELECT} WHERE c.moniker = $1 ORDER BY s.id");
        let rows = sqlx::query_as::<_, SpeakerRow>(&query)
            .bind(moniker)
            .fetch_all(&self.pool)
            .await?;

        let mut speakers: Vec<Speaker> = rows.into_iter().map(Into::into).collect();
        if include_talks && !speakers.is_empty() {
            self.attach_talks(&mut speakers).await?;
        }
        Ok(speakers)
    }

    async fn find_speaker(
        &self,
        speaker_id: i32,
        include_talks: bool,
    ) -> Result<Option<Speaker>, RepositoryError> {
        let query = format!("{SPEAKER_SELECT} WHERE s.id = $1");
        let row = sqlx::query_as::<_, SpeakerRow>(&query)
            .bind(speaker_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut speakers = [Speaker::from(row)];
        if include_talks {
            self.attach_talks(&mut speakers).await?;
        }
        let [speaker] = speakers;
        Ok(Some(speaker))
    }

    async fn save_all(&self, changes: ChangeSet) -> Result<SaveReceipt, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut receipt = SaveReceipt::default();

        for change in changes.into_changes() {
            match change {
                SpeakerChange::Add(speaker) => {
                    let id = Self::insert(&mut tx, &speaker).await?;
                    receipt.inserted_ids.push(id);
                    receipt.rows_affected += 1;
                }
                SpeakerChange::Update(speaker) => {
                    receipt.rows_affected += Self::update(&mut tx, &speaker).await?;
                }
                SpeakerChange::Delete(speaker_id) => {
                    receipt.rows_affected += Self::delete(&mut tx, speaker_id).await?;
                }
            }
        }

        tx.commit().await?;

        tracing::debug!(
            rows_affected = receipt.rows_affected,
            inserted = receipt.inserted_ids.len(),
            "Speaker changes committed"
        );
        Ok(receipt)
    }
}
