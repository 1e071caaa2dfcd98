//! Speaker API handlers
//!
//! Reads are public. Writes require a bearer token and only ever reach the
//! store through [`AuthorizedSpeaker`] or, for create, a resolved camp and
//! owner. Store failures during writes are logged here and reported with the
//! operation's fixed reason; nothing else about them reaches the client.

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use codecamp_auth::AuthUser;
use codecamp_common::{RepositoryError, Result, ValidatedJson};
use serde::{de, Deserialize, Deserializer};

use crate::api::middleware::SpeakersState;
use crate::api::models::{SpeakerListResponse, SpeakerModel, SpeakerUpdateModel};
use crate::api::routes::speaker_location;
use crate::api::version::ApiVersion;
use crate::domain::error::{
    SpeakerError, ADD_FAILED, CAMP_MISMATCH, DELETE_FAILED, NOT_IN_CAMP, UPDATE_FAILED,
};
use crate::domain::state::{AuthorizedSpeaker, ResolvedSpeaker};
use crate::repository::{ChangeSet, SaveReceipt};

/// Query flags shared by list and get
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerQuery {
    #[serde(default, deserialize_with = "case_insensitive_bool")]
    pub include_talks: bool,
}

/// `true`/`false` in any letter case
fn case_insensitive_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Str(&raw),
            &"true or false",
        )),
    }
}

/// Log a store error raised during a write and collapse it into `reason`
fn store_failure<'a>(
    reason: &'static str,
    moniker: &'a str,
    speaker_id: Option<i32>,
) -> impl FnOnce(RepositoryError) -> SpeakerError + 'a {
    move |e| {
        tracing::error!(
            error = %e,
            moniker = %moniker,
            speaker_id = ?speaker_id,
            reason,
            "Speaker store failed during write"
        );
        SpeakerError::PersistenceFailure(reason)
    }
}

/// Commit `changes`; an error or a commit that touched nothing is a failure
async fn commit(
    state: &SpeakersState,
    changes: ChangeSet,
    reason: &'static str,
    moniker: &str,
    speaker_id: Option<i32>,
) -> std::result::Result<SaveReceipt, SpeakerError> {
    let receipt = state
        .store
        .save_all(changes)
        .await
        .map_err(store_failure(reason, moniker, speaker_id))?;

    if !receipt.succeeded() {
        tracing::error!(
            moniker = %moniker,
            speaker_id = ?speaker_id,
            reason,
            "Speaker changes were not saved"
        );
        return Err(SpeakerError::PersistenceFailure(reason));
    }
    Ok(receipt)
}

/// Existence, then camp linkage, then ownership
async fn authorize(
    state: &SpeakersState,
    moniker: &str,
    speaker_id: i32,
    principal: &str,
    reason: &'static str,
) -> std::result::Result<AuthorizedSpeaker, SpeakerError> {
    let found = state
        .store
        .find_speaker(speaker_id, false)
        .await
        .map_err(store_failure(reason, moniker, Some(speaker_id)))?;

    ResolvedSpeaker::from_lookup(found)?
        .in_camp(moniker, CAMP_MISMATCH)?
        .owned_by(principal)
}

async fn resolve_speakers(
    state: &SpeakersState,
    moniker: &str,
    include_talks: bool,
) -> Result<Vec<SpeakerModel>> {
    let speakers = state.store.list_speakers(moniker, include_talks).await?;
    Ok(speakers.into_iter().map(Into::into).collect())
}

/// GET /api/camps/{moniker}/speakers (v1.0) - Plain list
pub async fn list_speakers(
    State(state): State<SpeakersState>,
    Path(moniker): Path<String>,
    Query(query): Query<SpeakerQuery>,
) -> Result<Json<Vec<SpeakerModel>>> {
    let models = resolve_speakers(&state, &moniker, query.include_talks).await?;
    Ok(Json(models))
}

/// GET /api/camps/{moniker}/speakers (v1.1) - List with count
pub async fn list_speakers_with_count(
    State(state): State<SpeakersState>,
    Path(moniker): Path<String>,
    Query(query): Query<SpeakerQuery>,
) -> Result<Json<SpeakerListResponse>> {
    let models = resolve_speakers(&state, &moniker, query.include_talks).await?;
    Ok(Json(models.into()))
}

/// GET /api/camps/{moniker}/speakers - Dispatch on the negotiated version
pub async fn list_speakers_versioned(
    version: ApiVersion,
    state: State<SpeakersState>,
    moniker: Path<String>,
    query: Query<SpeakerQuery>,
) -> Result<Response> {
    match version {
        ApiVersion::V1_0 => Ok(list_speakers(state, moniker, query)
            .await?
            .into_response()),
        ApiVersion::V1_1 => Ok(list_speakers_with_count(state, moniker, query)
            .await?
            .into_response()),
    }
}

/// GET /api/camps/{moniker}/speakers/{id}
pub async fn get_speaker(
    State(state): State<SpeakersState>,
    Path((moniker, speaker_id)): Path<(String, i32)>,
    Query(query): Query<SpeakerQuery>,
) -> Result<Json<SpeakerModel>> {
    let found = state
        .store
        .find_speaker(speaker_id, query.include_talks)
        .await?;

    let speaker = ResolvedSpeaker::from_lookup(found)?
        .in_camp(&moniker, NOT_IN_CAMP)?
        .into_inner();

    Ok(Json(speaker.into()))
}

/// POST /api/camps/{moniker}/speakers
pub async fn create_speaker(
    AuthUser(ctx): AuthUser,
    State(state): State<SpeakersState>,
    Path(moniker): Path<String>,
    ValidatedJson(model): ValidatedJson<SpeakerModel>,
) -> Result<(StatusCode, [(axum::http::HeaderName, String); 1], Json<SpeakerModel>)> {
    let principal = ctx.principal_name();

    let camp = state
        .store
        .find_camp(&moniker)
        .await
        .map_err(store_failure(ADD_FAILED, &moniker, None))?
        .ok_or(SpeakerError::ParentMissing)?;

    let owner = state
        .users
        .find_by_name(principal)
        .await
        .map_err(store_failure(ADD_FAILED, &moniker, None))?
        .ok_or_else(|| {
            tracing::warn!(principal = %principal, "Authenticated principal has no account");
            SpeakerError::IdentityUnresolved
        })?;

    let draft = model.into_new_speaker(camp, owner);
    let receipt = commit(
        &state,
        ChangeSet::new().add(draft.clone()),
        ADD_FAILED,
        &moniker,
        None,
    )
    .await?;

    let speaker_id = receipt
        .first_inserted_id()
        .ok_or(SpeakerError::PersistenceFailure(ADD_FAILED))?;
    let speaker = draft.into_speaker(speaker_id);
    let location = speaker_location(&speaker.camp.moniker, speaker_id);

    tracing::info!(
        moniker = %moniker,
        speaker_id,
        owner = %principal,
        "Speaker created"
    );

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(speaker.into()),
    ))
}

/// PUT /api/camps/{moniker}/speakers/{id}
pub async fn update_speaker(
    AuthUser(ctx): AuthUser,
    State(state): State<SpeakersState>,
    Path((moniker, speaker_id)): Path<(String, i32)>,
    ValidatedJson(model): ValidatedJson<SpeakerUpdateModel>,
) -> Result<Json<SpeakerModel>> {
    let mut speaker = authorize(
        &state,
        &moniker,
        speaker_id,
        ctx.principal_name(),
        UPDATE_FAILED,
    )
    .await?
    .into_inner();

    model.merge_into(&mut speaker.profile);

    commit(
        &state,
        ChangeSet::new().update(speaker.clone()),
        UPDATE_FAILED,
        &moniker,
        Some(speaker_id),
    )
    .await?;

    tracing::info!(moniker = %moniker, speaker_id, "Speaker updated");
    Ok(Json(speaker.into()))
}

/// DELETE /api/camps/{moniker}/speakers/{id}
pub async fn delete_speaker(
    AuthUser(ctx): AuthUser,
    State(state): State<SpeakersState>,
    Path((moniker, speaker_id)): Path<(String, i32)>,
) -> Result<StatusCode> {
    let speaker = authorize(
        &state,
        &moniker,
        speaker_id,
        ctx.principal_name(),
        DELETE_FAILED,
    )
    .await?;

    commit(
        &state,
        ChangeSet::new().remove(speaker.speaker().id),
        DELETE_FAILED,
        &moniker,
        Some(speaker_id),
    )
    .await?;

    tracing::info!(moniker = %moniker, speaker_id, "Speaker deleted");
    Ok(StatusCode::OK)
}
