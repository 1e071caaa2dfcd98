//! Route definitions for Speakers domain API

use axum::{
    middleware::{from_fn, map_response},
    routing::get,
    Router,
};

use super::handlers::speakers;
use super::middleware::{advertise_api_versions, require_supported_version, SpeakersState};

/// Canonical location of a speaker, used for `Location` headers and model urls
pub fn speaker_location(moniker: &str, speaker_id: i32) -> String {
    format!("/api/camps/{moniker}/speakers/{speaker_id}")
}

/// Create all Speakers domain API routes
pub fn routes() -> Router<SpeakersState> {
    Router::new()
        .route(
            "/api/camps/{moniker}/speakers",
            get(speakers::list_speakers_versioned).post(speakers::create_speaker),
        )
        .route(
            "/api/camps/{moniker}/speakers/{id}",
            get(speakers::get_speaker)
                .put(speakers::update_speaker)
                .delete(speakers::delete_speaker),
        )
        .route_layer(from_fn(require_supported_version))
        .layer(map_response(advertise_api_versions))
}
