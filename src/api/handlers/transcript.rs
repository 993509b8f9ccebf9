//! Transcript relay endpoint
//!
//! Validates the `url` query parameter and hands the fetch off to the
//! relay's retry loop. The target URL is deliberately not validated
//! beyond presence; the caller is trusted to supply a legitimate target.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::server::AppState;
use crate::error::RelayError;

/// Query parameters for the transcript endpoint
#[derive(Debug, Deserialize, Default)]
pub struct TranscriptQuery {
    pub url: Option<String>,
}

/// Fetch a transcript from the caller-supplied URL
pub async fn fetch_transcript(
    State(state): State<AppState>,
    Query(query): Query<TranscriptQuery>,
) -> Result<impl IntoResponse, RelayError> {
    let url = match query.url.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Err(RelayError::MissingUrlParameter),
    };

    let outcome = state.relay.fetch_with_retries(url).await?;
    Ok(Json(outcome))
}
