//! Like/dislike rating handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use scorekeeper_core::GameRating;
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Rate request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    /// The game being rated.
    pub game_id: i64,
    /// `true` for a like, `false` for a dislike.
    pub is_like: bool,
}

/// Record one like or dislike for a game.
pub async fn rate_game(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RateRequest>,
) -> Result<Json<Envelope<GameRating>>, ApiError> {
    if !state.store.game_exists(body.game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let rating = state.store.rate_game(body.game_id, body.is_like).await?;

    tracing::info!(
        game_id = rating.game_id,
        likes = rating.likes,
        dislikes = rating.dislikes,
        "Game rated"
    );

    Ok(Envelope::ok(rating))
}

/// Current like/dislike counters for a game.
pub async fn rating_stats(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<Json<Envelope<GameRating>>, ApiError> {
    if !state.store.game_exists(game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let stats = state.store.rating_stats(game_id).await?;
    Ok(Envelope::ok(stats))
}
