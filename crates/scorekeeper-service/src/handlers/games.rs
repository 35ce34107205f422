//! Game catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use scorekeeper_core::GameDetails;
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// List all games with participant counts, newest first.
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<GameDetails>>>, ApiError> {
    let games = state.store.list_games().await?;
    Ok(Envelope::ok(games))
}

/// Get one game with its participant count.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<GameDetails>>, ApiError> {
    let game = state
        .store
        .get_game(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".into()))?;

    Ok(Envelope::ok(game))
}
