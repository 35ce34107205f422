//! Score submission, listing, and leaderboard handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use scorekeeper_core::{
    parse_time_bound, LeaderboardEntry, RankSummary, Score, ScoreFilter, ScorePage, ScoreView,
    DEFAULT_SCORE_LIMIT, MAX_SCORE_LIMIT,
};
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Score listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScoresQuery {
    /// Restrict to one wallet address.
    pub address: Option<String>,
    /// Restrict to one game.
    pub game_id: Option<i64>,
    /// Page size (default 10, max 100).
    pub limit: Option<i64>,
    /// Inclusive lower creation-time bound: epoch milliseconds or ISO-8601.
    pub start_time: Option<String>,
    /// Inclusive upper creation-time bound: epoch milliseconds or ISO-8601.
    pub end_time: Option<String>,
}

impl ListScoresQuery {
    /// Convert into a typed filter, rejecting malformed time bounds.
    fn into_filter(self) -> Result<ScoreFilter, ApiError> {
        let start_time = self.start_time.as_deref().map(parse_time_bound).transpose()?;
        let end_time = self.end_time.as_deref().map(parse_time_bound).transpose()?;
        Ok(ScoreFilter {
            address: self.address,
            game_id: self.game_id,
            start_time,
            end_time,
            limit: self.limit,
        })
    }
}

/// Create score request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    /// The game scored in.
    pub game_id: i64,
    /// The scoring account.
    pub account_id: i64,
    /// The score value; must be non-negative.
    pub score: i64,
}

/// Create score by wallet address request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreByAddressRequest {
    /// The game scored in.
    pub game_id: i64,
    /// The scoring wallet address; the account is created on first use.
    pub address: String,
    /// The score value; must be non-negative.
    pub score: i64,
}

/// Update score request.
#[derive(Debug, Deserialize)]
pub struct UpdateScoreRequest {
    /// Replacement score value; must be non-negative.
    pub score: i64,
}

/// Current-score upsert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreByAddressRequest {
    /// The scoring wallet address.
    pub address: String,
    /// The game scored in.
    pub game_id: i64,
    /// Replacement score value; must be non-negative.
    pub score: i64,
}

/// Leaderboard query parameters.
#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    /// Maximum entries to return (default 10, max 100).
    pub limit: Option<i64>,
}

/// In-game rank request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankInGameRequest {
    /// The score row to rank.
    pub prop_id: i64,
    /// Optional inclusive lower creation-time bound on the ranked set.
    pub start_time: Option<String>,
    /// Optional inclusive upper creation-time bound on the ranked set.
    pub end_time: Option<String>,
}

/// Reject negative score values before anything touches the database.
fn validate_score_value(value: i64) -> Result<(), ApiError> {
    if value < 0 {
        return Err(ApiError::BadRequest(
            "Score must be a positive number".into(),
        ));
    }
    Ok(())
}

/// List score rows with optional filters.
pub async fn list_scores(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListScoresQuery>,
) -> Result<Json<Envelope<ScorePage>>, ApiError> {
    let filter = query.into_filter()?;
    let page = state.store.list_scores(&filter).await?;
    Ok(Envelope::ok(page))
}

/// Get a single score row.
pub async fn get_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<ScoreView>>, ApiError> {
    let score = state
        .store
        .get_score(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Score not found".into()))?;

    Ok(Envelope::ok(score))
}

/// Submit a new score row for an existing account.
pub async fn create_score(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateScoreRequest>,
) -> Result<Json<Envelope<Score>>, ApiError> {
    validate_score_value(body.score)?;

    // The two referenced entities are unrelated, so check them concurrently.
    let (game_ok, account_ok) = futures::try_join!(
        state.store.game_exists(body.game_id),
        state.store.account_exists(body.account_id),
    )?;
    if !game_ok {
        return Err(ApiError::NotFound("Game not found".into()));
    }
    if !account_ok {
        return Err(ApiError::NotFound("Account not found".into()));
    }

    let score = state
        .store
        .insert_score(body.game_id, body.account_id, body.score)
        .await?;

    tracing::info!(
        score_id = score.id,
        game_id = score.game_id,
        account_id = score.account_id,
        value = score.score,
        "Score created"
    );

    Ok(Envelope::ok(score))
}

/// Submit a new score row by wallet address, creating the account on first
/// submission.
pub async fn create_score_by_address(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateScoreByAddressRequest>,
) -> Result<Json<Envelope<Score>>, ApiError> {
    validate_score_value(body.score)?;

    let address = body.address.trim();
    if address.is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".into()));
    }

    if !state.store.game_exists(body.game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let account = state.store.find_or_create_account(address).await?;
    let score = state
        .store
        .insert_score(body.game_id, account.id, body.score)
        .await?;

    tracing::info!(
        score_id = score.id,
        game_id = score.game_id,
        address = %account.address,
        value = score.score,
        "Score created by address"
    );

    Ok(Envelope::ok(score))
}

/// Replace the value of an existing score row.
pub async fn update_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateScoreRequest>,
) -> Result<Json<Envelope<Score>>, ApiError> {
    validate_score_value(body.score)?;

    let score = state.store.update_score(id, body.score).await?;

    tracing::info!(score_id = id, value = score.score, "Score updated");

    Ok(Envelope::ok(score))
}

/// Current-score upsert: update the most recent row for the (account, game)
/// pair, or insert one when none exists.
pub async fn update_score_by_address(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateScoreByAddressRequest>,
) -> Result<Json<Envelope<Score>>, ApiError> {
    validate_score_value(body.score)?;

    if !state.store.game_exists(body.game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let account = state
        .store
        .get_account_by_address(body.address.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    let score = state
        .store
        .upsert_score_for_pair(body.game_id, account.id, body.score)
        .await?;

    tracing::info!(
        score_id = score.id,
        game_id = score.game_id,
        address = %account.address,
        value = score.score,
        "Score upserted by address"
    );

    Ok(Envelope::ok(score))
}

/// Delete a score row.
pub async fn delete_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Score>>, ApiError> {
    let score = state.store.delete_score(id).await?;

    tracing::info!(score_id = id, "Score deleted");

    Ok(Envelope::ok(score))
}

/// Per-game leaderboard: top scores descending, ties by row id.
pub async fn game_rankings(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<Envelope<Vec<LeaderboardEntry>>>, ApiError> {
    if !state.store.game_exists(game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_SCORE_LIMIT)
        .clamp(1, MAX_SCORE_LIMIT);
    let entries = state.store.leaderboard(game_id, limit).await?;

    Ok(Envelope::ok(entries))
}

/// Rank one score row within its game, optionally restricted to a
/// creation-time window.
pub async fn rank_in_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
    Json(body): Json<RankInGameRequest>,
) -> Result<Json<Envelope<RankSummary>>, ApiError> {
    let start: Option<DateTime<Utc>> =
        body.start_time.as_deref().map(parse_time_bound).transpose()?;
    let end: Option<DateTime<Utc>> = body.end_time.as_deref().map(parse_time_bound).transpose()?;

    if !state.store.game_exists(game_id).await? {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    let summary = state
        .store
        .rank_in_game(game_id, body.prop_id, start, end)
        .await?
        .unwrap_or(RankSummary::unranked());

    Ok(Envelope::ok(summary))
}
