//! Achievement ledger handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use scorekeeper_core::{Achievement, AchievementStatus, AchievementType};
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Achievement type listing query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAchievementsQuery {
    /// Restrict to one game.
    pub game_id: Option<i64>,
}

/// User checklist query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievementsQuery {
    /// The wallet address to build the checklist for.
    pub address: String,
    /// Restrict to one game.
    pub game_id: Option<i64>,
}

/// Completion upsert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAchievementRequest {
    /// The account completing (or un-completing) the achievement.
    pub account_id: i64,
    /// The achievement type.
    pub achievement_id: i64,
    /// The new completion state.
    pub complete: bool,
}

/// Completion check request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAchievementRequest {
    /// The wallet address to check.
    pub address: String,
    /// The achievement type.
    #[serde(alias = "type")]
    pub achievement_id: i64,
}

/// List achievement types, optionally for one game.
pub async fn list_achievement_types(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAchievementsQuery>,
) -> Result<Json<Envelope<Vec<AchievementType>>>, ApiError> {
    let types = state.store.list_achievement_types(query.game_id).await?;
    Ok(Envelope::ok(types))
}

/// Full achievement checklist for a wallet address.
///
/// Every achievement type is returned, including not-yet-attempted ones with
/// synthetic `complete = false`; an unknown address gets the same checklist
/// with nothing completed.
pub async fn user_achievements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserAchievementsQuery>,
) -> Result<Json<Envelope<Vec<AchievementStatus>>>, ApiError> {
    let account_id = state
        .store
        .get_account_by_address(query.address.trim())
        .await?
        .map(|account| account.id);

    let checklist = state
        .store
        .user_checklist(account_id, query.game_id)
        .await?;

    Ok(Envelope::ok(checklist))
}

/// Upsert a completion record for `(account, achievement type)`.
pub async fn record_achievement(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecordAchievementRequest>,
) -> Result<Json<Envelope<Achievement>>, ApiError> {
    // The two referenced entities are unrelated, so check them concurrently.
    let (account_ok, type_ok) = futures::try_join!(
        state.store.account_exists(body.account_id),
        state.store.achievement_type_exists(body.achievement_id),
    )?;
    if !account_ok {
        return Err(ApiError::NotFound("Account not found".into()));
    }
    if !type_ok {
        return Err(ApiError::NotFound("Achievement not found".into()));
    }

    let record = state
        .store
        .record_completion(body.account_id, body.achievement_id, body.complete)
        .await?;

    tracing::info!(
        account_id = record.account_id,
        achievement_id = record.achievement_id,
        complete = record.complete,
        "Achievement recorded"
    );

    Ok(Envelope::ok(record))
}

/// Check whether an address has completed an achievement.
///
/// An unknown address or a missing completion record both answer `false`
/// with `code 200` — "unknown" and "not completed" are observably identical.
pub async fn check_achievement(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckAchievementRequest>,
) -> Result<Json<Envelope<bool>>, ApiError> {
    let Some(account) = state
        .store
        .get_account_by_address(body.address.trim())
        .await?
    else {
        return Ok(Envelope::ok(false));
    };

    let complete = state
        .store
        .get_completion(account.id, body.achievement_id)
        .await?
        .is_some_and(|record| record.complete);

    Ok(Envelope::ok(complete))
}
