//! Global ranking handler.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use scorekeeper_core::RankSummary;
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Rank response for one wallet address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    /// 1-based rank; `0` when the address is not ranked.
    pub rank: i64,
    /// Points needed to reach the next-better rank.
    pub distance_to_next: i64,
    /// The queried wallet address.
    pub address: String,
    /// The ranked score value; `0` when not ranked.
    pub quantity: i64,
    /// Identity of the ranked score row; `0` when not ranked.
    pub prop_id: i64,
}

impl RankResponse {
    fn from_summary(address: String, summary: RankSummary) -> Self {
        Self {
            rank: summary.rank,
            distance_to_next: summary.distance_to_next,
            address,
            quantity: summary.quantity,
            prop_id: summary.prop_id,
        }
    }
}

/// Rank a wallet address across all score rows.
///
/// An address with no score rows gets the zero-valued placeholder — "not
/// ranked" is a valid state, not an error.
pub async fn get_rank(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Envelope<RankResponse>>, ApiError> {
    let summary = state
        .store
        .rank_by_address(&address)
        .await?
        .unwrap_or(RankSummary::unranked());

    Ok(Envelope::ok(RankResponse::from_summary(address, summary)))
}
