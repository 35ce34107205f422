//! Request and response types for the scorekeeper client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `{code, err, data}` envelope every endpoint responds with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Status code, mirroring the HTTP status.
    pub code: u16,
    /// Error message; empty on success.
    pub err: String,
    /// The payload.
    pub data: T,
}

/// A score submission by wallet address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScore {
    /// The game scored in.
    pub game_id: i64,
    /// The scoring wallet address; the account is created on first use.
    pub address: String,
    /// The score value; must be non-negative.
    pub score: i64,
}

/// A stored score row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Surrogate key.
    pub id: i64,
    /// The game scored in.
    pub game_id: i64,
    /// The scoring account.
    pub account_id: i64,
    /// Score value.
    pub score: i64,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A participant's global rank.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankInfo {
    /// 1-based rank; `0` when not ranked.
    pub rank: i64,
    /// Points needed to reach the next-better rank.
    pub distance_to_next: i64,
    /// The queried wallet address.
    pub address: String,
    /// The ranked score value.
    pub quantity: i64,
    /// Identity of the ranked score row.
    pub prop_id: i64,
}

/// An achievement completion record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    /// Surrogate key.
    pub id: i64,
    /// The achievement type.
    pub achievement_id: i64,
    /// The tracked account.
    pub account_id: i64,
    /// Whether the achievement is completed.
    pub complete: bool,
    /// When it was completed, if it was.
    pub complete_time: Option<DateTime<Utc>>,
}

/// Like/dislike counters for a game.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingCounts {
    /// The rated game.
    pub game_id: i64,
    /// Total likes.
    pub likes: i64,
    /// Total dislikes.
    pub dislikes: i64,
}
