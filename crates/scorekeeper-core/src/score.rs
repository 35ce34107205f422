//! Score rows, listing filters, and ranking results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for score listings.
pub const DEFAULT_SCORE_LIMIT: i64 = 10;

/// Maximum page size for score listings.
pub const MAX_SCORE_LIMIT: i64 = 100;

/// One scored attempt tied to an account and a game.
///
/// The score table allows multiple historical rows per (account, game) pair;
/// "current score" semantics are provided by the by-address upsert path,
/// which updates the most recent row for the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Surrogate key.
    pub id: i64,
    /// Game this score belongs to.
    pub game_id: i64,
    /// Account that scored.
    pub account_id: i64,
    /// Score value. Invariant: `score >= 0`, enforced before persistence.
    pub score: i64,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A score row joined with human-readable labels.
///
/// The labels come from LEFT JOINs, so they are absent if the referenced
/// game or account row is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    /// Surrogate key.
    pub id: i64,
    /// Score value.
    pub score: i64,
    /// Game this score belongs to.
    pub game_id: i64,
    /// Account that scored.
    pub account_id: i64,
    /// Name of the game, if the game row exists.
    pub game_name: Option<String>,
    /// Address of the account, if the account row exists.
    pub account_address: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Typed query specification for score listings.
///
/// Filters compose conjunctively and are consumed by a single parameterized
/// query builder in the store. Time bounds compare against `created_at` and
/// are always UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreFilter {
    /// Restrict to scores held by this wallet address.
    pub address: Option<String>,
    /// Restrict to scores for this game.
    pub game_id: Option<i64>,
    /// Inclusive lower bound on `created_at`.
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub end_time: Option<DateTime<Utc>>,
    /// Page size; `None` means [`DEFAULT_SCORE_LIMIT`].
    pub limit: Option<i64>,
}

impl ScoreFilter {
    /// Effective page size, clamped to `1..=`[`MAX_SCORE_LIMIT`].
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_SCORE_LIMIT)
            .clamp(1, MAX_SCORE_LIMIT)
    }
}

/// One page of score listings plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePage {
    /// The rows for this page, most recently updated first.
    pub data: Vec<ScoreView>,
    /// Row count for the same predicate, ignoring the page limit.
    pub total: i64,
}

/// A participant's position in a score-ordered list.
///
/// `rank` is 1-based over descending scores, ties broken by ascending row
/// id. `distance_to_next` is the gap to the smallest strictly greater
/// score, `0` when the participant already holds the top score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankSummary {
    /// 1-based rank.
    pub rank: i64,
    /// The ranked score value.
    pub quantity: i64,
    /// Points needed to reach the next-better rank.
    pub distance_to_next: i64,
    /// Identity of the ranked score row.
    pub prop_id: i64,
}

impl RankSummary {
    /// The "not ranked" placeholder: all zeroes.
    ///
    /// Returned when the participant holds no score row — a valid state,
    /// not an error.
    #[must_use]
    pub const fn unranked() -> Self {
        Self {
            rank: 0,
            quantity: 0,
            distance_to_next: 0,
            prop_id: 0,
        }
    }
}

/// One leaderboard row for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Account holding the score.
    pub account_id: i64,
    /// Address of that account, if the account row exists.
    pub account_address: Option<String>,
    /// Score value.
    pub score: i64,
    /// Game the entry belongs to.
    pub game_id: i64,
    /// When the score row was created.
    pub created_at: DateTime<Utc>,
}
