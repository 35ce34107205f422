//! Achievement types and completion records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An achievement definition belonging to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementType {
    /// Surrogate key.
    pub id: i64,
    /// Game this achievement belongs to.
    pub game_id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A completion record for one (account, achievement type) pair.
///
/// At most one record exists per pair — enforced by a unique constraint and
/// maintained with upsert semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Surrogate key.
    pub id: i64,
    /// The achievement type this record tracks.
    pub achievement_id: i64,
    /// The account this record tracks.
    pub account_id: i64,
    /// Whether the achievement is completed.
    pub complete: bool,
    /// When it was completed; `None` while incomplete.
    pub complete_time: Option<DateTime<Utc>>,
}

/// One row of a user's achievement checklist.
///
/// Produced by left-joining every achievement type against the account's
/// completion rows, so not-yet-attempted achievements appear with
/// `complete = false` and no completion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    /// The achievement type id.
    pub achievement_id: i64,
    /// Game the achievement belongs to.
    pub game_id: i64,
    /// Achievement name.
    pub name: String,
    /// Achievement description.
    pub description: Option<String>,
    /// Whether this account has completed it.
    pub complete: bool,
    /// When it was completed, if it was.
    pub complete_time: Option<DateTime<Utc>>,
}
