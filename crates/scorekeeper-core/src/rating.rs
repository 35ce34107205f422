//! Like/dislike rating counters.

use serde::{Deserialize, Serialize};

/// Aggregated like/dislike counters for a game.
///
/// Invariant: both counters are non-negative; they only ever increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRating {
    /// The rated game.
    pub game_id: i64,
    /// Total likes.
    pub likes: i64,
    /// Total dislikes.
    pub dislikes: i64,
}

impl GameRating {
    /// A zeroed rating for a game nobody has rated yet.
    #[must_use]
    pub const fn empty(game_id: i64) -> Self {
        Self {
            game_id,
            likes: 0,
            dislikes: 0,
        }
    }
}
