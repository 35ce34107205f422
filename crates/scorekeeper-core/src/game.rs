//! Game catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A game in the catalog.
///
/// Read-mostly reference entity; rows are seeded administratively. All
/// descriptive fields beyond `name` are optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Surrogate key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Homepage or play URL.
    pub url: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
    /// Publication status flag.
    pub status: Option<i64>,
    /// Game category.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Supported platforms, comma separated.
    pub platforms: Option<String>,
    /// Short blurb.
    pub brief_description: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Developer credits.
    pub developers: Option<String>,
    /// When the game was created.
    pub created_at: DateTime<Utc>,
    /// When the game was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for seeding a new game into the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    /// Display name.
    pub name: String,
    /// Homepage or play URL.
    pub url: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
    /// Publication status flag.
    pub status: Option<i64>,
    /// Game category.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Supported platforms, comma separated.
    pub platforms: Option<String>,
    /// Short blurb.
    pub brief_description: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Developer credits.
    pub developers: Option<String>,
}

impl NewGame {
    /// A new game with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A game together with its participant count.
///
/// `user_count` is the number of distinct accounts holding at least one
/// score row for the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    /// The game record.
    #[serde(flatten)]
    pub game: Game,
    /// Distinct accounts with a score for this game.
    pub user_count: i64,
}
