//! SQLite storage layer for scorekeeper.
//!
//! This crate is the persistence gateway: it translates typed queries into
//! relational operations and owns every transaction boundary. All entities
//! live in SQLite, accessed through a sqlx connection pool; snapshot files
//! for the backup/restore path are managed by the [`backup`] module.
//!
//! # Example
//!
//! ```no_run
//! use scorekeeper_store::{SqliteStore, Store};
//!
//! # async fn example() -> scorekeeper_store::Result<()> {
//! let store = SqliteStore::open(std::path::Path::new("/data/scorekeeper.db")).await?;
//!
//! let account = store.find_or_create_account("0x897575").await?;
//! let scores = store.list_scores(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backup;
pub mod error;
pub mod sqlite;

pub use backup::{BackupInfo, SnapshotRow};
pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use scorekeeper_core::{
    Account, Achievement, AchievementStatus, AchievementType, Game, GameDetails, GameRating,
    LeaderboardEntry, NewGame, RankSummary, Score, ScoreFilter, ScorePage, ScoreView,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations. Reads return `Option` for lookups that may miss;
/// mutations of a specific row return [`StoreError::NotFound`] when the row
/// does not exist.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// List every account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_account(&self, id: i64) -> Result<Option<Account>>;

    /// Get an account by wallet address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_account_by_address(&self, address: &str) -> Result<Option<Account>>;

    /// Find the account for `address`, creating it if absent.
    ///
    /// Registration is idempotent: re-registering an existing address
    /// returns the existing row. Atomic under concurrent callers via the
    /// unique constraint on `address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_or_create_account(&self, address: &str) -> Result<Account>;

    /// Replace an account's address.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the account doesn't exist.
    async fn update_account(&self, id: i64, address: &str) -> Result<Account>;

    /// Delete an account, returning the deleted row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the account doesn't exist.
    async fn delete_account(&self, id: i64) -> Result<Account>;

    /// Whether an account row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn account_exists(&self, id: i64) -> Result<bool>;

    // =========================================================================
    // Game Operations
    // =========================================================================

    /// Seed a game into the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_game(&self, game: &NewGame) -> Result<Game>;

    /// List all games with participant counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_games(&self) -> Result<Vec<GameDetails>>;

    /// Get one game with its participant count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_game(&self, id: i64) -> Result<Option<GameDetails>>;

    /// Whether a game row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn game_exists(&self, id: i64) -> Result<bool>;

    // =========================================================================
    // Score Operations
    // =========================================================================

    /// List score rows matching `filter`, most recently updated first,
    /// together with the unpaginated total for the same predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_scores(&self, filter: &ScoreFilter) -> Result<ScorePage>;

    /// Get one score row with its labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_score(&self, id: i64) -> Result<Option<ScoreView>>;

    /// Insert a new score row. History accumulates; this never updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_score(&self, game_id: i64, account_id: i64, value: i64) -> Result<Score>;

    /// Replace the value of an existing score row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the row doesn't exist.
    async fn update_score(&self, id: i64, value: i64) -> Result<Score>;

    /// Current-score upsert for one (account, game) pair: update the most
    /// recent row for the pair, or insert when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn upsert_score_for_pair(
        &self,
        game_id: i64,
        account_id: i64,
        value: i64,
    ) -> Result<Score>;

    /// Delete a score row, returning the deleted row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the row doesn't exist.
    async fn delete_score(&self, id: i64) -> Result<Score>;

    /// Top score rows for a game, descending score, ties by row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn leaderboard(&self, game_id: i64, limit: i64) -> Result<Vec<LeaderboardEntry>>;

    // =========================================================================
    // Ranking
    // =========================================================================

    /// Rank the participant's best score row across all games.
    ///
    /// Returns `None` when the address holds no score row — "not ranked" is
    /// a valid state, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn rank_by_address(&self, address: &str) -> Result<Option<RankSummary>>;

    /// Rank one score row within its game, optionally restricted to rows
    /// created inside `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn rank_in_game(
        &self,
        game_id: i64,
        prop_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<RankSummary>>;

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    /// Seed an achievement type for a game.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_achievement_type(
        &self,
        game_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<AchievementType>;

    /// List achievement types, optionally for one game.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_achievement_types(&self, game_id: Option<i64>) -> Result<Vec<AchievementType>>;

    /// Whether an achievement type exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn achievement_type_exists(&self, id: i64) -> Result<bool>;

    /// Upsert the completion record for `(account_id, achievement_id)`.
    ///
    /// Inserts if absent; on conflict overwrites `complete` and sets
    /// `complete_time` to now iff `complete`. Uniqueness conflicts never
    /// surface — they resolve via update.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn record_completion(
        &self,
        account_id: i64,
        achievement_id: i64,
        complete: bool,
    ) -> Result<Achievement>;

    /// Get the completion record for `(account_id, achievement_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_completion(
        &self,
        account_id: i64,
        achievement_id: i64,
    ) -> Result<Option<Achievement>>;

    /// Full achievement checklist for an account: every achievement type
    /// (optionally for one game) left-joined with the account's completion
    /// rows. `account_id = None` (unknown address) yields an all-incomplete
    /// checklist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn user_checklist(
        &self,
        account_id: Option<i64>,
        game_id: Option<i64>,
    ) -> Result<Vec<AchievementStatus>>;

    // =========================================================================
    // Rating Operations
    // =========================================================================

    /// Record one like or dislike for a game, returning the new counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn rate_game(&self, game_id: i64, is_like: bool) -> Result<GameRating>;

    /// Current like/dislike counters for a game; zeroes if never rated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn rating_stats(&self, game_id: i64) -> Result<GameRating>;

    // =========================================================================
    // Backup/Restore Operations
    // =========================================================================

    /// Read every score row with its account address and game name, ordered
    /// by row id, in snapshot form.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn export_scores(&self) -> Result<Vec<SnapshotRow>>;

    /// Zero every score row's value in place (not delete), bumping
    /// `updated_at`, inside a single transaction. Returns the number of
    /// rows touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn zero_all_scores(&self) -> Result<u64>;

    /// Replace the entire score table with `rows`, keeping their original
    /// ids and timestamps, inside a single transaction. Commits only if
    /// every row inserts; any failure rolls the whole replacement back.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; on error the
    /// prior data set is preserved.
    async fn replace_all_scores(&self, rows: &[SnapshotRow]) -> Result<u64>;
}
