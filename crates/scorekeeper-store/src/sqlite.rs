//! SQLite storage implementation.
//!
//! This module provides the [`SqliteStore`] implementation of the [`Store`]
//! trait over a sqlx connection pool. Embedded migrations run on open.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use scorekeeper_core::{
    Account, Achievement, AchievementStatus, AchievementType, Game, GameDetails, GameRating,
    LeaderboardEntry, NewGame, RankSummary, Score, ScoreFilter, ScorePage, ScoreView,
};

use crate::backup::SnapshotRow;
use crate::error::{Result, StoreError};
use crate::Store;

/// SQLite-backed storage implementation.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, run migrations, and return
    /// a ready-to-use store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(StoreError::Database)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory database, primarily for tests. Migrations are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or migrated.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StoreError::Database)?
            .foreign_keys(true);

        // A single connection: every pooled connection would otherwise get
        // its own empty :memory: database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run embedded migrations from `migrations/`.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ============================================================================
// Row types, mapped via `sqlx::FromRow`
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Self {
            id: r.id,
            address: r.address,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GameDetailsRow {
    id: i64,
    name: String,
    url: Option<String>,
    icon: Option<String>,
    status: Option<i64>,
    kind: Option<String>,
    platforms: Option<String>,
    brief_description: Option<String>,
    description: Option<String>,
    developers: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_count: i64,
}

impl From<GameDetailsRow> for GameDetails {
    fn from(r: GameDetailsRow) -> Self {
        Self {
            game: Game {
                id: r.id,
                name: r.name,
                url: r.url,
                icon: r.icon,
                status: r.status,
                kind: r.kind,
                platforms: r.platforms,
                brief_description: r.brief_description,
                description: r.description,
                developers: r.developers,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            user_count: r.user_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScoreRow {
    id: i64,
    game_id: i64,
    account_id: i64,
    score: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScoreRow> for Score {
    fn from(r: ScoreRow) -> Self {
        Self {
            id: r.id,
            game_id: r.game_id,
            account_id: r.account_id,
            score: r.score,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScoreViewRow {
    id: i64,
    score: i64,
    game_id: i64,
    account_id: i64,
    game_name: Option<String>,
    account_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScoreViewRow> for ScoreView {
    fn from(r: ScoreViewRow) -> Self {
        Self {
            id: r.id,
            score: r.score,
            game_id: r.game_id,
            account_id: r.account_id,
            game_name: r.game_name,
            account_address: r.account_address,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    account_id: i64,
    account_address: Option<String>,
    score: i64,
    game_id: i64,
    created_at: DateTime<Utc>,
}

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(r: LeaderboardRow) -> Self {
        Self {
            account_id: r.account_id,
            account_address: r.account_address,
            score: r.score,
            game_id: r.game_id,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RankRow {
    rank: i64,
    score: i64,
    prop_id: i64,
    distance_to_next: i64,
}

impl From<RankRow> for RankSummary {
    fn from(r: RankRow) -> Self {
        Self {
            rank: r.rank,
            quantity: r.score,
            distance_to_next: r.distance_to_next,
            prop_id: r.prop_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AchievementTypeRow {
    id: i64,
    game_id: i64,
    name: String,
    description: Option<String>,
}

impl From<AchievementTypeRow> for AchievementType {
    fn from(r: AchievementTypeRow) -> Self {
        Self {
            id: r.id,
            game_id: r.game_id,
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AchievementRow {
    id: i64,
    achievement_id: i64,
    account_id: i64,
    complete: bool,
    complete_time: Option<DateTime<Utc>>,
}

impl From<AchievementRow> for Achievement {
    fn from(r: AchievementRow) -> Self {
        Self {
            id: r.id,
            achievement_id: r.achievement_id,
            account_id: r.account_id,
            complete: r.complete,
            complete_time: r.complete_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ChecklistRow {
    achievement_id: i64,
    game_id: i64,
    name: String,
    description: Option<String>,
    complete: bool,
    complete_time: Option<DateTime<Utc>>,
}

impl From<ChecklistRow> for AchievementStatus {
    fn from(r: ChecklistRow) -> Self {
        Self {
            achievement_id: r.achievement_id,
            game_id: r.game_id,
            name: r.name,
            description: r.description,
            complete: r.complete,
            complete_time: r.complete_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    game_id: i64,
    likes: i64,
    dislikes: i64,
}

impl From<RatingRow> for GameRating {
    fn from(r: RatingRow) -> Self {
        Self {
            game_id: r.game_id,
            likes: r.likes,
            dislikes: r.dislikes,
        }
    }
}

// ============================================================================
// Query fragments
// ============================================================================

const SCORE_VIEW_SELECT: &str = "SELECT s.id, s.score, s.game_id, s.account_id, \
     g.name AS game_name, a.address AS account_address, s.created_at, s.updated_at \
     FROM score s \
     LEFT JOIN game g ON g.id = s.game_id \
     LEFT JOIN account a ON a.id = s.account_id";

const GAME_DETAILS_SELECT: &str = "SELECT g.id, g.name, g.url, g.icon, g.status, \
     g.type AS kind, g.platforms, g.brief_description, g.description, g.developers, \
     g.created_at, g.updated_at, COUNT(DISTINCT s.account_id) AS user_count \
     FROM game g LEFT JOIN score s ON s.game_id = g.id";

/// Append the conjunctive predicate for `filter` to a score query.
///
/// The query must already join `score s` with `account a`.
fn push_score_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a ScoreFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(address) = &filter.address {
        qb.push(" AND a.address = ").push_bind(address.as_str());
    }
    if let Some(game_id) = filter.game_id {
        qb.push(" AND s.game_id = ").push_bind(game_id);
    }
    if let Some(start) = filter.start_time {
        qb.push(" AND s.created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.end_time {
        qb.push(" AND s.created_at <= ").push_bind(end);
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows: Vec<AccountRow> =
            sqlx::query_as("SELECT id, address, created_at, updated_at FROM account ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let row: Option<AccountRow> =
            sqlx::query_as("SELECT id, address, created_at, updated_at FROM account WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Account::from))
    }

    async fn get_account_by_address(&self, address: &str) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, address, created_at, updated_at FROM account WHERE address = ?",
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    async fn find_or_create_account(&self, address: &str) -> Result<Account> {
        let now = Utc::now();
        // The no-op conflict update lets RETURNING yield the existing row.
        let row: AccountRow = sqlx::query_as(
            "INSERT INTO account (address, created_at, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(address) DO UPDATE SET address = excluded.address \
             RETURNING id, address, created_at, updated_at",
        )
        .bind(address)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_account(&self, id: i64, address: &str) -> Result<Account> {
        let row: Option<AccountRow> = sqlx::query_as(
            "UPDATE account SET address = ?, updated_at = ? WHERE id = ? \
             RETURNING id, address, created_at, updated_at",
        )
        .bind(address)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Account::from)
            .ok_or(StoreError::not_found("account", id))
    }

    async fn delete_account(&self, id: i64) -> Result<Account> {
        let row: Option<AccountRow> = sqlx::query_as(
            "DELETE FROM account WHERE id = ? RETURNING id, address, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Account::from)
            .ok_or(StoreError::not_found("account", id))
    }

    async fn account_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM account WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    // =========================================================================
    // Game Operations
    // =========================================================================

    async fn create_game(&self, game: &NewGame) -> Result<Game> {
        let now = Utc::now();
        let row: GameDetailsRow = sqlx::query_as(
            "INSERT INTO game \
             (name, url, icon, status, type, platforms, brief_description, description, \
              developers, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, name, url, icon, status, type AS kind, platforms, \
             brief_description, description, developers, created_at, updated_at, \
             0 AS user_count",
        )
        .bind(&game.name)
        .bind(&game.url)
        .bind(&game.icon)
        .bind(game.status)
        .bind(&game.kind)
        .bind(&game.platforms)
        .bind(&game.brief_description)
        .bind(&game.description)
        .bind(&game.developers)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(GameDetails::from(row).game)
    }

    async fn list_games(&self) -> Result<Vec<GameDetails>> {
        let rows: Vec<GameDetailsRow> = sqlx::query_as(&format!(
            "{GAME_DETAILS_SELECT} GROUP BY g.id ORDER BY g.created_at DESC, g.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(GameDetails::from).collect())
    }

    async fn get_game(&self, id: i64) -> Result<Option<GameDetails>> {
        let row: Option<GameDetailsRow> =
            sqlx::query_as(&format!("{GAME_DETAILS_SELECT} WHERE g.id = ? GROUP BY g.id"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(GameDetails::from))
    }

    async fn game_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM game WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    // =========================================================================
    // Score Operations
    // =========================================================================

    async fn list_scores(&self, filter: &ScoreFilter) -> Result<ScorePage> {
        let mut query = QueryBuilder::new(SCORE_VIEW_SELECT);
        push_score_filters(&mut query, filter);
        query
            .push(" ORDER BY s.updated_at DESC, s.id DESC LIMIT ")
            .push_bind(filter.effective_limit());

        let rows: Vec<ScoreViewRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let mut count = QueryBuilder::new(
            "SELECT COUNT(*) FROM score s LEFT JOIN account a ON a.id = s.account_id",
        );
        push_score_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(ScorePage {
            data: rows.into_iter().map(ScoreView::from).collect(),
            total,
        })
    }

    async fn get_score(&self, id: i64) -> Result<Option<ScoreView>> {
        let row: Option<ScoreViewRow> = sqlx::query_as(&format!("{SCORE_VIEW_SELECT} WHERE s.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ScoreView::from))
    }

    async fn insert_score(&self, game_id: i64, account_id: i64, value: i64) -> Result<Score> {
        let now = Utc::now();
        let row: ScoreRow = sqlx::query_as(
            "INSERT INTO score (game_id, account_id, score, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, game_id, account_id, score, created_at, updated_at",
        )
        .bind(game_id)
        .bind(account_id)
        .bind(value)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_score(&self, id: i64, value: i64) -> Result<Score> {
        let row: Option<ScoreRow> = sqlx::query_as(
            "UPDATE score SET score = ?, updated_at = ? WHERE id = ? \
             RETURNING id, game_id, account_id, score, created_at, updated_at",
        )
        .bind(value)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Score::from)
            .ok_or(StoreError::not_found("score", id))
    }

    async fn upsert_score_for_pair(
        &self,
        game_id: i64,
        account_id: i64,
        value: i64,
    ) -> Result<Score> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM score WHERE game_id = ? AND account_id = ? \
             ORDER BY updated_at DESC, id DESC LIMIT 1",
        )
        .bind(game_id)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .await?;

        let now = Utc::now();
        let row: ScoreRow = if let Some(id) = existing {
            sqlx::query_as(
                "UPDATE score SET score = ?, updated_at = ? WHERE id = ? \
                 RETURNING id, game_id, account_id, score, created_at, updated_at",
            )
            .bind(value)
            .bind(now)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query_as(
                "INSERT INTO score (game_id, account_id, score, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?) \
                 RETURNING id, game_id, account_id, score, created_at, updated_at",
            )
            .bind(game_id)
            .bind(account_id)
            .bind(value)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete_score(&self, id: i64) -> Result<Score> {
        let row: Option<ScoreRow> = sqlx::query_as(
            "DELETE FROM score WHERE id = ? \
             RETURNING id, game_id, account_id, score, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Score::from)
            .ok_or(StoreError::not_found("score", id))
    }

    async fn leaderboard(&self, game_id: i64, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let rows: Vec<LeaderboardRow> = sqlx::query_as(
            "SELECT s.account_id, a.address AS account_address, s.score, s.game_id, s.created_at \
             FROM score s LEFT JOIN account a ON a.id = s.account_id \
             WHERE s.game_id = ? \
             ORDER BY s.score DESC, s.id ASC LIMIT ?",
        )
        .bind(game_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
    }

    // =========================================================================
    // Ranking
    // =========================================================================

    async fn rank_by_address(&self, address: &str) -> Result<Option<RankSummary>> {
        // Dense positions over raw score rows, ties broken by row id; the
        // distance is to the smallest strictly greater score anywhere.
        let row: Option<RankRow> = sqlx::query_as(
            "WITH ranked AS ( \
                 SELECT s.id AS prop_id, s.score AS score, a.address AS address, \
                        ROW_NUMBER() OVER (ORDER BY s.score DESC, s.id ASC) AS rank \
                 FROM score s JOIN account a ON a.id = s.account_id \
             ) \
             SELECT r.rank, r.score, r.prop_id, \
                    COALESCE((SELECT MIN(score) FROM ranked WHERE score > r.score) - r.score, 0) \
                        AS distance_to_next \
             FROM ranked r WHERE r.address = ? \
             ORDER BY r.rank ASC LIMIT 1",
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(RankSummary::from))
    }

    async fn rank_in_game(
        &self,
        game_id: i64,
        prop_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<RankSummary>> {
        let mut query = QueryBuilder::new(
            "WITH ranked AS ( \
                 SELECT s.id AS prop_id, s.score AS score, \
                        ROW_NUMBER() OVER (ORDER BY s.score DESC, s.id ASC) AS rank \
                 FROM score s WHERE s.game_id = ",
        );
        query.push_bind(game_id);
        if let Some(start) = start {
            query.push(" AND s.created_at >= ").push_bind(start);
        }
        if let Some(end) = end {
            query.push(" AND s.created_at <= ").push_bind(end);
        }
        query.push(
            ") SELECT r.rank, r.score, r.prop_id, \
             COALESCE((SELECT MIN(score) FROM ranked WHERE score > r.score) - r.score, 0) \
                 AS distance_to_next \
             FROM ranked r WHERE r.prop_id = ",
        );
        query.push_bind(prop_id);

        let row: Option<RankRow> = query.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(RankSummary::from))
    }

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    async fn create_achievement_type(
        &self,
        game_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<AchievementType> {
        let row: AchievementTypeRow = sqlx::query_as(
            "INSERT INTO achievement_type (game_id, name, description) VALUES (?, ?, ?) \
             RETURNING id, game_id, name, description",
        )
        .bind(game_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn list_achievement_types(&self, game_id: Option<i64>) -> Result<Vec<AchievementType>> {
        let mut query =
            QueryBuilder::new("SELECT id, game_id, name, description FROM achievement_type");
        if let Some(game_id) = game_id {
            query.push(" WHERE game_id = ").push_bind(game_id);
        }
        query.push(" ORDER BY id");

        let rows: Vec<AchievementTypeRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(AchievementType::from).collect())
    }

    async fn achievement_type_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM achievement_type WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists != 0)
    }

    async fn record_completion(
        &self,
        account_id: i64,
        achievement_id: i64,
        complete: bool,
    ) -> Result<Achievement> {
        let complete_time = complete.then(Utc::now);
        let row: AchievementRow = sqlx::query_as(
            "INSERT INTO achievement (achievement_id, account_id, complete, complete_time) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(account_id, achievement_id) DO UPDATE SET \
                 complete = excluded.complete, complete_time = excluded.complete_time \
             RETURNING id, achievement_id, account_id, complete, complete_time",
        )
        .bind(achievement_id)
        .bind(account_id)
        .bind(complete)
        .bind(complete_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_completion(
        &self,
        account_id: i64,
        achievement_id: i64,
    ) -> Result<Option<Achievement>> {
        let row: Option<AchievementRow> = sqlx::query_as(
            "SELECT id, achievement_id, account_id, complete, complete_time \
             FROM achievement WHERE account_id = ? AND achievement_id = ?",
        )
        .bind(account_id)
        .bind(achievement_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Achievement::from))
    }

    async fn user_checklist(
        &self,
        account_id: Option<i64>,
        game_id: Option<i64>,
    ) -> Result<Vec<AchievementStatus>> {
        // Account id 0 is never allocated, so an unknown address joins
        // against nothing and every row falls back to incomplete.
        let mut query = QueryBuilder::new(
            "SELECT t.id AS achievement_id, t.game_id, t.name, t.description, \
                    COALESCE(a.complete, 0) AS complete, a.complete_time \
             FROM achievement_type t \
             LEFT JOIN achievement a ON a.achievement_id = t.id AND a.account_id = ",
        );
        query.push_bind(account_id.unwrap_or(0));
        if let Some(game_id) = game_id {
            query.push(" WHERE t.game_id = ").push_bind(game_id);
        }
        query.push(" ORDER BY t.id");

        let rows: Vec<ChecklistRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(AchievementStatus::from).collect())
    }

    // =========================================================================
    // Rating Operations
    // =========================================================================

    async fn rate_game(&self, game_id: i64, is_like: bool) -> Result<GameRating> {
        let row: RatingRow = sqlx::query_as(
            "INSERT INTO game_rating (game_id, likes, dislikes) VALUES (?, ?, ?) \
             ON CONFLICT(game_id) DO UPDATE SET \
                 likes = likes + excluded.likes, dislikes = dislikes + excluded.dislikes \
             RETURNING game_id, likes, dislikes",
        )
        .bind(game_id)
        .bind(i64::from(is_like))
        .bind(i64::from(!is_like))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn rating_stats(&self, game_id: i64) -> Result<GameRating> {
        let row: Option<RatingRow> =
            sqlx::query_as("SELECT game_id, likes, dislikes FROM game_rating WHERE game_id = ?")
                .bind(game_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map_or(GameRating::empty(game_id), GameRating::from))
    }

    // =========================================================================
    // Backup/Restore Operations
    // =========================================================================

    async fn export_scores(&self) -> Result<Vec<SnapshotRow>> {
        let rows: Vec<SnapshotRow> = sqlx::query_as(
            "SELECT s.id, s.score, s.game_id, s.account_id, \
                    a.address AS account_address, g.name AS game_name, \
                    s.created_at, s.updated_at \
             FROM score s \
             JOIN account a ON a.id = s.account_id \
             JOIN game g ON g.id = s.game_id \
             ORDER BY s.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn zero_all_scores(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE score SET score = 0, updated_at = ?")
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(rows = result.rows_affected(), "All scores zeroed");
        Ok(result.rows_affected())
    }

    async fn replace_all_scores(&self, rows: &[SnapshotRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM score").execute(&mut *tx).await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO score (id, game_id, account_id, score, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(row.id)
            .bind(row.game_id)
            .bind(row.account_id)
            .bind(row.score)
            .bind(row.created_at)
            .bind(row.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(rows = rows.len(), "Score table restored from snapshot");
        Ok(rows.len() as u64)
    }
}
