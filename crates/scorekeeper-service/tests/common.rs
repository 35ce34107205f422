//! Common test utilities for scorekeeper integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use scorekeeper_core::{Account, AchievementType, Game, NewGame, Score};
use scorekeeper_service::{create_router, AppState, ServiceConfig};
use scorekeeper_store::{SqliteStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store access for seeding reference data.
    pub store: Arc<SqliteStore>,
    /// Temporary directory for the database and backups (kept alive for
    /// test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteStore::open(&temp_dir.path().join("scorekeeper.db"))
            .await
            .expect("Failed to open store");
        let store = Arc::new(store);

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            backup_dir: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Seed a game (reference data has no public create endpoint).
    pub async fn seed_game(&self, name: &str) -> Game {
        self.store
            .create_game(&NewGame::named(name))
            .await
            .expect("Failed to seed game")
    }

    /// Seed an account.
    pub async fn seed_account(&self, address: &str) -> Account {
        self.store
            .find_or_create_account(address)
            .await
            .expect("Failed to seed account")
    }

    /// Seed a score row.
    pub async fn seed_score(&self, game_id: i64, account_id: i64, value: i64) -> Score {
        self.store
            .insert_score(game_id, account_id, value)
            .await
            .expect("Failed to seed score")
    }

    /// Seed an achievement type.
    pub async fn seed_achievement_type(&self, game_id: i64, name: &str) -> AchievementType {
        self.store
            .create_achievement_type(game_id, name, None)
            .await
            .expect("Failed to seed achievement type")
    }
}
