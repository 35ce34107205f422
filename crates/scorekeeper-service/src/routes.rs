//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, achievements, backups, games, health, rank, ratings, scores};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts
/// - `GET /accounts` / `POST /accounts` - List / register (find-or-create)
/// - `GET|PUT|DELETE /accounts/:id`
///
/// ## Scores
/// - `GET /scores` - Filtered, paginated listing
/// - `POST /scores` / `POST /scores/by-address` - Submit a score
/// - `PUT /scores/by-address` - Current-score upsert for (account, game)
/// - `GET|PUT|DELETE /scores/:id`
/// - `GET /scores/rankings/:game_id` - Per-game leaderboard
/// - `POST /scores/rank/:game_id` - Rank one score row within its game
/// - `POST /scores/reset-all` / `POST /scores/restore` / `GET /scores/backups`
///
/// ## Ranking
/// - `GET /rank/:address` - Global rank for a wallet address
///
/// ## Games
/// - `GET /games` / `GET /games/:id`
///
/// ## Achievements
/// - `GET /achievements` / `GET /achievements/user`
/// - `POST /achievements` / `POST /achievements/check`
///
/// ## Ratings
/// - `POST /rate` / `GET /stats/:game_id`
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    let account_routes = Router::new()
        .route(
            "/",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/:id",
            get(accounts::get_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        );

    let score_routes = Router::new()
        .route("/", get(scores::list_scores).post(scores::create_score))
        .route(
            "/by-address",
            post(scores::create_score_by_address).put(scores::update_score_by_address),
        )
        .route("/rankings/:game_id", get(scores::game_rankings))
        .route("/rank/:game_id", post(scores::rank_in_game))
        .route("/reset-all", post(backups::reset_all_scores))
        .route("/restore", post(backups::restore_scores))
        .route("/backups", get(backups::list_backups))
        .route(
            "/:id",
            get(scores::get_score)
                .put(scores::update_score)
                .delete(scores::delete_score),
        );

    let achievement_routes = Router::new()
        .route(
            "/",
            get(achievements::list_achievement_types).post(achievements::record_achievement),
        )
        .route("/user", get(achievements::user_achievements))
        .route("/check", post(achievements::check_achievement));

    let game_routes = Router::new()
        .route("/", get(games::list_games))
        .route("/:id", get(games::get_game));

    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .nest("/scores", score_routes)
        .nest("/achievements", achievement_routes)
        .nest("/games", game_routes)
        .route("/rank/:address", get(rank::get_rank))
        .route("/rate", post(ratings::rate_game))
        .route("/stats/:game_id", get(ratings::rating_stats))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        .merge(api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
