//! Scorekeeper HTTP API service.
//!
//! This crate provides the HTTP API for the scorekeeper platform, including:
//!
//! - Account management (wallet addresses)
//! - Score submission, listing, and per-game leaderboards
//! - Global and per-game ranking queries
//! - Achievement completion tracking
//! - Like/dislike game ratings
//! - Score table backup/restore via flat-file snapshots
//!
//! # Response envelope
//!
//! Every endpoint responds with `{code, err, data}`: `code = 200` with an
//! empty `err` on success (even when `data` is empty), and a matching 4xx/5xx
//! HTTP status on genuine failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use response::Envelope;
pub use routes::create_router;
pub use state::AppState;
