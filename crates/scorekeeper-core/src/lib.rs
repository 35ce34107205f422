//! Core types for the scorekeeper platform.
//!
//! This crate provides the foundational types used throughout scorekeeper:
//!
//! - **Accounts**: [`Account`] — a participant keyed by wallet address
//! - **Games**: [`Game`], [`GameDetails`]
//! - **Scores**: [`Score`], [`ScoreView`], [`ScoreFilter`], [`ScorePage`]
//! - **Ranking**: [`RankSummary`], [`LeaderboardEntry`]
//! - **Achievements**: [`AchievementType`], [`Achievement`], [`AchievementStatus`]
//! - **Ratings**: [`GameRating`]
//!
//! All identifiers are database surrogate keys (`i64`); the business key for
//! a participant is their wallet address. Timestamps are UTC throughout.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod achievement;
pub mod game;
pub mod rating;
pub mod score;
pub mod time;

pub use account::Account;
pub use achievement::{Achievement, AchievementStatus, AchievementType};
pub use game::{Game, GameDetails, NewGame};
pub use rating::GameRating;
pub use score::{
    LeaderboardEntry, RankSummary, Score, ScoreFilter, ScorePage, ScoreView, DEFAULT_SCORE_LIMIT,
    MAX_SCORE_LIMIT,
};
pub use time::{parse_time_bound, TimeBoundError};
