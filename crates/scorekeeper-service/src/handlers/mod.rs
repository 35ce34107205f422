//! API handlers.

pub mod accounts;
pub mod achievements;
pub mod backups;
pub mod games;
pub mod health;
pub mod rank;
pub mod ratings;
pub mod scores;
