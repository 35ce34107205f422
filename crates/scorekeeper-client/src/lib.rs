//! Scorekeeper Client SDK.
//!
//! This crate provides a client library for game services to interact with
//! the scorekeeper API.
//!
//! # Example
//!
//! ```no_run
//! use scorekeeper_client::{ScorekeeperClient, SubmitScore};
//!
//! # async fn example() -> Result<(), scorekeeper_client::ClientError> {
//! let client = ScorekeeperClient::new("http://scorekeeper:8080");
//!
//! // Submit a score by wallet address
//! client.submit_score(SubmitScore {
//!     game_id: 3,
//!     address: "0x897575".to_string(),
//!     score: 40,
//! }).await?;
//!
//! // Where does that put the player?
//! let rank = client.get_rank("0x897575").await?;
//! println!("rank {} ({} points to the next)", rank.rank, rank.distance_to_next);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, ScorekeeperClient};
pub use error::ClientError;
pub use types::*;
