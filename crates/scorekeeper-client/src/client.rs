//! Scorekeeper HTTP client implementation.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{AchievementRecord, Envelope, RankInfo, RatingCounts, ScoreRecord, SubmitScore};

/// Scorekeeper API client.
///
/// Provides methods for submitting scores and querying ranks, achievements,
/// and ratings.
#[derive(Debug, Clone)]
pub struct ScorekeeperClient {
    client: Client,
    base_url: String,
}

/// Options for constructing a [`ScorekeeperClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl ScorekeeperClient {
    /// Create a new scorekeeper client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the scorekeeper service (e.g.,
    ///   `"http://scorekeeper:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new scorekeeper client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit a score by wallet address.
    ///
    /// The account is created server-side on first submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn submit_score(&self, submission: SubmitScore) -> Result<ScoreRecord, ClientError> {
        tracing::debug!(
            game_id = submission.game_id,
            address = %submission.address,
            value = submission.score,
            "Submitting score"
        );

        let response = self
            .client
            .post(format!("{}/scores/by-address", self.base_url))
            .json(&submission)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Get the global rank for a wallet address.
    ///
    /// An address with no scores gets the zero-valued "not ranked"
    /// placeholder, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_rank(&self, address: &str) -> Result<RankInfo, ClientError> {
        let response = self
            .client
            .get(format!("{}/rank/{address}", self.base_url))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Record an achievement completion for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn record_achievement(
        &self,
        account_id: i64,
        achievement_id: i64,
        complete: bool,
    ) -> Result<AchievementRecord, ClientError> {
        let response = self
            .client
            .post(format!("{}/achievements", self.base_url))
            .json(&json!({
                "accountId": account_id,
                "achievementId": achievement_id,
                "complete": complete,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Check whether an address has completed an achievement.
    ///
    /// Unknown addresses answer `false`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn check_achievement(
        &self,
        address: &str,
        achievement_id: i64,
    ) -> Result<bool, ClientError> {
        let response = self
            .client
            .post(format!("{}/achievements/check", self.base_url))
            .json(&json!({
                "address": address,
                "achievementId": achievement_id,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Rate a game with a like or dislike.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn rate_game(&self, game_id: i64, is_like: bool) -> Result<RatingCounts, ClientError> {
        let response = self
            .client
            .post(format!("{}/rate", self.base_url))
            .json(&json!({ "gameId": game_id, "isLike": is_like }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Unwrap a response envelope, mapping failures to [`ClientError::Api`].
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<Envelope<serde_json::Value>>()
                .await
                .map_or_else(|_| status.to_string(), |envelope| envelope.err);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}
