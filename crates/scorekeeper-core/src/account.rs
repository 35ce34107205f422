//! Account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant account.
///
/// Accounts are identified by a unique wallet address (the immutable business
/// key) and created either by explicit registration or on first score
/// submission by address. They are never deleted by normal flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Surrogate key.
    pub id: i64,
    /// Wallet address, unique across all accounts.
    pub address: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
