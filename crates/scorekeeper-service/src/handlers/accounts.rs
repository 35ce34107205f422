//! Account management handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use scorekeeper_core::Account;
use scorekeeper_store::Store;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Create account request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Wallet address to register.
    pub address: String,
}

/// Update account request.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// Replacement wallet address.
    pub address: String,
}

/// List every account.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<Account>>>, ApiError> {
    let accounts = state.store.list_accounts().await?;
    Ok(Envelope::ok(accounts))
}

/// Get a single account by id.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Account>>, ApiError> {
    let account = state
        .store
        .get_account(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;

    Ok(Envelope::ok(account))
}

/// Register an account by wallet address.
///
/// Registration is find-or-create: re-registering an existing address
/// returns the existing row.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<Json<Envelope<Account>>, ApiError> {
    let address = body.address.trim();
    if address.is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".into()));
    }

    let account = state.store.find_or_create_account(address).await?;

    tracing::info!(account_id = account.id, address = %account.address, "Account registered");

    Ok(Envelope::ok(account))
}

/// Replace an account's address.
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<Json<Envelope<Account>>, ApiError> {
    let address = body.address.trim();
    if address.is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".into()));
    }

    let account = state.store.update_account(id, address).await?;

    tracing::info!(account_id = id, address = %account.address, "Account updated");

    Ok(Envelope::ok(account))
}

/// Delete an account.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Account>>, ApiError> {
    let account = state.store.delete_account(id).await?;

    tracing::info!(account_id = id, "Account deleted");

    Ok(Envelope::ok(account))
}
