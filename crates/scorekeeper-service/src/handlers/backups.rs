//! Backup/restore handlers for the score table.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use scorekeeper_store::{backup, BackupInfo, Store};

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Result of a reset-all operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    /// Score rows written to the snapshot.
    pub backed_up_row_count: usize,
    /// Score rows zeroed in place.
    pub reset_row_count: u64,
    /// Name of the snapshot file, usable with the restore endpoint.
    pub backup_file: String,
}

/// Restore request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    /// Name of the snapshot file to replay.
    pub backup_file: String,
}

/// Result of a restore operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    /// Score rows replayed into the table.
    pub restored_count: u64,
}

/// Snapshot all scores to a durable flat file, then zero them in place.
///
/// The snapshot is fully flushed to disk before the zeroing transaction
/// begins; a failure while writing aborts with the score table untouched.
pub async fn reset_all_scores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<ResetResponse>>, ApiError> {
    let rows = state.store.export_scores().await?;

    let backup_dir = state.config.backup_path();
    let backup_file = backup::snapshot_file_name(Utc::now());
    backup::write_snapshot(&backup_dir, &backup_file, &rows).await?;

    let reset_row_count = state.store.zero_all_scores().await?;

    tracing::info!(
        backup_file = %backup_file,
        backed_up = rows.len(),
        reset = reset_row_count,
        "All scores reset"
    );

    Ok(Envelope::ok(ResetResponse {
        backed_up_row_count: rows.len(),
        reset_row_count,
        backup_file,
    }))
}

/// Replay a snapshot file into the score table.
///
/// The snapshot is validated in full before the transaction starts; the
/// replacement commits only if every row inserts, otherwise the prior data
/// set is preserved.
pub async fn restore_scores(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RestoreRequest>,
) -> Result<Json<Envelope<RestoreResponse>>, ApiError> {
    let backup_dir = state.config.backup_path();
    let rows = backup::read_snapshot(&backup_dir, &body.backup_file).await?;
    let restored_count = state.store.replace_all_scores(&rows).await?;

    tracing::info!(
        backup_file = %body.backup_file,
        restored = restored_count,
        "Scores restored from snapshot"
    );

    Ok(Envelope::ok(RestoreResponse { restored_count }))
}

/// Enumerate snapshot files, newest first.
pub async fn list_backups(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<BackupInfo>>>, ApiError> {
    let backups = backup::list_snapshots(&state.config.backup_path()).await?;
    Ok(Envelope::ok(backups))
}
