//! Snapshot files for score backup/restore.
//!
//! Snapshots are tabular text files with a fixed column header, one row per
//! score, timestamps in ISO-8601. Filenames embed a sortable UTC timestamp
//! so newest-first ordering is plain name ordering.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, StoreError};

/// Fixed header row of every snapshot file.
pub const SNAPSHOT_HEADER: &str =
    "ID,Score,Game ID,Account ID,Account Address,Game Name,Created At,Updated At";

/// Prefix of snapshot filenames.
const SNAPSHOT_PREFIX: &str = "scores_";

/// Extension of snapshot filenames.
const SNAPSHOT_SUFFIX: &str = ".csv";

/// One score row in snapshot form, labels included.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SnapshotRow {
    /// Score row id.
    pub id: i64,
    /// Score value.
    pub score: i64,
    /// Game the score belongs to.
    pub game_id: i64,
    /// Account that scored.
    pub account_id: i64,
    /// Address of the account at export time.
    pub account_address: String,
    /// Name of the game at export time.
    pub game_name: String,
    /// Original creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Original update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A snapshot file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInfo {
    /// File name within the backup directory.
    pub file: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
}

/// Snapshot filename for a backup taken at `now`.
#[must_use]
pub fn snapshot_file_name(now: DateTime<Utc>) -> String {
    format!(
        "{SNAPSHOT_PREFIX}{}{SNAPSHOT_SUFFIX}",
        now.format("%Y%m%dT%H%M%SZ")
    )
}

/// Whether `name` is a plain snapshot filename.
///
/// Rejects anything that could escape the backup directory.
#[must_use]
pub fn is_snapshot_name(name: &str) -> bool {
    name.starts_with(SNAPSHOT_PREFIX)
        && name.ends_with(SNAPSHOT_SUFFIX)
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

/// Write `rows` to `dir/name`, durably flushed before returning.
///
/// The file is fully synced to disk (`sync_all`) so a crash after this
/// function returns cannot lose the backup.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub async fn write_snapshot(dir: &Path, name: &str, rows: &[SnapshotRow]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let mut contents = String::with_capacity(64 * (rows.len() + 1));
    contents.push_str(SNAPSHOT_HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            row.id,
            row.score,
            row.game_id,
            row.account_id,
            row.account_address,
            row.game_name,
            row.created_at.to_rfc3339(),
            row.updated_at.to_rfc3339(),
        ));
    }

    let path = dir.join(name);
    let mut file = tokio::fs::File::create(&path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Snapshot written");

    Ok(path)
}

/// Read and parse the snapshot `dir/name`.
///
/// # Errors
///
/// Returns [`StoreError::Snapshot`] if the name is invalid, the file is
/// missing, or any row is malformed.
pub async fn read_snapshot(dir: &Path, name: &str) -> Result<Vec<SnapshotRow>> {
    if !is_snapshot_name(name) {
        return Err(StoreError::Snapshot(format!(
            "invalid snapshot name: {name}"
        )));
    }

    let path = dir.join(name);
    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::Snapshot(format!("snapshot not found: {name}")));
        }
        Err(e) => return Err(StoreError::Io(e)),
    };

    parse_snapshot(&contents)
}

/// Parse snapshot file contents into rows.
///
/// Every data row must carry the full column set with parseable numeric and
/// timestamp fields; the first failure aborts the whole parse.
///
/// # Errors
///
/// Returns [`StoreError::Snapshot`] naming the offending line.
pub fn parse_snapshot(contents: &str) -> Result<Vec<SnapshotRow>> {
    let mut lines = contents.lines();
    let header = lines.next().unwrap_or_default();
    if header != SNAPSHOT_HEADER {
        return Err(StoreError::Snapshot("missing or invalid header".into()));
    }

    let mut rows = Vec::new();
    for (lineno, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let row = parse_row(line)
            .map_err(|reason| StoreError::Snapshot(format!("row {}: {reason}", lineno + 2)))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse a single data row.
///
/// The four leading ids and the two trailing timestamps contain no commas;
/// the game name may, so it spans every field between the address and the
/// timestamps.
fn parse_row(line: &str) -> std::result::Result<SnapshotRow, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 8 {
        return Err(format!("expected 8 columns, got {}", fields.len()));
    }

    let id = parse_i64(fields[0], "id")?;
    let score = parse_i64(fields[1], "score")?;
    if score < 0 {
        return Err(format!("negative score: {score}"));
    }
    let game_id = parse_i64(fields[2], "game id")?;
    let account_id = parse_i64(fields[3], "account id")?;
    let account_address = fields[4].to_string();

    let created_at = parse_timestamp(fields[fields.len() - 2], "created at")?;
    let updated_at = parse_timestamp(fields[fields.len() - 1], "updated at")?;
    let game_name = fields[5..fields.len() - 2].join(",");

    Ok(SnapshotRow {
        id,
        score,
        game_id,
        account_id,
        account_address,
        game_name,
        created_at,
        updated_at,
    })
}

fn parse_i64(raw: &str, what: &str) -> std::result::Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("unparseable {what}: {raw:?}"))
}

fn parse_timestamp(raw: &str, what: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("unparseable {what}: {raw:?}"))
}

/// Enumerate snapshot files in `dir`, newest first by filename.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub async fn list_snapshots(dir: &Path) -> Result<Vec<BackupInfo>> {
    let mut backups = Vec::new();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        // No backups taken yet.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(backups),
        Err(e) => return Err(StoreError::Io(e)),
    };

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_snapshot_name(&name) {
            continue;
        }
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        let modified_at = meta.modified().map(DateTime::<Utc>::from)?;
        backups.push(BackupInfo {
            file: name,
            size_bytes: meta.len(),
            modified_at,
        });
    }

    backups.sort_by(|a, b| b.file.cmp(&a.file));
    Ok(backups)
}
