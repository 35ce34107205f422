//! Error types for scorekeeper storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Running embedded migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Filesystem operation failed (snapshot files, database directory).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record, e.g. `"account"`.
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// A snapshot file is missing, malformed, or partially unreadable.
    ///
    /// Restores that hit this error have not touched the database.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl StoreError {
    /// Shorthand for a [`StoreError::NotFound`].
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
