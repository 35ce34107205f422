//! The standard response envelope.

use axum::Json;
use serde::Serialize;

/// Response envelope wrapping every payload: `{code, err, data}`.
///
/// `code = 200` denotes success regardless of whether `data` is empty;
/// failures carry the matching HTTP status in `code` and a message in `err`
/// with `data: null`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Status code, mirroring the HTTP status.
    pub code: u16,
    /// Error message; empty on success.
    pub err: String,
    /// The payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap `data` in a success envelope.
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            code: 200,
            err: String::new(),
            data,
        })
    }
}

impl Envelope<serde_json::Value> {
    /// An error envelope with the given status and message; `data` is null.
    #[must_use]
    pub fn error(code: u16, err: impl Into<String>) -> Self {
        Self {
            code,
            err: err.into(),
            data: serde_json::Value::Null,
        }
    }
}
