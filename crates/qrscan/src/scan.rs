//! Core scan record type.
//!
//! A [`ScanRecord`] is one decoded QR payload as submitted by the browser,
//! stamped with the server's clock at the moment it entered the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category stored when the client does not send one.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A single decoded QR payload.
///
/// Serialized as `{"content": .., "type": .., "timestamp": ..}`; the field
/// names on the wire are the ones the scanner page reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// The decoded text, stored verbatim.
    pub content: String,

    /// Client-assigned label such as `URL`, `Email` or `WiFi`.
    ///
    /// Opaque to the server; it is never validated or normalized.
    #[serde(rename = "type")]
    pub category: String,

    /// When the server accepted this record.
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

impl ScanRecord {
    /// Create a new record stamped with the current time.
    #[must_use]
    pub fn new(content: impl Into<String>, category: impl Into<String>) -> Self {
        Self::at(content, category, Utc::now())
    }

    /// Create a record with an explicit capture time.
    #[must_use]
    pub fn at(
        content: impl Into<String>,
        category: impl Into<String>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content: content.into(),
            category: category.into(),
            captured_at,
        }
    }
}
