//! Request and response bodies for the history API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::history::{HistoryExport, RecentHistory};
use crate::scan::{ScanRecord, UNKNOWN_CATEGORY};

/// Body of `POST /api/save_scan`.
///
/// Build it from the raw body with [`SaveScanRequest::try_from`], which only
/// accepts a JSON object. Both fields are optional. Anything else the page
/// sends (it also sends its own timestamp) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveScanRequest {
    /// Decoded payload.
    #[serde(default)]
    pub content: Option<String>,
    /// Client-side classification.
    #[serde(default, rename = "type")]
    pub category: Option<String>,
}

impl SaveScanRequest {
    /// Split into `(content, category)`, filling in the defaults.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (
            self.content.unwrap_or_default(),
            self.category
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        )
    }
}

impl TryFrom<Value> for SaveScanRequest {
    type Error = Error;

    fn try_from(body: Value) -> Result<Self> {
        // The derived impl also accepts the sequence form of a struct.
        if !body.is_object() {
            return Err(Error::internal("request body must be a JSON object"));
        }
        serde_json::from_value(body)
            .map_err(|e| Error::internal(format!("invalid scan request: {e}")))
    }
}

/// `{success, message}` reply for mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,
    /// Human-readable outcome.
    pub message: &'static str,
}

impl Acknowledgement {
    /// A successful acknowledgement.
    #[must_use]
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Body of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryResponse {
    /// The recent window, newest first.
    pub history: Vec<ScanRecord>,
    /// Number of stored scans.
    pub total: usize,
}

impl From<RecentHistory> for HistoryResponse {
    fn from(recent: RecentHistory) -> Self {
        Self {
            history: recent.records,
            total: recent.total,
        }
    }
}

/// Body of `GET /api/export_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResponse {
    /// Every stored scan, newest first.
    pub export_data: Vec<ScanRecord>,
    /// When the export was produced.
    pub export_time: DateTime<Utc>,
    /// Number of exported scans.
    pub total_scans: usize,
}

impl From<HistoryExport> for ExportResponse {
    fn from(export: HistoryExport) -> Self {
        Self {
            export_data: export.records,
            export_time: export.exported_at,
            total_scans: export.total,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: &'static str,
    /// Current server time.
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// A healthy status stamped with the current time.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}
