//! Bounded in-memory scan history.
//!
//! The history is a newest-first ring of [`ScanRecord`]s capped at a fixed
//! capacity. Inserting past the cap evicts the oldest record. Nothing is
//! persisted; the history lives and dies with the process.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::scan::ScanRecord;

/// Default number of records the history retains.
pub const MAX_RECORDS: usize = 100;

/// Default number of records returned by the recent-history read path.
///
/// Independent of [`MAX_RECORDS`]: the page shows a recent window while
/// export returns everything retained.
pub const RECENT_LIMIT: usize = 50;

/// Shared, capacity-bounded scan history.
///
/// Every operation runs under one mutex so readers never see a sequence in
/// the middle of an insert-then-evict step. The type is `Sync`; share it
/// behind an `Arc`.
#[derive(Debug)]
pub struct HistoryStore {
    /// Maximum number of records retained.
    capacity: usize,
    /// Records, newest at the front.
    records: Mutex<VecDeque<ScanRecord>>,
}

/// A window of the most recent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    /// Records, newest first.
    pub records: Vec<ScanRecord>,
    /// Number of records stored, not just those returned.
    pub total: usize,
}

/// A full copy of the history at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    /// Every stored record, newest first.
    pub records: Vec<ScanRecord>,
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
    /// Number of records exported.
    pub total: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(MAX_RECORDS)
    }
}

impl HistoryStore {
    /// Create an empty history retaining at most `capacity` records.
    ///
    /// A capacity of zero is raised to one; the configuration layer rejects
    /// zero before it gets here.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::new()),
        }
    }

    /// Maximum number of records retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a scan at the head of the history.
    ///
    /// The capture time comes from the server clock. If the history is
    /// full the oldest record is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the history lock was poisoned by a
    /// panicking writer.
    pub fn append(
        &self,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<ScanRecord> {
        let (content, category) = (content.into(), category.into());

        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::internal("scan history lock poisoned"))?;

        // Stamped under the lock so timestamps never decrease head to tail.
        let record = ScanRecord::new(content, category);
        records.push_front(record.clone());
        if records.len() > self.capacity {
            if let Some(evicted) = records.pop_back() {
                trace!("Evicted scan captured at {}", evicted.captured_at);
            }
        }

        debug!(
            "Saved {} scan ({} bytes), history size {}",
            record.category,
            record.content.len(),
            records.len()
        );
        Ok(record)
    }

    /// Return up to `limit` of the newest records plus the total count.
    #[must_use]
    pub fn list_recent(&self, limit: usize) -> RecentHistory {
        let records = self.lock_records();
        RecentHistory {
            records: records.iter().take(limit).cloned().collect(),
            total: records.len(),
        }
    }

    /// Remove every record.
    pub fn clear(&self) {
        let mut records = self.lock_records();
        let removed = records.len();
        records.clear();
        debug!("Cleared {} scans from history", removed);
    }

    /// Return a copy of the whole history stamped with the export time.
    #[must_use]
    pub fn export_all(&self) -> HistoryExport {
        let records: Vec<ScanRecord> = self.lock_records().iter().cloned().collect();
        HistoryExport {
            total: records.len(),
            records,
            exported_at: Utc::now(),
        }
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    /// Check if the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    /// Lock the records for a total operation.
    ///
    /// Appends either complete or never start mutating, so the sequence
    /// behind a poisoned lock is still consistent and safe to use.
    fn lock_records(&self) -> MutexGuard<'_, VecDeque<ScanRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Poison the history lock, for exercising the internal-fault path.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let joined = scope
                .spawn(|| {
                    let _guard = self.records.lock();
                    panic!("poisoning scan history lock");
                })
                .join();
            assert!(joined.is_err());
        });
    }
}
