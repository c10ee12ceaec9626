//! `qrscan` - backend for a browser QR code scanner
//!
//! The browser decodes QR codes and posts the payloads here. This library
//! keeps them in a bounded, newest-first, in-memory history and exposes that
//! history over a small JSON HTTP API.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod scan;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use history::{HistoryExport, HistoryStore, RecentHistory, MAX_RECORDS, RECENT_LIMIT};
pub use logging::init_logging;
pub use scan::ScanRecord;
pub use server::{build_router, serve, AppState};
