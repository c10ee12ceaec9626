//! HTTP server for the scanner page and its history API.
//!
//! Routes:
//!
//! | Method | Path                     | Operation                |
//! |--------|--------------------------|--------------------------|
//! | GET    | `/`                      | scanner page             |
//! | POST   | `/api/save_scan`         | append a scan            |
//! | GET    | `/api/history`           | recent window + total    |
//! | DELETE | `/api/history/clear`     | clear the history        |
//! | GET    | `/api/export_history`    | full export              |
//! | GET    | `/health`                | liveness probe           |

mod handlers;
mod models;
mod request_tracing;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::history::HistoryStore;

pub use models::{
    Acknowledgement, ExportResponse, HealthResponse, HistoryResponse, SaveScanRequest,
};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process-wide scan history.
    history: Arc<HistoryStore>,
    /// Number of records served by the recent-history endpoint.
    recent_limit: usize,
    /// Counter for request ids.
    request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// Create handler state over an existing history.
    #[must_use]
    pub fn new(history: Arc<HistoryStore>, recent_limit: usize) -> Self {
        Self {
            history,
            recent_limit,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Build state from configuration with a fresh, empty history.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HistoryStore::new(config.history.max_records)),
            config.history.recent_limit,
        )
    }

    /// The shared history.
    #[must_use]
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Number of records served by the recent-history endpoint.
    #[must_use]
    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub(crate) fn next_request_id(&self) -> String {
        let id = self.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/save_scan", post(handlers::save_scan_handler))
        .route("/api/history", get(handlers::history_handler))
        .route("/api/history/clear", delete(handlers::clear_history_handler))
        .route("/api/export_history", get(handlers::export_history_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let state = AppState::from_config(config);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;

    info!(
        "qrscan listening on http://{} (history capacity {}, recent window {})",
        listener.local_addr()?,
        state.history().capacity(),
        state.recent_limit()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("qrscan stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
