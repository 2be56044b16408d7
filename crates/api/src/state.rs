use std::sync::Arc;
use std::time::Instant;

use toyshop_core::ratelimit::FixedWindowLimiter;
use toyshop_core::uploads::UploadStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: toyshop_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Filesystem store for uploaded assets.
    pub uploads: Arc<UploadStore>,
    /// Per-IP fixed-window request limiter.
    pub limiter: Arc<FixedWindowLimiter>,
    /// Process start time, reported as uptime by the health endpoint.
    pub started_at: Instant,
}
