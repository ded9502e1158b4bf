use std::sync::Arc;

use medidoc_pipeline::SummaryOrchestrator;

use crate::config::ServerConfig;
use crate::sessions::SessionSlots;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: medidoc_db::DbPool,
    /// Server configuration (read by the IP allow-list middleware).
    pub config: Arc<ServerConfig>,
    /// Generation orchestrator with the configured providers.
    pub orchestrator: Arc<SummaryOrchestrator>,
    /// One generation slot per browser session.
    pub sessions: Arc<SessionSlots>,
}
