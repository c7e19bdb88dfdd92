use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Injected model capability. Production: `GeminiClient`; tests swap in a
    /// deterministic stand-in.
    pub model: Arc<dyn GenerativeModel>,
    pub config: Config,
    /// Admits at most one refresh at a time, regardless of what triggers it.
    pub sync_gate: Arc<Mutex<()>>,
}
