use std::sync::Arc;

use ps_analysis::MatchAnalysisWorker;
use ps_domain::config::Config;
use ps_letta::AgentPlatform;
use ps_store::SummaryStore;

/// Shared application state passed to all API handlers.
///
/// Clients are built once at bootstrap and shared through `Arc`s; cloning
/// the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub platform: Arc<dyn AgentPlatform>,
    pub store: Arc<dyn SummaryStore>,
    pub worker: Arc<MatchAnalysisWorker>,
    /// SHA-256 of the API bearer token; `None` disables auth (dev mode).
    pub api_token_hash: Option<Vec<u8>>,
}
