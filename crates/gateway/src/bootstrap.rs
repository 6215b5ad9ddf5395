//! AppState construction shared by `serve` and the one-shot CLI commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sha2::{Digest, Sha256};

use ps_analysis::{DatasetLoader, MatchAnalysisWorker};
use ps_domain::config::{env_value, Config, ConfigSeverity};
use ps_letta::{AgentPlatform, RestLettaClient};
use ps_store::{create_store, SummaryStore};

use crate::state::AppState;

/// Validate config, build the Letta and store clients once, and return a
/// fully-wired [`AppState`].  Missing credentials are fatal here.
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let error_count = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if error_count > 0 {
        anyhow::bail!("config validation failed with {error_count} error(s)");
    }

    // ── Letta client ─────────────────────────────────────────────────
    let creds = config
        .letta
        .credentials()
        .context("resolving Letta credentials")?;
    let platform: Arc<dyn AgentPlatform> = Arc::new(
        RestLettaClient::new(&creds, Duration::from_millis(config.letta.timeout_ms))
            .context("creating Letta client")?,
    );
    tracing::info!(url = %creds.base_url, "Letta client ready");

    // ── Summary store ────────────────────────────────────────────────
    let store = create_store(&config.store).context("creating summary store")?;

    // ── API bearer token ─────────────────────────────────────────────
    let env_var = &config.server.api_token_env;
    let api_token_hash = match env_value(env_var) {
        Some(token) => {
            tracing::info!(source = %env_var, "API bearer-token auth enabled");
            Some(api_token_digest(&token))
        }
        None => {
            tracing::warn!("API bearer-token auth DISABLED; set the {env_var} env var");
            None
        }
    };

    Ok(assemble(config, platform, store, api_token_hash))
}

/// Wire already-built clients into an [`AppState`].
pub fn assemble(
    config: Arc<Config>,
    platform: Arc<dyn AgentPlatform>,
    store: Arc<dyn SummaryStore>,
    api_token_hash: Option<Vec<u8>>,
) -> AppState {
    let datasets = DatasetLoader::new(config.dataset.dir.clone());
    tracing::info!(dir = %config.dataset.dir.display(), "dataset directory");

    let worker = Arc::new(MatchAnalysisWorker::new(
        platform.clone(),
        store.clone(),
        datasets,
        config.analysis.clone(),
    ));

    AppState {
        config,
        platform,
        store,
        worker,
        api_token_hash,
    }
}

pub fn api_token_digest(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}
