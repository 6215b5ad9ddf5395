use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Summary store (Supabase / PostgREST)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "d_backend")]
    pub backend: StoreBackend,
    /// Environment variable holding the Supabase project URL.
    #[serde(default = "d_url_env")]
    pub url_env: String,
    /// Environment variable holding the service-role key.
    #[serde(default = "d_key_env")]
    pub key_env: String,
    #[serde(default = "d_table")]
    pub table: String,
    #[serde(default = "d_8000")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Supabase REST (PostgREST): the production backend.
    Postgrest,
    /// Process-local table; contents are lost on exit.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgrest,
            url_env: d_url_env(),
            key_env: d_key_env(),
            table: d_table(),
            timeout_ms: 8000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_backend() -> StoreBackend {
    StoreBackend::Postgrest
}
fn d_url_env() -> String {
    "SUPABASE_URL".into()
}
fn d_key_env() -> String {
    "SUPABASE_SERVICE_ROLE_KEY".into()
}
fn d_table() -> String {
    "match_summaries".into()
}
fn d_8000() -> u64 {
    8000
}

/// Resolved connection details for the Supabase REST API.
#[derive(Debug, Clone)]
pub struct SupabaseCredentials {
    pub url: String,
    pub service_key: String,
}

impl StoreConfig {
    /// Resolve credentials from the process environment.
    pub fn credentials(&self) -> Result<SupabaseCredentials> {
        self.credentials_from(super::env_value)
    }

    /// Resolve credentials through `lookup`.  Both values are required.
    pub fn credentials_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SupabaseCredentials> {
        match (lookup(&self.url_env), lookup(&self.key_env)) {
            (Some(url), Some(service_key)) => Ok(SupabaseCredentials { url, service_key }),
            _ => Err(Error::Config(format!(
                "Supabase service credentials are missing ({}, {})",
                self.url_env, self.key_env
            ))),
        }
    }
}
