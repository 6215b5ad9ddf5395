use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Letta agent platform connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LettaConfig {
    /// Used when the env var named by `base_url_env` is unset.
    #[serde(default = "d_letta_url")]
    pub base_url: String,
    #[serde(default = "d_base_url_env")]
    pub base_url_env: String,
    /// Environment variable holding the Letta API key.  Required.
    #[serde(default = "d_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "d_60000")]
    pub timeout_ms: u64,
}

impl Default for LettaConfig {
    fn default() -> Self {
        Self {
            base_url: d_letta_url(),
            base_url_env: d_base_url_env(),
            api_key_env: d_api_key_env(),
            timeout_ms: 60_000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_letta_url() -> String {
    "https://api.letta.com".into()
}
fn d_base_url_env() -> String {
    "LETTA_BASE_URL".into()
}
fn d_api_key_env() -> String {
    "LETTA_API_KEY".into()
}
fn d_60000() -> u64 {
    60_000
}

/// Resolved connection details for the Letta REST API.
#[derive(Debug, Clone)]
pub struct LettaCredentials {
    pub base_url: String,
    pub api_key: String,
}

impl LettaConfig {
    /// Resolve credentials from the process environment.
    pub fn credentials(&self) -> Result<LettaCredentials> {
        self.credentials_from(super::env_value)
    }

    /// Resolve credentials through `lookup` (env-var name → value).
    pub fn credentials_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LettaCredentials> {
        let api_key = lookup(&self.api_key_env)
            .ok_or_else(|| Error::Config(format!("missing {} env var", self.api_key_env)))?;
        let base_url = lookup(&self.base_url_env).unwrap_or_else(|| self.base_url.clone());
        Ok(LettaCredentials { base_url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = LettaConfig::default().credentials_from(|_| None).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("LETTA_API_KEY")));
    }

    #[test]
    fn base_url_env_overrides_file_value() {
        let creds = LettaConfig::default()
            .credentials_from(|name| match name {
                "LETTA_API_KEY" => Some("sk-test".into()),
                "LETTA_BASE_URL" => Some("http://localhost:8283".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(creds.api_key, "sk-test");
        assert_eq!(creds.base_url, "http://localhost:8283");
    }

    #[test]
    fn base_url_falls_back_to_config() {
        let creds = LettaConfig::default()
            .credentials_from(|name| (name == "LETTA_API_KEY").then(|| "k".to_string()))
            .unwrap();
        assert_eq!(creds.base_url, "https://api.letta.com");
    }
}
