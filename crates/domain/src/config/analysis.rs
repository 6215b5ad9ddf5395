use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Match-analysis workflow
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Chat model handle used by every transient agent.
    #[serde(default = "d_model")]
    pub model: String,
    /// Embedding handle used to index uploaded documents.
    #[serde(default = "d_embedding")]
    pub embedding: String,
    /// Program name quoted in the prompts and source instructions.
    #[serde(default = "d_program")]
    pub program_name: String,
    #[serde(default)]
    pub batch_policy: BatchPolicy,
    /// Row count returned by the query endpoint.
    #[serde(default = "d_3")]
    pub query_limit: usize,
}

/// What a batch run does when one match fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Abort the whole batch on the first failure.
    #[default]
    FailFast,
    /// Record the failure and move on to the next match.
    Isolate,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: d_model(),
            embedding: d_embedding(),
            program_name: d_program(),
            batch_policy: BatchPolicy::FailFast,
            query_limit: 3,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_model() -> String {
    "openai/gpt-4o-mini".into()
}
fn d_embedding() -> String {
    "openai/text-embedding-3-small".into()
}
fn d_program() -> String {
    "Phoenix Rivals".into()
}
fn d_3() -> usize {
    3
}
