use async_trait::async_trait;
use ps_domain::error::Result;
use ps_domain::summary::{MatchAnalysisPayload, MatchSummaryRow};

/// Persistence contract for match summaries.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Insert or overwrite the row keyed by `payload.match_id`, stamping a
    /// fresh `analysis_generated_at`.  Returns the row as written.
    async fn upsert(&self, payload: &MatchAnalysisPayload) -> Result<MatchSummaryRow>;

    /// Up to `limit` rows, most recent `match_date` first.
    async fn recent(&self, limit: usize) -> Result<Vec<MatchSummaryRow>>;
}
