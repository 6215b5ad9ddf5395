//! Process-local [`SummaryStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use ps_domain::error::Result;
use ps_domain::summary::{MatchAnalysisPayload, MatchSummaryRow};

use crate::provider::SummaryStore;

/// A `HashMap` keyed by match id; the map key enforces one row per match.
#[derive(Debug, Default)]
pub struct MemorySummaryStore {
    rows: RwLock<HashMap<String, MatchSummaryRow>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    pub fn get(&self, match_id: &str) -> Option<MatchSummaryRow> {
        self.rows.read().get(match_id).cloned()
    }
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn upsert(&self, payload: &MatchAnalysisPayload) -> Result<MatchSummaryRow> {
        let row = MatchSummaryRow::stamped(payload);
        self.rows.write().insert(row.match_id.clone(), row.clone());
        Ok(row)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<MatchSummaryRow>> {
        let mut rows: Vec<MatchSummaryRow> = self.rows.read().values().cloned().collect();
        // ISO dates order lexicographically.
        rows.sort_by(|a, b| {
            b.match_date
                .cmp(&a.match_date)
                .then_with(|| a.match_id.cmp(&b.match_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
