//! The structured analysis result and its stored-row form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::namespace::NamespaceBundle;

/// One match's analysis as produced by the workflow (camelCase on the
/// HTTP wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysisPayload {
    pub match_id: String,
    pub team_id: String,
    pub match_date: String,
    pub namespace: NamespaceBundle,
    pub source_id: String,
    pub agent_id: String,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risk_notes: Vec<String>,
    /// The agent's reply, verbatim.
    pub raw: serde_json::Map<String, serde_json::Value>,
}

/// A row of the `match_summaries` table. `match_id` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummaryRow {
    pub match_id: String,
    pub team_id: String,
    pub match_date: String,
    pub source_id: String,
    pub agent_id: String,
    pub namespace: NamespaceBundle,
    pub payload: serde_json::Map<String, serde_json::Value>,
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub risk_notes: Vec<String>,
    pub analysis_generated_at: DateTime<Utc>,
}

impl MatchSummaryRow {
    /// Build the row for `payload`, stamped with the current time.
    pub fn stamped(payload: &MatchAnalysisPayload) -> Self {
        Self::with_timestamp(payload, Utc::now())
    }

    pub fn with_timestamp(payload: &MatchAnalysisPayload, generated_at: DateTime<Utc>) -> Self {
        Self {
            match_id: payload.match_id.clone(),
            team_id: payload.team_id.clone(),
            match_date: payload.match_date.clone(),
            source_id: payload.source_id.clone(),
            agent_id: payload.agent_id.clone(),
            namespace: payload.namespace.clone(),
            payload: payload.raw.clone(),
            summary: payload.summary.clone(),
            recommendations: payload.recommendations.clone(),
            risk_notes: payload.risk_notes.clone(),
            analysis_generated_at: generated_at,
        }
    }
}

/// Nullable `text[]` columns read back as `null`; treat that as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The projection of a stored row returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDigest {
    pub match_id: String,
    pub team_id: String,
    pub match_date: String,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risk_notes: Vec<String>,
}

impl From<MatchSummaryRow> for MatchDigest {
    fn from(row: MatchSummaryRow) -> Self {
        Self {
            match_id: row.match_id,
            team_id: row.team_id,
            match_date: row.match_date,
            summary: row.summary,
            recommendations: row.recommendations,
            risk_notes: row.risk_notes,
        }
    }
}
