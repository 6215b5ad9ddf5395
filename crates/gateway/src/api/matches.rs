use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use ps_analysis::AnalysisReport;
use ps_domain::error::Error;
use ps_domain::summary::{MatchDigest, MatchSummaryRow};

use crate::api::error::ApiResult;
use crate::state::AppState;

/// The one question the query endpoint understands.
pub const CANONICAL_QUESTION: &str = "summarize last 3 matches";
pub const UNKNOWN_QUESTION_NOTE: &str =
    "Query did not match known prompts. Returning recent summaries without aggregation.";

/// POST /api/matches/analyze
///
/// The batch runs on its own task: a client that disconnects mid-request
/// must not cancel a pipeline between agent creation and deletion.
pub async fn analyze(State(state): State<AppState>) -> ApiResult<Json<AnalysisReport>> {
    let worker = state.worker.clone();
    let report = tokio::spawn(async move { worker.run_all().await })
        .await
        .map_err(|e| Error::Other(format!("analysis task failed: {e}")))??;

    tracing::info!(
        processed = report.processed,
        failures = report.failures.len(),
        "analysis batch finished"
    );
    Ok(Json(report))
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub question: String,
    pub matches: Vec<MatchDigest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// POST /api/matches/query
pub async fn query(
    State(state): State<AppState>,
    body: Option<Json<QueryBody>>,
) -> ApiResult<Json<QueryResponse>> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let rows = state.store.recent(state.config.analysis.query_limit).await?;

    let note = (!body.question.to_lowercase().contains(CANONICAL_QUESTION))
        .then_some(UNKNOWN_QUESTION_NOTE);

    Ok(Json(QueryResponse {
        question: body.question,
        matches: rows.into_iter().map(MatchDigest::from).collect(),
        note,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// GET /api/matches/recent?limit=N
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<Vec<MatchSummaryRow>>> {
    let limit = params.limit.unwrap_or(state.config.analysis.query_limit);
    Ok(Json(state.store.recent(limit).await?))
}
