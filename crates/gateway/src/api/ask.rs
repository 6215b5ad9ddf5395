use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use ps_analysis::{ask_once, AskReply};
use ps_domain::error::Error;

use crate::api::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AskBody {
    #[serde(default)]
    pub message: String,
}

/// POST /api/ask: one exchange with a throwaway demo agent.
pub async fn ask(
    State(state): State<AppState>,
    body: Option<Json<AskBody>>,
) -> ApiResult<Json<AskReply>> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let platform = state.platform.clone();
    let analysis = state.config.analysis.clone();

    let reply = tokio::spawn(async move {
        ask_once(platform.as_ref(), &analysis, &body.message).await
    })
    .await
    .map_err(|e| Error::Other(format!("ask task failed: {e}")))??;

    Ok(Json(reply))
}
