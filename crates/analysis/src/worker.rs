//! Batch driver for the match-analysis workflow.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use ps_domain::config::{AnalysisConfig, BatchPolicy};
use ps_domain::dataset::MatchDataset;
use ps_domain::error::Result;
use ps_domain::namespace::{namespace_metadata, NamespaceBundle};
use ps_domain::summary::MatchAnalysisPayload;
use ps_domain::trace::TraceEvent;
use ps_letta::{AgentPlatform, CreateAgentRequest, LettaRequest};
use ps_store::SummaryStore;

use crate::agent::with_transient_agent;
use crate::dataset::DatasetLoader;
use crate::extract::{extract_assistant_json, AgentReply};
use crate::ingest::sync_match_into_letta;
use crate::summaries::{
    build_summarization_system_prompt, build_summarization_user_prompt,
    match_summary_response_format,
};

/// A match that failed under [`BatchPolicy::Isolate`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFailure {
    pub match_id: String,
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub processed: usize,
    pub results: Vec<MatchAnalysisPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<MatchFailure>,
}

/// Runs the sync → agent → extract → store pipeline, one match at a time.
///
/// Clients are injected so the same worker runs against Letta/Supabase in
/// production and against test doubles in tests.
pub struct MatchAnalysisWorker {
    platform: Arc<dyn AgentPlatform>,
    store: Arc<dyn SummaryStore>,
    datasets: DatasetLoader,
    config: AnalysisConfig,
}

impl MatchAnalysisWorker {
    pub fn new(
        platform: Arc<dyn AgentPlatform>,
        store: Arc<dyn SummaryStore>,
        datasets: DatasetLoader,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            platform,
            store,
            datasets,
            config,
        }
    }

    /// Analyze every dataset in the directory, in `match_id` order.
    pub async fn run_all(&self) -> Result<AnalysisReport> {
        let matches = self.datasets.load_all().await?;
        let mut report = AnalysisReport::default();

        for dataset in &matches {
            match self.analyze_match(dataset).await {
                Ok(payload) => report.results.push(payload),
                Err(e) => {
                    TraceEvent::MatchFailed {
                        match_id: dataset.match_id.clone(),
                        error: e.to_string(),
                    }
                    .emit();
                    if self.config.batch_policy == BatchPolicy::FailFast {
                        return Err(e);
                    }
                    report.failures.push(MatchFailure {
                        match_id: dataset.match_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.processed = report.results.len();
        Ok(report)
    }

    /// Analyze a single match by id; `None` when no dataset file exists.
    pub async fn run_one(&self, match_id: &str) -> Result<Option<MatchAnalysisPayload>> {
        match self.datasets.load(match_id).await? {
            Some(dataset) => self.analyze_match(&dataset).await.map(Some),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip_all, fields(match_id = %dataset.match_id))]
    pub async fn analyze_match(&self, dataset: &MatchDataset) -> Result<MatchAnalysisPayload> {
        let namespace = namespace_metadata(&dataset.team_id, &dataset.match_id);
        let platform = self.platform.as_ref();

        let source_id =
            sync_match_into_letta(platform, &self.config.program_name, dataset).await?;

        let request = self.agent_request(dataset, &namespace, &source_id);
        let prompt = build_summarization_user_prompt(&self.config.program_name, dataset);

        with_transient_agent(platform, request, |agent_id| async move {
            let turn = platform
                .send_message(&agent_id, LettaRequest::single_user_turn(prompt))
                .await?;
            let reply = AgentReply::from_object(extract_assistant_json(&turn.messages)?);

            let payload = MatchAnalysisPayload {
                match_id: dataset.match_id.clone(),
                team_id: dataset.team_id.clone(),
                match_date: dataset.metadata.date.clone(),
                namespace,
                source_id,
                agent_id,
                summary: reply.summary,
                recommendations: reply.recommendations,
                risk_notes: reply.risk_notes,
                raw: reply.raw,
            };

            self.store.upsert(&payload).await?;
            TraceEvent::SummaryStored {
                match_id: payload.match_id.clone(),
                recommendations: payload.recommendations.len(),
                risk_notes: payload.risk_notes.len(),
            }
            .emit();
            Ok(payload)
        })
        .await
    }

    fn agent_request(
        &self,
        dataset: &MatchDataset,
        namespace: &NamespaceBundle,
        source_id: &str,
    ) -> CreateAgentRequest {
        CreateAgentRequest {
            name: format!("analysis-{}", namespace.match_ns),
            model: self.config.model.clone(),
            embedding: self.config.embedding.clone(),
            system: build_summarization_system_prompt(&self.config.program_name, &dataset.team_id),
            source_ids: vec![source_id.to_owned()],
            response_format: Some(match_summary_response_format()),
            metadata: Some(json!({
                "team": namespace.team,
                "match": namespace.match_ns,
                "matchDate": dataset.metadata.date,
            })),
            include_base_tools: false,
        }
    }
}
