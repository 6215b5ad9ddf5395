use serde::Serialize;

/// Structured trace events emitted across all Phoenix Scout crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    LettaCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    StoreCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    DatasetsLoaded {
        dir: String,
        count: usize,
    },
    SourceResolved {
        source_name: String,
        source_id: String,
        created: bool,
    },
    DocumentUploaded {
        source_id: String,
        filename: String,
        bytes: usize,
    },
    AgentCreated {
        agent_id: String,
        agent_name: String,
    },
    AgentDeleted {
        agent_id: String,
        after_error: bool,
    },
    SummaryStored {
        match_id: String,
        recommendations: usize,
        risk_notes: usize,
    },
    MatchFailed {
        match_id: String,
        error: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ps_event");
    }
}
