//! Test doubles shared by the workflow integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use ps_domain::error::{Error, Result};
use ps_domain::summary::{MatchAnalysisPayload, MatchSummaryRow};
use ps_letta::{
    AgentPlatform, AgentState, CreateAgentRequest, CreateSourceRequest, FileMetadata,
    LettaMessage, LettaRequest, LettaResponse, Source, UploadDocument,
};
use ps_store::SummaryStore;

/// Everything the scripted platform saw.
#[derive(Debug, Default)]
pub struct Calls {
    pub sources: Vec<Source>,
    pub list_calls: usize,
    pub created_sources: Vec<CreateSourceRequest>,
    pub uploads: Vec<(String, String, Vec<u8>)>,
    pub created_agents: Vec<CreateAgentRequest>,
    pub live_agents: HashSet<String>,
    pub deleted_agents: Vec<String>,
    pub sent: Vec<(String, LettaRequest)>,
    failing_agents: HashSet<String>,
    next_id: u32,
}

/// An in-memory `AgentPlatform` whose agents answer with a fixed script.
pub struct ScriptedPlatform {
    pub calls: Mutex<Calls>,
    reply: Vec<LettaMessage>,
    fail_send: bool,
    fail_delete: bool,
    sources_without_id: bool,
    sources_with_empty_id: bool,
    agents_without_id: bool,
    failing_match: Option<String>,
}

impl ScriptedPlatform {
    /// Agents reply with one assistant message whose content is `text`.
    pub fn replying(text: &str) -> Self {
        Self::with_messages(vec![
            message("reasoning_message", json!("thinking")),
            message("assistant_message", json!(text)),
        ])
    }

    pub fn with_messages(reply: Vec<LettaMessage>) -> Self {
        Self {
            calls: Mutex::new(Calls::default()),
            reply,
            fail_send: false,
            fail_delete: false,
            sources_without_id: false,
            sources_with_empty_id: false,
            agents_without_id: false,
            failing_match: None,
        }
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn creating_sources_without_id(mut self) -> Self {
        self.sources_without_id = true;
        self
    }

    /// Listed and created sources carry `Some("")` as their id.
    pub fn creating_sources_with_empty_id(mut self) -> Self {
        self.sources_with_empty_id = true;
        self
    }

    pub fn creating_agents_without_id(mut self) -> Self {
        self.agents_without_id = true;
        self
    }

    /// Only the agent created for `match_id` fails its exchange.
    pub fn failing_match(mut self, match_id: &str) -> Self {
        self.failing_match = Some(format!("match:{match_id}"));
        self
    }

    pub fn live_agent_count(&self) -> usize {
        self.calls.lock().live_agents.len()
    }
}

pub fn message(message_type: &str, content: Value) -> LettaMessage {
    LettaMessage {
        id: None,
        message_type: Some(message_type.into()),
        content: Some(content),
        date: None,
    }
}

#[async_trait]
impl AgentPlatform for ScriptedPlatform {
    async fn list_sources(&self) -> Result<Vec<Source>> {
        let mut calls = self.calls.lock();
        calls.list_calls += 1;
        Ok(calls.sources.clone())
    }

    async fn create_source(&self, req: CreateSourceRequest) -> Result<Source> {
        let mut calls = self.calls.lock();
        calls.next_id += 1;
        let id = if self.sources_with_empty_id {
            Some(String::new())
        } else {
            (!self.sources_without_id).then(|| format!("source-{}", calls.next_id))
        };
        let source = Source {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            instructions: req.instructions.clone(),
            metadata: req.metadata.clone(),
        };
        calls.sources.push(source.clone());
        calls.created_sources.push(req);
        Ok(source)
    }

    async fn upload_file(&self, source_id: &str, doc: UploadDocument) -> Result<FileMetadata> {
        let mut calls = self.calls.lock();
        // Replace semantics: drop any earlier upload with the same name.
        calls
            .uploads
            .retain(|(sid, name, _)| !(sid == source_id && *name == doc.filename));
        calls
            .uploads
            .push((source_id.to_owned(), doc.filename.clone(), doc.bytes));
        Ok(FileMetadata {
            id: Some(format!("file-{}", doc.filename)),
            source_id: Some(source_id.to_owned()),
            file_name: Some(doc.filename),
            processing_status: Some("completed".into()),
        })
    }

    async fn create_agent(&self, req: CreateAgentRequest) -> Result<AgentState> {
        let mut calls = self.calls.lock();
        if self.agents_without_id {
            let name = req.name.clone();
            calls.created_agents.push(req);
            return Ok(AgentState { id: None, name });
        }
        calls.next_id += 1;
        let id = format!("agent-{}", calls.next_id);
        calls.live_agents.insert(id.clone());
        if let Some(ns) = &self.failing_match {
            if req.name.ends_with(ns.as_str()) {
                calls.failing_agents.insert(id.clone());
            }
        }
        let name = req.name.clone();
        calls.created_agents.push(req);
        Ok(AgentState { id: Some(id), name })
    }

    async fn send_message(&self, agent_id: &str, req: LettaRequest) -> Result<LettaResponse> {
        let mut calls = self.calls.lock();
        calls.sent.push((agent_id.to_owned(), req));
        if self.fail_send || calls.failing_agents.contains(agent_id) {
            return Err(Error::AgentPlatform("messages returned 500: upstream".into()));
        }
        Ok(LettaResponse {
            messages: self.reply.clone(),
            usage: None,
        })
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        if self.fail_delete {
            return Err(Error::AgentPlatform("delete returned 500".into()));
        }
        let mut calls = self.calls.lock();
        calls.live_agents.remove(agent_id);
        calls.deleted_agents.push(agent_id.to_owned());
        Ok(())
    }
}

/// A store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl SummaryStore for FailingStore {
    async fn upsert(&self, _payload: &MatchAnalysisPayload) -> Result<MatchSummaryRow> {
        Err(Error::Persistence(
            "failed to store summary in Supabase: relation does not exist".into(),
        ))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<MatchSummaryRow>> {
        Ok(Vec::new())
    }
}

/// Write `match-<id>.json` into `dir`.
pub fn write_match(dir: &Path, team_id: &str, match_id: &str, opponent: &str, date: &str) {
    let dataset = json!({
        "teamId": team_id,
        "matchId": match_id,
        "metadata": {
            "opponent": opponent,
            "date": date,
            "location": "Desert Dome",
            "competition": "Valley League",
            "result": "W",
            "score": { "team": 81, "opponent": 79 },
            "narrative": "Won on a late stop."
        },
        "playerBios": [{
            "playerId": "p-12",
            "name": "Marcus Reed",
            "position": "C",
            "experience": "Senior",
            "playingStyle": "Rim protector",
            "seasonNotes": "Heavy minutes in February."
        }],
        "coachStrategies": [{
            "coachId": "c-1",
            "name": "Dana Ortiz",
            "role": "Head Coach",
            "gamePlan": "Pack the paint",
            "adjustments": ["Switch to zone in Q3"]
        }],
        "events": [
            { "clock": "Q4 00:42", "description": "Charge drawn", "impact": "Sealed the win" }
        ],
        "metrics": {
            "pace": 96.2,
            "offensiveRating": 109.4,
            "defensiveRating": 101.7,
            "turnoverRate": 13.5,
            "effectiveFieldGoalPercentage": 0.512,
            "reboundMargin": "-3",
            "notes": "Lost the glass."
        }
    });
    std::fs::write(
        dir.join(format!("match-{match_id}.json")),
        serde_json::to_string_pretty(&dataset).unwrap(),
    )
    .unwrap();
}
