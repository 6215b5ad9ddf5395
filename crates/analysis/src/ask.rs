//! One-off question to a throwaway assistant (the `/api/ask` demo).

use serde::Serialize;

use ps_domain::config::AnalysisConfig;
use ps_domain::error::Result;
use ps_letta::{AgentPlatform, CreateAgentRequest, LettaRequest};

use crate::agent::with_transient_agent;
use crate::extract::assistant_text;

pub const DEFAULT_MESSAGE: &str = "Say hello!";
pub const NO_REPLY: &str = "No reply.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskReply {
    pub agent_id: String,
    pub reply: String,
}

/// Create a plain demo agent, send `message` (or [`DEFAULT_MESSAGE`] when
/// blank), and return its last text reply.  The agent is deleted before
/// returning.
pub async fn ask_once(
    platform: &dyn AgentPlatform,
    config: &AnalysisConfig,
    message: &str,
) -> Result<AskReply> {
    let message = match message.trim() {
        "" => DEFAULT_MESSAGE,
        _ => message,
    };

    let request = CreateAgentRequest {
        name: "scout-demo-agent".into(),
        model: config.model.clone(),
        embedding: config.embedding.clone(),
        system: "You are a concise, friendly demo assistant.".into(),
        source_ids: Vec::new(),
        response_format: None,
        metadata: None,
        include_base_tools: false,
    };

    with_transient_agent(platform, request, |agent_id| async move {
        let turn = platform
            .send_message(&agent_id, LettaRequest::single_user_turn(message))
            .await?;
        let reply = assistant_text(&turn.messages).unwrap_or(NO_REPLY).to_owned();
        Ok(AskReply { agent_id, reply })
    })
    .await
}
