//! Data Transfer Objects for the Letta REST API (v1).
//!
//! The REST API is `snake_case` on the wire, so unlike the dataset files
//! no field renaming is applied.  Response types default every field they
//! can, because the platform adds fields between releases.

use serde::{Deserialize, Serialize};

/// `message_type` tag of the replies the analysis workflow reads.
pub const ASSISTANT_MESSAGE: &str = "assistant_message";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Sources
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /v1/sources/: one entry of the response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// POST /v1/sources/: request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSourceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// What the platform does when a file with the same name already exists
/// in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateHandling {
    Skip,
    Error,
    Suffix,
    Replace,
}

impl DuplicateHandling {
    pub fn as_str(self) -> &'static str {
        match self {
            DuplicateHandling::Skip => "skip",
            DuplicateHandling::Error => "error",
            DuplicateHandling::Suffix => "suffix",
            DuplicateHandling::Replace => "replace",
        }
    }
}

/// A document to upload into a source (sent as multipart `file`).
#[derive(Debug, Clone)]
pub struct UploadDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub duplicate_handling: DuplicateHandling,
}

impl UploadDocument {
    /// Pretty-printed JSON document that replaces any same-named file.
    pub fn json_replace<T: Serialize + ?Sized>(
        filename: &str,
        value: &T,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            filename: filename.to_owned(),
            content_type: "application/json".into(),
            bytes: serde_json::to_vec_pretty(value)?,
            duplicate_handling: DuplicateHandling::Replace,
        })
    }
}

/// POST /v1/sources/{id}/upload: response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub processing_status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Agents
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// POST /v1/agents/: request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub model: String,
    pub embedding: String,
    pub system: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_ids: Vec<String>,
    /// `{"type": "json_schema", "json_schema": {...}}` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub include_base_tools: bool,
}

/// POST /v1/agents/: response body (only the fields we read).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreate {
    pub role: String,
    pub content: String,
}

impl MessageCreate {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// POST /v1/agents/{id}/messages: request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LettaRequest {
    pub messages: Vec<MessageCreate>,
}

impl LettaRequest {
    /// A request carrying exactly one user turn.
    pub fn single_user_turn(content: impl Into<String>) -> Self {
        Self {
            messages: vec![MessageCreate::user(content)],
        }
    }
}

/// One message of the exchange.  `content` is left untyped: assistant
/// replies carry a string, other message types carry structured data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LettaMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<String>,
}

impl LettaMessage {
    pub fn is_assistant(&self) -> bool {
        self.message_type.as_deref() == Some(ASSISTANT_MESSAGE)
    }
}

/// POST /v1/agents/{id}/messages: response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LettaResponse {
    #[serde(default)]
    pub messages: Vec<LettaMessage>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
}
