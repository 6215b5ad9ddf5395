//! The `AgentPlatform` trait defines the interface the workflow expects
//! from the hosted agent service (REST client or test double).

use async_trait::async_trait;
use ps_domain::error::Result;

use crate::types::{
    AgentState, CreateAgentRequest, CreateSourceRequest, FileMetadata, LettaRequest,
    LettaResponse, Source, UploadDocument,
};

/// Abstraction over the Letta API surface used by Phoenix Scout.
///
/// All methods return `ps_domain::error::Result`.  Implementations do not
/// retry; failures surface to the caller as-is.
#[async_trait]
pub trait AgentPlatform: Send + Sync {
    /// List every source visible to the API key (GET /v1/sources/).
    async fn list_sources(&self) -> Result<Vec<Source>>;

    /// Create a named source (POST /v1/sources/).
    async fn create_source(&self, req: CreateSourceRequest) -> Result<Source>;

    /// Upload a document into a source (POST /v1/sources/{id}/upload).
    async fn upload_file(&self, source_id: &str, doc: UploadDocument) -> Result<FileMetadata>;

    /// Create an agent (POST /v1/agents/).
    async fn create_agent(&self, req: CreateAgentRequest) -> Result<AgentState>;

    /// Send one turn and receive the resulting messages
    /// (POST /v1/agents/{id}/messages).
    async fn send_message(&self, agent_id: &str, req: LettaRequest) -> Result<LettaResponse>;

    /// Delete an agent (DELETE /v1/agents/{id}).
    async fn delete_agent(&self, agent_id: &str) -> Result<()>;
}
