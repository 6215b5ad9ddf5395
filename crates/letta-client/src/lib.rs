//! `ps-letta`: Letta agent-platform client for Phoenix Scout.
//!
//! Provides the [`AgentPlatform`] trait covering the slice of the Letta
//! REST API the analysis workflow consumes (sources, file uploads,
//! agents, messages), a production REST implementation
//! ([`RestLettaClient`]), and typed DTOs for the wire format.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ps_domain::config::LettaConfig;
//! use ps_letta::{AgentPlatform, RestLettaClient};
//!
//! # async fn example() -> ps_domain::error::Result<()> {
//! let creds = LettaConfig::default().credentials()?;
//! let client = RestLettaClient::new(&creds, std::time::Duration::from_secs(60))?;
//!
//! for source in client.list_sources().await? {
//!     println!("{} {:?}", source.name, source.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod provider;
pub mod rest;
pub mod types;

pub use provider::AgentPlatform;
pub use rest::{from_reqwest, RestLettaClient};
pub use types::{
    AgentState, CreateAgentRequest, CreateSourceRequest, DuplicateHandling, FileMetadata,
    LettaMessage, LettaRequest, LettaResponse, MessageCreate, Source, UploadDocument,
    ASSISTANT_MESSAGE,
};
