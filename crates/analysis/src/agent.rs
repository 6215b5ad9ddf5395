//! Transient agents: created for one exchange and deleted on every exit
//! path of that exchange.

use std::future::Future;

use ps_domain::error::{Error, Result};
use ps_domain::trace::TraceEvent;
use ps_letta::{AgentPlatform, CreateAgentRequest};

/// Create an agent from `req`, run `body` with its id, then delete it.
///
/// Deletion runs whether `body` succeeded or failed.  When `body` fails
/// its error is returned and a failed deletion is only logged; when `body`
/// succeeds a failed deletion is returned as the error.
pub async fn with_transient_agent<T, F, Fut>(
    platform: &dyn AgentPlatform,
    req: CreateAgentRequest,
    body: F,
) -> Result<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let agent_name = req.name.clone();
    let agent = platform.create_agent(req).await?;
    let agent_id = agent
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::MissingIdentifier {
            kind: "Letta agent",
            name: agent_name.clone(),
        })?;

    TraceEvent::AgentCreated {
        agent_id: agent_id.clone(),
        agent_name,
    }
    .emit();

    let outcome = body(agent_id.clone()).await;
    let cleanup = platform.delete_agent(&agent_id).await;

    match (outcome, cleanup) {
        (Ok(value), Ok(())) => {
            TraceEvent::AgentDeleted {
                agent_id,
                after_error: false,
            }
            .emit();
            Ok(value)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => {
            TraceEvent::AgentDeleted {
                agent_id,
                after_error: true,
            }
            .emit();
            Err(e)
        }
        (Err(e), Err(cleanup_err)) => {
            tracing::warn!(
                agent_id = %agent_id,
                error = %cleanup_err,
                "failed to delete transient agent after a failed exchange"
            );
            Err(e)
        }
    }
}
