//! `ps-store`: persistence for match summaries.
//!
//! [`SummaryStore`] is the contract the workflow and the query routes use:
//! upsert keyed by `match_id`, and "most recent N by match date".  Two
//! backends are provided:
//!
//! | `store.backend` | Implementation          | Best for                     |
//! |-----------------|-------------------------|------------------------------|
//! | `postgrest`     | [`PostgrestSummaryStore`] | Supabase (default)         |
//! | `memory`        | [`MemorySummaryStore`]    | Local demos, tests         |

pub mod memory;
pub mod postgrest;
pub mod provider;

pub use memory::MemorySummaryStore;
pub use postgrest::PostgrestSummaryStore;
pub use provider::SummaryStore;

use std::sync::Arc;
use std::time::Duration;

use ps_domain::config::{StoreBackend, StoreConfig};
use ps_domain::error::Result;

/// Build the configured [`SummaryStore`].
///
/// The PostgREST backend resolves its credentials here, so a missing
/// `SUPABASE_URL` / service key fails at startup rather than on the first
/// write.
pub fn create_store(cfg: &StoreConfig) -> Result<Arc<dyn SummaryStore>> {
    match cfg.backend {
        StoreBackend::Postgrest => {
            let creds = cfg.credentials()?;
            let store = PostgrestSummaryStore::new(
                &creds,
                &cfg.table,
                Duration::from_millis(cfg.timeout_ms),
            )?;
            tracing::info!(table = %cfg.table, "using Supabase summary store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory summary store; rows are lost on exit");
            Ok(Arc::new(MemorySummaryStore::new()))
        }
    }
}
