//! `ps-analysis`: the match-analysis workflow.
//!
//! Per match: load the dataset, sync its four documents into a Letta
//! source named after the match namespace, run one exchange with a
//! transient schema-constrained agent, normalize the reply, and upsert it
//! into the summary store.  [`MatchAnalysisWorker`] drives the sequence.

pub mod agent;
pub mod ask;
pub mod dataset;
pub mod extract;
pub mod ingest;
pub mod summaries;
pub mod worker;

pub use agent::with_transient_agent;
pub use ask::{ask_once, AskReply};
pub use dataset::DatasetLoader;
pub use extract::{assistant_text, extract_assistant_json, AgentReply};
pub use ingest::sync_match_into_letta;
pub use worker::{AnalysisReport, MatchAnalysisWorker, MatchFailure};
