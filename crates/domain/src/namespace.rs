//! Namespace builder.
//!
//! Remote sources and agents are named and tagged from these strings, so
//! they must stay a pure function of the raw identifiers.

use serde::{Deserialize, Serialize};

/// The `{team, match}` tag pair attached to remote resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceBundle {
    pub team: String,
    #[serde(rename = "match")]
    pub match_ns: String,
}

pub fn team_namespace(team_id: &str) -> String {
    format!("team:{team_id}")
}

pub fn match_namespace(match_id: &str) -> String {
    format!("match:{match_id}")
}

pub fn namespace_metadata(team_id: &str, match_id: &str) -> NamespaceBundle {
    NamespaceBundle {
        team: team_namespace(team_id),
        match_ns: match_namespace(match_id),
    }
}
