//! Remote document sync: one Letta source per match, four JSON documents
//! per source.

use chrono::Utc;
use serde_json::json;

use ps_domain::dataset::MatchDataset;
use ps_domain::error::{Error, Result};
use ps_domain::namespace::{match_namespace, namespace_metadata};
use ps_domain::trace::TraceEvent;
use ps_letta::{AgentPlatform, CreateSourceRequest, Source, UploadDocument};

pub const MATCH_METADATA_FILE: &str = "match_metadata.json";
pub const PLAYER_BIOS_FILE: &str = "player_bios.json";
pub const COACH_STRATEGIES_FILE: &str = "coach_strategies.json";
pub const EVENT_METRICS_FILE: &str = "event_metrics.json";

/// Linear scan over every source.  Fine while a deployment holds a handful
/// of matches; the platform has no name filter on the list endpoint we use.
pub async fn find_source_by_name(
    platform: &dyn AgentPlatform,
    name: &str,
) -> Result<Option<Source>> {
    let sources = platform.list_sources().await?;
    Ok(sources.into_iter().find(|source| source.name == name))
}

/// Return the id of the source named after the match namespace, creating
/// it when absent.
pub async fn ensure_match_source(
    platform: &dyn AgentPlatform,
    program_name: &str,
    dataset: &MatchDataset,
) -> Result<String> {
    let name = match_namespace(&dataset.match_id);

    if let Some(id) = find_source_by_name(platform, &name)
        .await?
        .and_then(|source| source.id)
        .filter(|id| !id.is_empty())
    {
        TraceEvent::SourceResolved {
            source_name: name,
            source_id: id.clone(),
            created: false,
        }
        .emit();
        return Ok(id);
    }

    let namespace = namespace_metadata(&dataset.team_id, &dataset.match_id);
    let created = platform
        .create_source(CreateSourceRequest {
            name: name.clone(),
            description: Some(format!(
                "Data lake for match {} ({})",
                dataset.match_id, dataset.metadata.opponent
            )),
            instructions: Some(format!(
                "Contains structured scouting information for a single {program_name} match. \
                 Use metadata namespaces to filter relevant context."
            )),
            metadata: Some(json!({
                "team": namespace.team,
                "match": namespace.match_ns,
                "uploadedAt": Utc::now().to_rfc3339(),
            })),
        })
        .await?;

    let id = created
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::MissingIdentifier {
            kind: "Letta source",
            name: name.clone(),
        })?;

    TraceEvent::SourceResolved {
        source_name: name,
        source_id: id.clone(),
        created: true,
    }
    .emit();
    Ok(id)
}

/// The four documents uploaded for every match, in upload order.
pub fn match_documents(dataset: &MatchDataset) -> Result<Vec<UploadDocument>> {
    Ok(vec![
        UploadDocument::json_replace(MATCH_METADATA_FILE, &dataset.metadata)?,
        UploadDocument::json_replace(PLAYER_BIOS_FILE, &dataset.player_bios)?,
        UploadDocument::json_replace(COACH_STRATEGIES_FILE, &dataset.coach_strategies)?,
        UploadDocument::json_replace(
            EVENT_METRICS_FILE,
            &json!({ "events": dataset.events, "metrics": dataset.metrics }),
        )?,
    ])
}

/// Make sure the match's source exists and holds the current documents.
/// Re-running for the same match reuses the source and replaces the files.
pub async fn sync_match_into_letta(
    platform: &dyn AgentPlatform,
    program_name: &str,
    dataset: &MatchDataset,
) -> Result<String> {
    let source_id = ensure_match_source(platform, program_name, dataset).await?;

    for doc in match_documents(dataset)? {
        let filename = doc.filename.clone();
        let bytes = doc.bytes.len();
        platform.upload_file(&source_id, doc).await?;
        TraceEvent::DocumentUploaded {
            source_id: source_id.clone(),
            filename,
            bytes,
        }
        .emit();
    }

    Ok(source_id)
}
