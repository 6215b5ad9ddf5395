use std::time::Duration;

use ps_domain::namespace::namespace_metadata;
use ps_domain::summary::MatchAnalysisPayload;
use ps_store::{MemorySummaryStore, SummaryStore};

fn payload(match_id: &str, date: &str, summary: &str) -> MatchAnalysisPayload {
    let mut raw = serde_json::Map::new();
    raw.insert("summary".into(), summary.into());
    MatchAnalysisPayload {
        match_id: match_id.into(),
        team_id: "phoenix".into(),
        match_date: date.into(),
        namespace: namespace_metadata("phoenix", match_id),
        source_id: format!("source-{match_id}"),
        agent_id: format!("agent-{match_id}"),
        summary: summary.into(),
        recommendations: vec!["Improve rebounding".into(), "Run more pick and roll".into()],
        risk_notes: vec!["Fatigue".into()],
        raw,
    }
}

#[tokio::test]
async fn second_upsert_overwrites_and_restamps() {
    let store = MemorySummaryStore::new();

    let first = store
        .upsert(&payload("m1", "2024-03-01", "First take"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store
        .upsert(&payload("m1", "2024-03-01", "Second take"))
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    let stored = store.get("m1").unwrap();
    assert_eq!(stored.summary, "Second take");
    assert_eq!(stored.payload["summary"], "Second take");
    assert!(second.analysis_generated_at > first.analysis_generated_at);
    assert_eq!(stored.analysis_generated_at, second.analysis_generated_at);
}

#[tokio::test]
async fn recent_returns_newest_matches_first() {
    let store = MemorySummaryStore::new();
    for (id, date) in [
        ("m1", "2024-01-05"),
        ("m2", "2024-02-11"),
        ("m3", "2024-03-01"),
        ("m4", "2023-12-20"),
        ("m5", "2024-02-25"),
    ] {
        store.upsert(&payload(id, date, "s")).await.unwrap();
    }

    let rows = store.recent(3).await.unwrap();
    let dates: Vec<&str> = rows.iter().map(|r| r.match_date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-25", "2024-02-11"]);
}

#[tokio::test]
async fn recent_with_fewer_rows_than_limit() {
    let store = MemorySummaryStore::new();
    assert!(store.recent(3).await.unwrap().is_empty());

    store.upsert(&payload("only", "2024-01-01", "s")).await.unwrap();
    assert_eq!(store.recent(3).await.unwrap().len(), 1);
    assert!(store.recent(0).await.unwrap().is_empty());
}
