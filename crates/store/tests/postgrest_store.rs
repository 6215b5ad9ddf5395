//! `PostgrestSummaryStore` against an in-process fake of the Supabase REST
//! endpoint.  The fake keeps rows in a map keyed by `match_id` and honours
//! `on_conflict` / `order` / `limit` the way PostgREST does.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use ps_domain::config::SupabaseCredentials;
use ps_domain::error::Error;
use ps_domain::namespace::namespace_metadata;
use ps_domain::summary::MatchAnalysisPayload;
use ps_store::{PostgrestSummaryStore, SummaryStore};

const KEY: &str = "service-role-key";

type Table = Arc<Mutex<HashMap<String, Value>>>;

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    apikey == Some(KEY) && bearer == Some(&*format!("Bearer {KEY}"))
}

async fn upsert(
    State(table): State<Table>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })))
            .into_response();
    }
    let prefer = headers.get("prefer").and_then(|v| v.to_str().ok()).unwrap_or("");
    if query.get("on_conflict").map(String::as_str) != Some("match_id")
        || !prefer.contains("resolution=merge-duplicates")
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "duplicate key value violates unique constraint", "code": "23505" })),
        )
            .into_response();
    }
    if row["summary"] == "explode" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "new row violates check constraint",
                "code": "23514",
                "details": "summary_length"
            })),
        )
            .into_response();
    }
    let id = row["match_id"].as_str().unwrap_or_default().to_owned();
    table.lock().insert(id, row.clone());
    (StatusCode::CREATED, Json(json!([row]))).into_response()
}

async fn select(
    State(table): State<Table>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    assert_eq!(query.get("select").map(String::as_str), Some("*"));
    assert_eq!(query.get("order").map(String::as_str), Some("match_date.desc"));
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(usize::MAX);

    let mut rows: Vec<Value> = table.lock().values().cloned().collect();
    rows.sort_by(|a, b| {
        b["match_date"]
            .as_str()
            .unwrap_or_default()
            .cmp(a["match_date"].as_str().unwrap_or_default())
    });
    rows.truncate(limit);
    Json(Value::Array(rows)).into_response()
}

async fn boot() -> (SocketAddr, Table) {
    let table: Table = Arc::default();
    let app = Router::new()
        .route("/rest/v1/match_summaries", get(select).post(upsert))
        .with_state(table.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, table)
}

fn store(addr: SocketAddr, key: &str) -> PostgrestSummaryStore {
    let creds = SupabaseCredentials {
        url: format!("http://{addr}"),
        service_key: key.into(),
    };
    PostgrestSummaryStore::new(&creds, "match_summaries", Duration::from_secs(5)).unwrap()
}

fn payload(match_id: &str, date: &str, summary: &str) -> MatchAnalysisPayload {
    MatchAnalysisPayload {
        match_id: match_id.into(),
        team_id: "phoenix".into(),
        match_date: date.into(),
        namespace: namespace_metadata("phoenix", match_id),
        source_id: "source".into(),
        agent_id: "agent".into(),
        summary: summary.into(),
        recommendations: vec!["a".into(), "b".into()],
        risk_notes: vec![],
        raw: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn upsert_overwrites_row_keyed_by_match_id() {
    let (addr, table) = boot().await;
    let store = store(addr, KEY);

    let first = store.upsert(&payload("m1", "2024-03-01", "one")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.upsert(&payload("m1", "2024-03-01", "two")).await.unwrap();

    let rows = table.lock();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows["m1"]["summary"], "two");
    assert_eq!(rows["m1"]["namespace"]["match"], "match:m1");
    assert!(rows["m1"]["risk_notes"].is_array());
    assert!(second.analysis_generated_at > first.analysis_generated_at);
}

#[tokio::test]
async fn recent_orders_by_match_date_descending() {
    let (addr, _table) = boot().await;
    let store = store(addr, KEY);
    for (id, date) in [
        ("a", "2024-01-01"),
        ("b", "2024-04-01"),
        ("c", "2024-02-01"),
        ("d", "2024-05-01"),
        ("e", "2024-03-01"),
    ] {
        store.upsert(&payload(id, date, "s")).await.unwrap();
    }

    let rows = store.recent(3).await.unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.match_id.as_str()).collect();
    assert_eq!(ids, vec!["d", "b", "e"]);
}

#[tokio::test]
async fn datastore_message_is_preserved_on_write_failure() {
    let (addr, table) = boot().await;
    let store = store(addr, KEY);

    let err = store
        .upsert(&payload("m1", "2024-03-01", "explode"))
        .await
        .unwrap_err();
    match err {
        Error::Persistence(message) => {
            assert!(message.starts_with("failed to store summary in Supabase"));
            assert!(message.contains("new row violates check constraint"));
            assert!(message.contains("23514"));
        }
        other => panic!("expected persistence error, got {other:?}"),
    }
    assert!(table.lock().is_empty());
}

#[tokio::test]
async fn bad_key_fails_reads_as_persistence_error() {
    let (addr, _table) = boot().await;
    let store = store(addr, "wrong");
    let err = store.recent(3).await.unwrap_err();
    assert!(matches!(err, Error::Persistence(ref m) if m.starts_with("failed to fetch summaries")));
}
