//! Supabase (PostgREST) implementation of [`SummaryStore`].
//!
//! Upserts use PostgREST's `on_conflict` + `Prefer: resolution=merge-duplicates`
//! so the `match_id` unique constraint turns a repeated insert into an
//! overwrite.  Every failure, transport included, surfaces as
//! `Error::Persistence` carrying the datastore's own message.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use ps_domain::config::SupabaseCredentials;
use ps_domain::error::{Error, Result};
use ps_domain::summary::{MatchAnalysisPayload, MatchSummaryRow};
use ps_domain::trace::TraceEvent;

use crate::provider::SummaryStore;

#[derive(Debug, Clone)]
pub struct PostgrestSummaryStore {
    http: Client,
    rest_url: String,
    table: String,
    service_key: String,
}

/// PostgREST error envelope.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl PostgrestSummaryStore {
    pub fn new(creds: &SupabaseCredentials, table: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", creds.url.trim_end_matches('/')),
            table: table.to_owned(),
            service_key: creds.service_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.table)
    }

    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Send once and turn anything but 2xx into `Error::Persistence`
    /// prefixed with `context`.
    async fn execute(&self, endpoint: &str, context: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::StoreCall {
                    endpoint: endpoint.to_owned(),
                    status: 0,
                    duration_ms,
                }
                .emit();
                return Err(Error::Persistence(format!("{context}: {e}")));
            }
        };

        let status = resp.status();
        TraceEvent::StoreCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => {
                let mut message = err.message;
                if let Some(code) = err.code {
                    message = format!("{message} (code {code})");
                }
                if let Some(details) = err.details {
                    message = format!("{message}: {details}");
                }
                message
            }
            Err(_) => format!("status {}: {body}", status.as_u16()),
        };
        Err(Error::Persistence(format!("{context}: {message}")))
    }
}

#[async_trait]
impl SummaryStore for PostgrestSummaryStore {
    async fn upsert(&self, payload: &MatchAnalysisPayload) -> Result<MatchSummaryRow> {
        const CONTEXT: &str = "failed to store summary in Supabase";

        let row = MatchSummaryRow::stamped(payload);
        let rb = self
            .http
            .post(self.table_url())
            .query(&[("on_conflict", "match_id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row);

        let resp = self.execute(&format!("POST {}", self.table), CONTEXT, rb).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Persistence(format!("{CONTEXT}: {e}")))?;

        // `return=representation` echoes the stored rows; fall back to what
        // we sent when the server is configured for minimal returns.
        let written = serde_json::from_str::<Vec<MatchSummaryRow>>(&body)
            .ok()
            .and_then(|rows| rows.into_iter().next())
            .unwrap_or(row);

        Ok(written)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<MatchSummaryRow>> {
        const CONTEXT: &str = "failed to fetch summaries";

        let limit = limit.to_string();
        let rb = self.http.get(self.table_url()).query(&[
            ("select", "*"),
            ("order", "match_date.desc"),
            ("limit", limit.as_str()),
        ]);

        let resp = self.execute(&format!("GET {}", self.table), CONTEXT, rb).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Persistence(format!("{CONTEXT}: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Persistence(format!("{CONTEXT}: unreadable rows: {e}")))
    }
}
