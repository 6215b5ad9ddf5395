//! REST implementation of [`AgentPlatform`].
//!
//! `RestLettaClient` wraps a `reqwest::Client` and translates every trait
//! method into the corresponding call against the Letta REST API.  Calls
//! are made once; errors are classified (auth / platform / transport) and
//! returned to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use ps_domain::config::LettaCredentials;
use ps_domain::error::{Error, Result};
use ps_domain::trace::TraceEvent;

use crate::provider::AgentPlatform;
use crate::types::{
    AgentState, CreateAgentRequest, CreateSourceRequest, FileMetadata, LettaRequest,
    LettaResponse, Source, UploadDocument,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the Letta API.
///
/// Built once at bootstrap and shared; the underlying `reqwest::Client`
/// keeps a connection pool.
#[derive(Debug, Clone)]
pub struct RestLettaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestLettaClient {
    pub fn new(creds: &LettaCredentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("phoenix-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: creds.base_url.trim_end_matches('/').to_owned(),
            api_key: creds.api_key.clone(),
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.bearer_auth(&self.api_key)
            .header("X-Trace-Id", Uuid::new_v4().to_string())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send once, emit a `LettaCall` trace event, and map non-2xx statuses
    /// to domain errors.
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::LettaCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::LettaCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Auth(format!(
                "{endpoint} auth failed ({}): {body}",
                status.as_u16()
            )));
        }
        Err(Error::AgentPlatform(format!(
            "{endpoint} returned {}: {body}",
            status.as_u16()
        )))
    }

    async fn parse<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
        let body = resp.text().await.map_err(from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| {
            Error::AgentPlatform(format!("failed to parse {what} response: {e}: {body}"))
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl AgentPlatform for RestLettaClient {
    async fn list_sources(&self) -> Result<Vec<Source>> {
        let resp = self
            .execute("GET /v1/sources/", self.http.get(self.url("/v1/sources/")))
            .await?;
        Self::parse(resp, "list sources").await
    }

    async fn create_source(&self, req: CreateSourceRequest) -> Result<Source> {
        let resp = self
            .execute(
                "POST /v1/sources/",
                self.http.post(self.url("/v1/sources/")).json(&req),
            )
            .await?;
        Self::parse(resp, "create source").await
    }

    async fn upload_file(&self, source_id: &str, doc: UploadDocument) -> Result<FileMetadata> {
        let part = Part::bytes(doc.bytes)
            .file_name(doc.filename.clone())
            .mime_str(&doc.content_type)
            .map_err(from_reqwest)?;
        let form = Form::new().part("file", part);

        let rb = self
            .http
            .post(self.url(&format!("/v1/sources/{source_id}/upload")))
            .query(&[
                ("duplicate_handling", doc.duplicate_handling.as_str()),
                ("name", doc.filename.as_str()),
            ])
            .multipart(form);

        let resp = self
            .execute("POST /v1/sources/{source_id}/upload", rb)
            .await?;
        Self::parse(resp, "upload").await
    }

    async fn create_agent(&self, req: CreateAgentRequest) -> Result<AgentState> {
        let resp = self
            .execute(
                "POST /v1/agents/",
                self.http.post(self.url("/v1/agents/")).json(&req),
            )
            .await?;
        Self::parse(resp, "create agent").await
    }

    async fn send_message(&self, agent_id: &str, req: LettaRequest) -> Result<LettaResponse> {
        let url = self.url(&format!("/v1/agents/{agent_id}/messages"));
        let resp = self
            .execute(
                "POST /v1/agents/{agent_id}/messages",
                self.http.post(url).json(&req),
            )
            .await?;
        Self::parse(resp, "messages").await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        let url = self.url(&format!("/v1/agents/{agent_id}"));
        self.execute("DELETE /v1/agents/{agent_id}", self.http.delete(url))
            .await?;
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into a domain `Error`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}
