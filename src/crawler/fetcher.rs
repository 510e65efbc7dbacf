//! HTTP fetcher: C7. A single GET with automatic redirect following,
//! classified into a numeric status or one of a small set of textual tags.
//! Grounded in the teacher's `fetch_url`/`build_http_client` shape, stripped
//! of the HEAD-then-GET probe and retry/backoff machinery the teacher used
//! (no retry of individual URLs is permitted here).

use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Outcome of one fetch attempt. `status` carries either the numeric HTTP
/// status or one of the textual tags the orchestrator records verbatim.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub body: Option<String>,
    pub size: u64,
    pub status: String,
    pub final_url: Option<String>,
}

impl FetchOutcome {
    fn tagged(status: &str) -> Self {
        Self {
            body: None,
            size: 0,
            status: status.to_string(),
            final_url: None,
        }
    }
}

/// Builds the page-fetching HTTP client: browser-like user agent, bounded
/// connect/read timeouts, and automatic redirect following.
pub fn build_http_client(
    user_agent: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .connect_timeout(connect_timeout)
        .timeout(connect_timeout + read_timeout)
        .redirect(Policy::limited(10))
        .build()
}

/// Performs the GET. Callers are expected to have already gated on the host
/// rate limiter and robots policy; this function never raises to the caller
/// regardless of what goes wrong on the wire.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) if e.is_timeout() => return FetchOutcome::tagged("Timeout"),
        Err(e) if e.is_connect() => return FetchOutcome::tagged("Connection Failure"),
        Err(_) => return FetchOutcome::tagged("Unexpected Failure"),
    };

    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.starts_with("text/html") {
        return FetchOutcome::tagged("MIME Type Not HTML");
    }

    match response.text().await {
        Ok(body) => FetchOutcome {
            size: body.len() as u64,
            status: status.to_string(),
            final_url: Some(final_url),
            body: Some(body),
        },
        Err(e) if e.is_timeout() => FetchOutcome::tagged("Timeout"),
        Err(_) => FetchOutcome::tagged("Unexpected Failure"),
    }
}
