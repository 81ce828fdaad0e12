// src/core/net.rs
// Blocking HTTP over ureq. One request at a time; no retries or backoff here.

use std::time::Duration;

use ureq::Agent;

use crate::config::consts::{
    HTTP_TIMEOUT_SECS, LOOKUP_PARAM, LOOKUP_URL, PRONUNCIATION_URL, USER_AGENT,
};
use crate::model::bare_headword;
use crate::Result;

/// Status + body of a finished request. Non-2xx statuses are data, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Page fetcher seam; the lookup pipeline only ever sees this.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// Shared agent config: global timeout, HTTP statuses passed through as values.
pub fn agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
        .http_status_as_error(false)
        .build()
        .into()
}

pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self { agent: agent() }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        logd!("GET {url}");
        let mut resp = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()?;
        let status = resp.status().as_u16();
        let body = resp.body_mut().read_to_string()?;
        logd!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(FetchResponse { status, body })
    }
}

/// `https://<host>/?w=<urlencoded word>`
pub fn lookup_url(word: &str) -> String {
    format!("{LOOKUP_URL}?{LOOKUP_PARAM}={}", urlencoding::encode(word.trim()))
}

/// Pronunciation page for a headword; any "(haben)"/"(sein)" qualifier is dropped.
pub fn pronunciation_url(headword: &str) -> String {
    format!("{PRONUNCIATION_URL}{}/#de", urlencoding::encode(bare_headword(headword)))
}
