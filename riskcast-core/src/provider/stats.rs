use reqwest::Client;

use crate::model::{RawStatistics, StatsQuery};
use crate::provider::{ProviderError, UpstreamReply, truncate_body};

/// Client for the weather-risk statistics service.
///
/// `fetch_raw` hands back exactly what the service said, for proxies that
/// must relay body and status verbatim; `fetch` is the typed variant for
/// callers that want the parsed payload.
#[derive(Debug, Clone)]
pub struct StatsClient {
    base_url: String,
    http: Client,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http: Client::new() }
    }

    /// One outbound GET, no retries. Transport failures are the only
    /// error; an upstream error status is a normal reply here.
    pub async fn fetch_raw(&self, query: &StatsQuery) -> Result<UpstreamReply, ProviderError> {
        let url = format!("{}/weather_risk", self.base_url);

        let res = self.http.get(&url).query(&query.query_pairs()).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(UpstreamReply { status, body })
    }

    /// Fetch and parse. Non-success statuses and undecodable bodies are
    /// errors.
    pub async fn fetch(&self, query: &StatsQuery) -> Result<RawStatistics, ProviderError> {
        let reply = self.fetch_raw(query).await?;

        if !reply.is_success() {
            return Err(ProviderError::Upstream { status: reply.status, body: reply.body });
        }

        serde_json::from_str(&reply.body)
            .map_err(|e| ProviderError::Decode(format!("{e}: {}", truncate_body(&reply.body))))
    }
}
