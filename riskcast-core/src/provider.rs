use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

pub mod gemini;
pub mod stats;

pub use gemini::GeminiClient;
pub use stats::StatsClient;

/// Failures talking to either external collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream service answered with a non-success status. The body
    /// is preserved so a proxying caller can relay it.
    #[error("upstream service returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("request to upstream service failed")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("no generation API key configured (set GEMINI_API_KEY or run `riskcast configure`)")]
    MissingApiKey,

    #[error("generation service returned no usable text")]
    EmptyResponse,
}

/// Raw reply from the statistics service, untouched for verbatim relay.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam over the text-generation backend producing bullet insights.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Summarize a weather payload as at most five plain bullet points.
    async fn summarize(&self, weather: &serde_json::Value) -> Result<String, ProviderError>;
}

/// Construct the configured insight provider.
pub fn insight_provider_from_config(
    config: &Config,
) -> Result<Box<dyn InsightProvider>, ProviderError> {
    Ok(Box::new(GeminiClient::from_config(config)?))
}

/// Trim oversized upstream bodies before they land in error messages.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_reply_success_bounds() {
        assert!(UpstreamReply { status: 200, body: String::new() }.is_success());
        assert!(UpstreamReply { status: 299, body: String::new() }.is_success());
        assert!(!UpstreamReply { status: 300, body: String::new() }.is_success());
        assert!(!UpstreamReply { status: 404, body: String::new() }.is_success());
    }

    #[test]
    fn long_bodies_are_truncated_in_errors() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}
