use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::provider::{InsightProvider, ProviderError, truncate_body};

/// Base URL for the Generative Language API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for Google's `generateContent` endpoint, producing the bullet
/// insight summaries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Create a client from configuration; errors when no API key is
    /// configured anywhere.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config.gemini_api_key().ok_or(ProviderError::MissingApiKey)?;
        Ok(Self::new(api_key).with_model(config.insight.model.clone()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client somewhere else, e.g. a local mock in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The fixed instruction wrapped around a serialized weather payload:
    /// at most five plain bullet points, nothing else.
    fn build_prompt(weather: &serde_json::Value) -> String {
        format!(
            "You are a weather assistant. From the weather data below, give only key \
             insights and actionable suggestions for planning an outdoor event. \
             Use at most 5 concise bullet points. \
             Do not include greetings, explanations, or chit-chat. \
             Respond in plain bullet lines with no asterisks, numbering, emojis, \
             or other symbols.\n\nWeather data:\n{weather}"
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiClient {
    async fn summarize(&self, weather: &serde_json::Value) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: Self::build_prompt(weather) }],
            }],
        };

        let res = self.http.post(&url).json(&request).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        if !(200..300).contains(&status) {
            return Err(ProviderError::Upstream { status, body: truncate_body(&body) });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("{e}: {}", truncate_body(&body))))?;

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}
