//! The two stateless proxy routes plus a liveness probe.
//!
//! `GET /weather` forwards query parameters to the statistics service and
//! relays its reply; `POST /insight` turns a weather payload into bullet
//! insights via the configured generation backend. Neither holds mutable
//! state; each request awaits exactly one outbound call, with no retries.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use riskcast_core::{Config, InsightProvider, ProviderError, StatsClient, StatsQuery};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    stats: StatsClient,
    insight: Option<Arc<dyn InsightProvider>>,
}

impl AppState {
    pub fn new(stats: StatsClient, insight: Option<Arc<dyn InsightProvider>>) -> Self {
        Self { stats, insight }
    }

    /// Wire up the outbound clients. A missing generation API key is not
    /// fatal at startup; the insight route reports it per request.
    pub fn from_config(config: &Config) -> Self {
        let insight = match riskcast_core::insight_provider_from_config(config) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(e) => {
                tracing::warn!(error = %e, "insight generation disabled");
                None
            }
        };

        Self::new(StatsClient::new(config.stats.base_url.clone()), insight)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(handle_weather))
        .route("/insight", post(handle_insight))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    lat: Option<String>,
    lon: Option<String>,
    date_of_trip: Option<String>,
    hot: Option<String>,
    cold: Option<String>,
    windy: Option<String>,
    rain: Option<String>,
}

/// Forward the client's query to the statistics service and relay the
/// answer. Validation happens before any outbound traffic.
async fn handle_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Response, ApiError> {
    let mut missing = Vec::new();
    if params.lat.is_none() {
        missing.push("lat");
    }
    if params.lon.is_none() {
        missing.push("lon");
    }
    if params.date_of_trip.is_none() {
        missing.push("date_of_trip");
    }
    if !missing.is_empty() {
        return Err(ApiError::MissingParams(missing));
    }

    let query = StatsQuery {
        lat: params.lat.unwrap_or_default(),
        lon: params.lon.unwrap_or_default(),
        date_of_trip: params.date_of_trip.unwrap_or_default(),
        hot: params.hot,
        cold: params.cold,
        windy: params.windy,
        rain: params.rain,
    };

    let reply = state.stats.fetch_raw(&query).await.map_err(ApiError::Internal)?;

    if !reply.is_success() {
        return Err(ApiError::UpstreamStats { status: reply.status, body: reply.body });
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    Ok((status, [(header::CONTENT_TYPE, "application/json")], reply.body).into_response())
}

#[derive(Debug, Deserialize)]
struct InsightRequest {
    /// An empty object is present and valid; only the absent field is a
    /// client error.
    #[serde(rename = "weatherData")]
    weather_data: Option<serde_json::Value>,
}

#[derive(Debug, serde::Serialize)]
struct InsightResponse {
    summary: String,
}

async fn handle_insight(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, ApiError> {
    let weather = request.weather_data.ok_or(ApiError::MissingField("weatherData"))?;

    let provider = state
        .insight
        .as_ref()
        .ok_or(ApiError::Insight(ProviderError::MissingApiKey))?;

    let summary = provider.summarize(&weather).await.map_err(ApiError::Insight)?;

    Ok(Json(InsightResponse { summary }))
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
