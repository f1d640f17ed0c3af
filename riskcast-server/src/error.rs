use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use riskcast_core::ProviderError;

/// Errors surfaced at the proxy boundary.
///
/// Client input errors become 400s with a descriptive message, statistics
/// upstream errors are relayed with their original status, and everything
/// else collapses to a generic 500. Detail goes to the log, not to the
/// client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required query params: {}", .0.join(", "))]
    MissingParams(Vec<&'static str>),

    #[error("{0} is required")]
    MissingField(&'static str),

    /// Non-success reply from the statistics service, relayed verbatim.
    #[error("statistics service returned status {status}")]
    UpstreamStats { status: u16, body: String },

    /// Any insight-side failure: missing credentials, upstream error,
    /// malformed response.
    #[error("insight generation failed")]
    Insight(#[source] ProviderError),

    /// Transport or other unexpected failure behind the weather proxy.
    #[error("weather proxy failed")]
    Internal(#[source] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingParams(_) | Self::MissingField(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
            }
            Self::UpstreamStats { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(json!({ "error": body }))).into_response()
            }
            Self::Insight(source) => {
                tracing::error!(error = %source, "insight generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to generate insights" })),
                )
                    .into_response()
            }
            Self::Internal(source) => {
                tracing::error!(error = %source, "weather proxy failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_message_lists_the_missing_names() {
        let err = ApiError::MissingParams(vec!["lat", "date_of_trip"]);
        assert_eq!(err.to_string(), "Missing required query params: lat, date_of_trip");
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let err = ApiError::MissingField("weatherData");
        assert_eq!(err.to_string(), "weatherData is required");
    }
}
