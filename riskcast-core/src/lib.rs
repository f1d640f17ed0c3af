//! Core library for the `riskcast` weather-risk planner.
//!
//! This crate defines:
//! - The shared domain model (statistics payload, events, preferences)
//! - Risk classification and the probability color ramp
//! - Dashboard card construction and progress-ring geometry
//! - Clients for the statistics and text-generation collaborators
//! - Configuration & client-local session storage
//!
//! It is used by `riskcast-server` and `riskcast-cli`, but can also be
//! reused by other binaries or services.

pub mod cards;
pub mod config;
pub mod model;
pub mod progress;
pub mod provider;
pub mod risk;
pub mod session;

pub use cards::{CardCategory, CardOptions, CardRisk, RiskEntry, WeatherCard, build_cards, build_cards_with};
pub use config::Config;
pub use model::{EventData, RawStatistics, StatsQuery, UserPreferences};
pub use progress::ProgressRing;
pub use provider::{
    GeminiClient, InsightProvider, ProviderError, StatsClient, UpstreamReply,
    insight_provider_from_config,
};
pub use risk::{Rgb, RiskLevel, ramp_color};
pub use session::SessionStore;
