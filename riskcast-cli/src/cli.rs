use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Text};

use riskcast_core::{
    CardOptions, Config, EventData, SessionStore, StatsClient, StatsQuery, UserPreferences,
    build_cards_with, insight_provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "riskcast", version, about = "Weather-risk planning for outdoor events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the statistics service address and the generation API key.
    Configure,

    /// Plan an event: fetch weather-risk statistics and show the dashboard.
    Plan {
        /// Display name of the event location.
        #[arg(long)]
        location: String,

        /// Latitude of the event location.
        #[arg(long)]
        lat: f64,

        /// Longitude of the event location.
        #[arg(long)]
        lon: f64,

        /// Trip date, YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,

        /// Optional event name.
        #[arg(long)]
        name: Option<String>,

        /// Include the climate-anomaly card.
        #[arg(long)]
        anomalies: bool,
    },

    /// Re-render the dashboard from the stored session.
    Dashboard {
        /// Include the climate-anomaly card.
        #[arg(long)]
        anomalies: bool,
    },

    /// Set the comfort thresholds that personalize future fetches.
    Personalize,

    /// Generate bullet-point insights for the stored statistics.
    Insight,

    /// Drop the stored session.
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Plan { location, lat, lon, date, name, anomalies } => {
                plan(location, lat, lon, date, name, anomalies).await
            }
            Command::Dashboard { anomalies } => dashboard(anomalies),
            Command::Personalize => personalize(),
            Command::Insight => insight().await,
            Command::Clear => clear(),
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("Statistics service base URL:")
        .with_default(&config.stats.base_url)
        .prompt()?;
    config.stats.base_url = base_url;

    let api_key = Password::new("Gemini API key (leave empty to keep current):")
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.insight.api_key = Some(api_key.trim().to_string());
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn plan(
    location: String,
    lat: f64,
    lon: f64,
    date: NaiveDate,
    name: Option<String>,
    anomalies: bool,
) -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::open()?;
    let prefs = store.load_preferences()?;

    let mut query = StatsQuery::new(lat.to_string(), lon.to_string(), date.format("%Y%m%d").to_string());
    if let Some(prefs) = &prefs {
        query = query.with_preferences(prefs);
    }

    let client = StatsClient::new(config.stats.base_url);
    let stats = client
        .fetch(&query)
        .await
        .context("Failed to fetch weather-risk statistics")?;

    let event = EventData {
        location,
        latitude: lat,
        longitude: lon,
        date,
        name,
        statistics: Some(stats),
    };
    store.save_event(&event)?;

    render_event(&event, prefs.is_some(), anomalies)
}

fn dashboard(anomalies: bool) -> Result<()> {
    let store = SessionStore::open()?;
    let event = store.load_event()?.context(
        "No event planned yet.\n\
         Hint: run `riskcast plan --location <name> --lat <lat> --lon <lon> --date <YYYY-MM-DD>` first.",
    )?;
    let personalized = store.load_preferences()?.is_some();

    render_event(&event, personalized, anomalies)
}

fn render_event(event: &EventData, personalized: bool, anomalies: bool) -> Result<()> {
    let stats = event
        .statistics
        .as_ref()
        .context("The stored event has no statistics. Run `riskcast plan` again.")?;

    let cards = build_cards_with(stats, CardOptions { include_anomaly: anomalies });
    render::dashboard(event, &cards, personalized);

    Ok(())
}

fn personalize() -> Result<()> {
    let store = SessionStore::open()?;
    let current = store.load_preferences()?.unwrap_or_default();

    let prefs = UserPreferences {
        max_comfortable_temp: CustomType::<f64>::new("Maximum comfortable temperature (°C):")
            .with_default(current.max_comfortable_temp)
            .prompt()?,
        min_comfortable_temp: CustomType::<f64>::new("Minimum comfortable temperature (°C):")
            .with_default(current.min_comfortable_temp)
            .prompt()?,
        max_wind_tolerance: CustomType::<f64>::new("Maximum tolerable wind speed (km/h):")
            .with_default(current.max_wind_tolerance)
            .prompt()?,
        rain_tolerance: CustomType::<f64>::new("Maximum tolerable rainfall (mm):")
            .with_default(current.rain_tolerance)
            .prompt()?,
        snow_tolerance: CustomType::<f64>::new("Maximum tolerable snowfall (mm):")
            .with_default(current.snow_tolerance)
            .prompt()?,
    };

    store.save_preferences(&prefs)?;
    println!("Preferences saved. Future fetches use your thresholds.");

    Ok(())
}

async fn insight() -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::open()?;

    let event = store.load_event()?.context("No event planned yet.")?;
    let stats = event
        .statistics
        .context("The stored event has no statistics. Run `riskcast plan` again.")?;

    let provider = insight_provider_from_config(&config)?;
    let weather = serde_json::to_value(&stats).context("Failed to serialize statistics")?;
    let summary = provider.summarize(&weather).await?;

    println!("{summary}");

    Ok(())
}

fn clear() -> Result<()> {
    SessionStore::open()?.clear()?;
    println!("Session cleared.");

    Ok(())
}
