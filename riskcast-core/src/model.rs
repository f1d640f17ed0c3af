use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather-risk statistics payload returned by the climatology service.
///
/// Every section is optional: a partial payload degrades to a partial
/// dashboard instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatistics {
    pub location: Option<LocationPoint>,
    pub date_of_trip: Option<String>,
    pub average_conditions: Option<AverageConditions>,
    pub extreme_weather_risks: Option<ExtremeRisks>,
    pub relative_weather_risks: Option<RelativeRisks>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AverageConditions {
    pub rainfall_mm: Option<f64>,
    #[serde(rename = "temperature_C")]
    pub temperature_c: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtremeRisks {
    pub very_wet: Option<RiskStat>,
    pub very_hot: Option<RiskStat>,
    pub very_cold: Option<RiskStat>,
    pub very_windy: Option<RiskStat>,
}

/// One graded risk: a probability already expressed as 0-100 and the
/// service's own level string. A missing level classifies as low.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskStat {
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub probability_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelativeRisks {
    pub hotter_than_usual: Option<RelativeStat>,
    pub colder_than_usual: Option<RelativeStat>,
    pub windier_than_usual: Option<RelativeStat>,
    pub wetter_than_usual: Option<RelativeStat>,
}

/// Deviation from the 30-year baseline. Informational, never graded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RelativeStat {
    #[serde(default)]
    pub probability_percent: f64,
}

/// The planned event held in the session store, together with the last
/// fetched statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub name: Option<String>,
    pub statistics: Option<RawStatistics>,
}

/// User comfort thresholds, persisted session-locally and forwarded as
/// optional query parameters on the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub max_comfortable_temp: f64,
    pub min_comfortable_temp: f64,
    pub max_wind_tolerance: f64,
    pub rain_tolerance: f64,
    /// Variant extension: stored and round-tripped, never forwarded.
    #[serde(default = "default_snow_tolerance")]
    pub snow_tolerance: f64,
}

fn default_snow_tolerance() -> f64 {
    10.0
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            max_comfortable_temp: 28.0,
            min_comfortable_temp: 15.0,
            max_wind_tolerance: 25.0,
            rain_tolerance: 20.0,
            snow_tolerance: 10.0,
        }
    }
}

/// Query parameters forwarded to the statistics service. Values stay
/// strings so a proxying caller relays exactly what it received.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub lat: String,
    pub lon: String,
    pub date_of_trip: String,
    pub hot: Option<String>,
    pub cold: Option<String>,
    pub windy: Option<String>,
    pub rain: Option<String>,
}

impl StatsQuery {
    pub fn new(
        lat: impl Into<String>,
        lon: impl Into<String>,
        date_of_trip: impl Into<String>,
    ) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            date_of_trip: date_of_trip.into(),
            ..Self::default()
        }
    }

    /// Pre-fill the optional threshold parameters from stored preferences.
    pub fn with_preferences(mut self, prefs: &UserPreferences) -> Self {
        self.hot = Some(prefs.max_comfortable_temp.to_string());
        self.cold = Some(prefs.min_comfortable_temp.to_string());
        self.windy = Some(prefs.max_wind_tolerance.to_string());
        self.rain = Some(prefs.rain_tolerance.to_string());
        self
    }

    /// Key/value pairs in the order the statistics service documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("lat", self.lat.as_str()),
            ("lon", self.lon.as_str()),
            ("date_of_trip", self.date_of_trip.as_str()),
        ];
        for (key, value) in [
            ("hot", &self.hot),
            ("cold", &self.cold),
            ("windy", &self.windy),
            ("rain", &self.rain),
        ] {
            if let Some(v) = value {
                pairs.push((key, v.as_str()));
            }
        }
        pairs
    }
}
