//! Dashboard card construction from a raw statistics payload.
//!
//! The build is total: sections the payload does not carry turn into
//! omitted cards, never into errors. A partial dashboard beats none.

use serde::{Deserialize, Serialize};

use crate::model::{RawStatistics, RelativeStat, RiskStat};
use crate::risk::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Rain,
    Temperature,
    Wind,
    Anomaly,
}

/// One classified risk shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub level: RiskLevel,
    /// Probability in percent, trusted to already be 0-100.
    pub value: f64,
    pub description: String,
    /// Sub-label for list entries, e.g. "hot" / "cold".
    pub kind: Option<String>,
}

/// Rain and wind carry a single risk; temperature carries the hot/cold
/// pair and the anomaly card one entry per reported deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRisk {
    Single(RiskEntry),
    Entries(Vec<RiskEntry>),
}

impl CardRisk {
    pub fn entries(&self) -> &[RiskEntry] {
        match self {
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Entries(entries) => entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCard {
    /// Stable key, constant across rebuilds of the same category.
    pub id: String,
    pub category: CardCategory,
    pub title: String,
    pub average_value: String,
    pub risk: CardRisk,
}

/// Variant switches. The anomaly card is an optional capability, off by
/// default.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardOptions {
    pub include_anomaly: bool,
}

/// Build the canonical card set: rain, temperature, wind.
pub fn build_cards(stats: &RawStatistics) -> Vec<WeatherCard> {
    build_cards_with(stats, CardOptions::default())
}

/// Build the card set with variant options applied. Order is fixed as
/// rain, temperature, wind, anomaly.
pub fn build_cards_with(stats: &RawStatistics, options: CardOptions) -> Vec<WeatherCard> {
    let mut cards = Vec::with_capacity(4);
    let averages = stats.average_conditions.as_ref();
    let extremes = stats.extreme_weather_risks.as_ref();

    if let (Some(rainfall), Some(very_wet)) = (
        averages.and_then(|a| a.rainfall_mm),
        extremes.and_then(|e| e.very_wet.as_ref()),
    ) {
        cards.push(WeatherCard {
            id: "rain".to_string(),
            category: CardCategory::Rain,
            title: "Rain Risk".to_string(),
            average_value: format!("{rainfall} mm"),
            risk: CardRisk::Single(graded_entry(very_wet, None, "heavy rain")),
        });
    }

    if let (Some(temperature), Some(very_hot), Some(very_cold)) = (
        averages.and_then(|a| a.temperature_c),
        extremes.and_then(|e| e.very_hot.as_ref()),
        extremes.and_then(|e| e.very_cold.as_ref()),
    ) {
        cards.push(WeatherCard {
            id: "temp".to_string(),
            category: CardCategory::Temperature,
            title: "Temperature".to_string(),
            average_value: format!("{temperature}°C"),
            risk: CardRisk::Entries(vec![
                graded_entry(very_hot, Some("hot"), "extreme heat"),
                graded_entry(very_cold, Some("cold"), "extreme cold"),
            ]),
        });
    }

    if let (Some(wind_speed), Some(very_windy)) = (
        averages.and_then(|a| a.wind_speed_kmh),
        extremes.and_then(|e| e.very_windy.as_ref()),
    ) {
        cards.push(WeatherCard {
            id: "wind".to_string(),
            category: CardCategory::Wind,
            title: "Wind Conditions".to_string(),
            average_value: format!("{wind_speed} km/h"),
            risk: CardRisk::Single(graded_entry(very_windy, None, "strong winds")),
        });
    }

    if options.include_anomaly {
        cards.extend(anomaly_card(stats));
    }

    cards
}

fn graded_entry(stat: &RiskStat, kind: Option<&str>, condition: &str) -> RiskEntry {
    RiskEntry {
        level: RiskLevel::classify(&stat.risk_level),
        value: stat.probability_percent,
        description: format!("{}% chance of {condition}", stat.probability_percent),
        kind: kind.map(str::to_string),
    }
}

fn anomaly_card(stats: &RawStatistics) -> Option<WeatherCard> {
    let relative = stats.relative_weather_risks.as_ref()?;

    let mut entries = Vec::with_capacity(4);
    let deviations: [(&str, Option<&RelativeStat>); 4] = [
        ("hotter", relative.hotter_than_usual.as_ref()),
        ("colder", relative.colder_than_usual.as_ref()),
        ("windier", relative.windier_than_usual.as_ref()),
        ("wetter", relative.wetter_than_usual.as_ref()),
    ];
    for (kind, stat) in deviations {
        if let Some(stat) = stat {
            entries.push(RiskEntry {
                level: RiskLevel::Low,
                value: 0.0,
                description: format!(
                    "{}% likelihood of {kind} than usual conditions",
                    stat.probability_percent
                ),
                kind: Some(kind.to_string()),
            });
        }
    }

    if entries.is_empty() {
        return None;
    }

    Some(WeatherCard {
        id: "anomaly".to_string(),
        category: CardCategory::Anomaly,
        title: "Climate Anomalies".to_string(),
        average_value: "30-year baseline".to_string(),
        risk: CardRisk::Entries(entries),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AverageConditions, ExtremeRisks, RelativeRisks};
    use crate::risk::RiskLevel;

    fn sample_stats() -> RawStatistics {
        serde_json::from_str(
            r#"{
                "average_conditions": {"rainfall_mm": 15, "temperature_C": 24, "wind_speed_kmh": 12},
                "extreme_weather_risks": {
                    "very_wet": {"risk_level": "Medium", "probability_percent": 35},
                    "very_hot": {"risk_level": "Low", "probability_percent": 15},
                    "very_cold": {"risk_level": "Low", "probability_percent": 5},
                    "very_windy": {"risk_level": "Low", "probability_percent": 10}
                }
            }"#,
        )
        .expect("sample payload must parse")
    }

    #[test]
    fn complete_payload_builds_the_three_cards_in_order() {
        let cards = build_cards(&sample_stats());

        let categories: Vec<CardCategory> = cards.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![CardCategory::Rain, CardCategory::Temperature, CardCategory::Wind]
        );
        assert_eq!(cards[0].id, "rain");
        assert_eq!(cards[1].id, "temp");
        assert_eq!(cards[2].id, "wind");
    }

    #[test]
    fn rain_card_matches_the_reference_scenario() {
        let cards = build_cards(&sample_stats());
        let rain = &cards[0];

        assert_eq!(rain.title, "Rain Risk");
        assert_eq!(rain.average_value, "15 mm");
        let CardRisk::Single(entry) = &rain.risk else {
            panic!("rain risk must be a single entry");
        };
        assert_eq!(entry.level, RiskLevel::Medium);
        assert_eq!(entry.value, 35.0);
        assert_eq!(entry.description, "35% chance of heavy rain");
        assert!(entry.kind.is_none());
    }

    #[test]
    fn temperature_card_carries_the_hot_cold_pair() {
        let cards = build_cards(&sample_stats());
        let temp = &cards[1];

        assert_eq!(temp.average_value, "24°C");
        let CardRisk::Entries(entries) = &temp.risk else {
            panic!("temperature risk must be a list");
        };
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].kind.as_deref(), Some("hot"));
        assert_eq!(entries[0].level, RiskLevel::Low);
        assert_eq!(entries[0].value, 15.0);
        assert_eq!(entries[0].description, "15% chance of extreme heat");

        assert_eq!(entries[1].kind.as_deref(), Some("cold"));
        assert_eq!(entries[1].level, RiskLevel::Low);
        assert_eq!(entries[1].value, 5.0);
        assert_eq!(entries[1].description, "5% chance of extreme cold");
    }

    #[test]
    fn wind_card_description_and_label() {
        let cards = build_cards(&sample_stats());
        let wind = &cards[2];

        assert_eq!(wind.average_value, "12 km/h");
        let CardRisk::Single(entry) = &wind.risk else {
            panic!("wind risk must be a single entry");
        };
        assert_eq!(entry.description, "10% chance of strong winds");
    }

    #[test]
    fn fractional_values_keep_their_decimals() {
        let mut stats = sample_stats();
        let averages = stats.average_conditions.as_mut().expect("averages");
        averages.rainfall_mm = Some(7.25);
        let extremes = stats.extreme_weather_risks.as_mut().expect("extremes");
        extremes.very_wet.as_mut().expect("very_wet").probability_percent = 12.5;

        let cards = build_cards(&stats);
        assert_eq!(cards[0].average_value, "7.25 mm");
        assert_eq!(cards[0].risk.entries()[0].description, "12.5% chance of heavy rain");
    }

    #[test]
    fn missing_sections_omit_cards_instead_of_failing() {
        let empty = RawStatistics::default();
        assert!(build_cards(&empty).is_empty());

        // No wind average: the wind card disappears, the others stay.
        let mut stats = sample_stats();
        stats.average_conditions = Some(AverageConditions {
            wind_speed_kmh: None,
            ..stats.average_conditions.expect("averages")
        });
        let cards = build_cards(&stats);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.category != CardCategory::Wind));

        // Missing very_cold drops the whole temperature card.
        let mut stats = sample_stats();
        let extremes = stats.extreme_weather_risks.as_mut().expect("extremes");
        extremes.very_cold = None;
        let cards = build_cards(&stats);
        assert!(cards.iter().all(|c| c.category != CardCategory::Temperature));
    }

    #[test]
    fn unrecognized_level_string_falls_back_to_low() {
        let mut stats = sample_stats();
        let extremes = stats.extreme_weather_risks.as_mut().expect("extremes");
        extremes.very_wet.as_mut().expect("very_wet").risk_level = "Very High Risk".to_string();

        let cards = build_cards(&stats);
        assert_eq!(cards[0].risk.entries()[0].level, RiskLevel::Low);
    }

    #[test]
    fn anomaly_card_is_off_by_default_and_informational_when_enabled() {
        let mut stats = sample_stats();
        stats.relative_weather_risks = serde_json::from_str::<Option<RelativeRisks>>(
            r#"{
                "hotter_than_usual": {"probability_percent": 22.5},
                "wetter_than_usual": {"probability_percent": 8}
            }"#,
        )
        .expect("relative risks parse");

        assert_eq!(build_cards(&stats).len(), 3);

        let cards = build_cards_with(&stats, CardOptions { include_anomaly: true });
        assert_eq!(cards.len(), 4);

        let anomaly = &cards[3];
        assert_eq!(anomaly.id, "anomaly");
        assert_eq!(anomaly.category, CardCategory::Anomaly);
        let entries = anomaly.risk.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.level == RiskLevel::Low && e.value == 0.0));
        assert_eq!(
            entries[0].description,
            "22.5% likelihood of hotter than usual conditions"
        );
        assert_eq!(entries[1].kind.as_deref(), Some("wetter"));
    }

    #[test]
    fn anomaly_option_without_relative_risks_adds_nothing() {
        let stats = sample_stats();
        let cards = build_cards_with(&stats, CardOptions { include_anomaly: true });
        assert_eq!(cards.len(), 3);

        let mut stats = sample_stats();
        stats.relative_weather_risks = Some(RelativeRisks::default());
        let cards = build_cards_with(&stats, CardOptions { include_anomaly: true });
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn card_risk_round_trips_as_single_value_or_array() {
        let cards = build_cards(&sample_stats());

        let json = serde_json::to_string(&cards[0]).expect("serialize rain card");
        assert!(json.contains("\"risk\":{"));
        let back: WeatherCard = serde_json::from_str(&json).expect("deserialize rain card");
        assert_eq!(back, cards[0]);

        let json = serde_json::to_string(&cards[1]).expect("serialize temperature card");
        assert!(json.contains("\"risk\":["));
        let back: WeatherCard = serde_json::from_str(&json).expect("deserialize temperature card");
        assert_eq!(back, cards[1]);
    }

    #[test]
    fn missing_extremes_section_drops_graded_cards() {
        let stats = RawStatistics {
            average_conditions: Some(AverageConditions {
                rainfall_mm: Some(3.0),
                temperature_c: Some(21.0),
                wind_speed_kmh: Some(9.0),
            }),
            extreme_weather_risks: Some(ExtremeRisks::default()),
            ..RawStatistics::default()
        };
        assert!(build_cards(&stats).is_empty());
    }
}
