//! Terminal rendering of the card dashboard.

use riskcast_core::{EventData, ProgressRing, RiskEntry, WeatherCard};

const GAUGE_WIDTH: usize = 20;
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

pub fn dashboard(event: &EventData, cards: &[WeatherCard], personalized: bool) {
    println!();
    println!("{BOLD}Weather Risk Dashboard{RESET}");

    let date = event.date.format("%b %-d, %Y");
    match &event.name {
        Some(name) => println!("{DIM}{name} — {} — {date}{RESET}", event.location),
        None => println!("{DIM}{} — {date}{RESET}", event.location),
    }
    if personalized {
        println!("{DIM}Personalized for your preferences{RESET}");
    }

    if cards.is_empty() {
        println!();
        println!("No weather cards could be built from the fetched statistics.");
        return;
    }

    for card in cards {
        println!();
        println!("{BOLD}{}{RESET}  (expected: {})", card.title, card.average_value);
        for entry in card.risk.entries() {
            println!("{}", risk_line(entry));
        }
    }
    println!();
}

/// One gauge line: colored bar, percentage, badge, derived description.
fn risk_line(entry: &RiskEntry) -> String {
    // Same color the circular indicator would show at this value.
    let color = ProgressRing::new(entry.value, 150.0, 15.0).color();

    let filled = ((entry.value / 100.0) * GAUGE_WIDTH as f64).round().clamp(0.0, GAUGE_WIDTH as f64)
        as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(GAUGE_WIDTH - filled);

    let label = match &entry.kind {
        Some(kind) => format!("{kind:<7}"),
        None => " ".repeat(7),
    };

    format!(
        "  {label}{}{bar}{RESET} {:>5}%  [{}]  {}",
        color.ansi_fg(),
        entry.value,
        entry.level.as_str().to_uppercase(),
        entry.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskcast_core::{CardRisk, RiskLevel};

    fn entry(value: f64) -> RiskEntry {
        RiskEntry {
            level: RiskLevel::Medium,
            value,
            description: format!("{value}% chance of heavy rain"),
            kind: None,
        }
    }

    #[test]
    fn gauge_fill_tracks_the_value() {
        let line = risk_line(&entry(50.0));
        assert_eq!(line.matches('█').count(), 10);
        assert_eq!(line.matches('░').count(), 10);
        assert!(line.contains("[MEDIUM]"));
        assert!(line.contains("50% chance of heavy rain"));
    }

    #[test]
    fn out_of_range_values_do_not_break_the_gauge() {
        let line = risk_line(&entry(250.0));
        assert_eq!(line.matches('█').count(), GAUGE_WIDTH);
        assert_eq!(line.matches('░').count(), 0);
    }

    #[test]
    fn kind_label_is_shown_for_list_entries() {
        let hot = RiskEntry {
            level: RiskLevel::Low,
            value: 15.0,
            description: "15% chance of extreme heat".to_string(),
            kind: Some("hot".to_string()),
        };
        assert!(risk_line(&hot).starts_with("  hot"));
    }

    #[test]
    fn single_and_list_risks_both_render() {
        let risk = CardRisk::Entries(vec![entry(10.0), entry(90.0)]);
        assert_eq!(risk.entries().len(), 2);
    }
}
