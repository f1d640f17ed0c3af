//! Severity tiers and the green-yellow-red probability color ramp.

use serde::{Deserialize, Serialize};

/// Severity tier of a single weather risk.
///
/// Classification is fail-open: anything outside the four known level
/// strings maps to `Low` rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl RiskLevel {
    /// Map a level string from the statistics service onto a tier.
    /// Matching is case-insensitive and never fails.
    pub fn classify(input: &str) -> Self {
        match input.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "very high" => Self::VeryHigh,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }

    /// Display class for the risk badge. `VeryHigh` shares the `High`
    /// visual weight.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Low => "risk-low",
            Self::Medium => "risk-medium",
            Self::High | Self::VeryHigh => "risk-high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An sRGB color produced by the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Truecolor foreground escape for terminal rendering.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// Interpolate a probability in [0,100] along green -> yellow -> red.
///
/// Two linear segments meeting at 50, where both evaluate to
/// `rgb(254, 255, 0)`. Out-of-range inputs are clamped.
pub fn ramp_color(value: f64) -> Rgb {
    let value = value.clamp(0.0, 100.0);

    if value <= 50.0 {
        let ratio = value / 50.0;
        Rgb {
            r: (ratio * 254.0).round() as u8,
            g: 255,
            b: 0,
        }
    } else {
        let ratio = (value - 50.0) / 50.0;
        Rgb {
            r: 254,
            g: (255.0 - ratio * 255.0).round() as u8,
            b: 0,
        }
    }
}
