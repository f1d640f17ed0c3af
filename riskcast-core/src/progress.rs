//! Circular progress-ring geometry for the 0-100 risk indicators.

use std::f64::consts::PI;

use crate::risk::{Rgb, ramp_color};

/// Geometry of a circular indicator whose filled arc length is
/// proportional to `progress`. Purely a function of its three inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub progress: f64,
    pub size: f64,
    pub stroke_width: f64,
}

impl ProgressRing {
    pub fn new(progress: f64, size: f64, stroke_width: f64) -> Self {
        Self { progress, size, stroke_width }
    }

    /// Original component defaults: 120px ring, 10px stroke.
    pub fn with_defaults(progress: f64) -> Self {
        Self::new(progress, 120.0, 10.0)
    }

    pub fn radius(&self) -> f64 {
        (self.size - self.stroke_width) / 2.0
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    /// Dash offset leaving an arc proportional to `progress` visible.
    pub fn dash_offset(&self) -> f64 {
        let circumference = self.circumference();
        circumference - (self.progress / 100.0) * circumference
    }

    /// Ramp color at this ring's progress value.
    pub fn color(&self) -> Rgb {
        ramp_color(self.progress)
    }

    /// Render the indicator as an SVG fragment: a neutral track, the
    /// colored arc rotated to start at twelve o'clock, and the centered
    /// percentage label.
    pub fn to_svg(&self) -> String {
        let size = self.size;
        let stroke = self.stroke_width;
        let center = size / 2.0;
        let radius = self.radius();

        let mut svg = format!(r##"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}">"##);
        svg.push_str(&format!(
            r##"<circle stroke="#e6e6e6" fill="transparent" stroke-width="{stroke}" r="{radius}" cx="{center}" cy="{center}"/>"##
        ));
        svg.push_str(&format!(
            r##"<circle stroke="{color}" fill="transparent" stroke-width="{stroke}" r="{radius}" cx="{center}" cy="{center}" stroke-dasharray="{dasharray}" stroke-dashoffset="{offset}" stroke-linecap="round" transform="rotate(-90 {center} {center})"/>"##,
            color = self.color().css(),
            dasharray = self.circumference(),
            offset = self.dash_offset(),
        ));
        svg.push_str(&format!(
            r##"<text x="{center}" y="{center}" text-anchor="middle" dominant-baseline="central" font-weight="bold" font-size="{font_size}">{progress}%</text>"##,
            font_size = size * 0.2,
            progress = self.progress,
        ));
        svg.push_str("</svg>");
        svg
    }
}
