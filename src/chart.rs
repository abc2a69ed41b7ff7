//! Chart description and the renderer seam.
//!
//! Handlers build a [`ChartSpec`] from a week series and hand it to whatever
//! [`ChartRenderer`] the application state carries. [`SvgLineChart`] is the
//! renderer the binary ships with.

use crate::models::{Metric, WeekSeries};
use crate::week::WeekWindow;
use serde::Serialize;
use std::fmt::Write;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub metric: Metric,
    pub title: String,
    pub x_axis_name: String,
    pub y_axis_name: String,
    pub categories: Vec<String>,
    pub values: Vec<Option<f64>>,
    /// Inclusive category index ranges drawn as shaded bands.
    pub shaded: Vec<(usize, usize)>,
}

impl ChartSpec {
    pub fn weekly(series: &WeekSeries, window: &WeekWindow) -> Self {
        let (start, end) = window.labels();
        Self {
            metric: series.metric,
            title: series.metric.title().to_string(),
            x_axis_name: format!("Week of ({start} - {end})"),
            y_axis_name: series.metric.axis_name().to_string(),
            categories: WEEKDAYS.iter().map(|day| day.to_string()).collect(),
            values: series.values.to_vec(),
            shaded: vec![(0, 1), (5, 6)],
        }
    }

    pub fn has_data(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

pub trait ChartRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn render(&self, spec: &ChartSpec) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct SvgLineChart {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgLineChart {
    fn default() -> Self {
        Self {
            width: 475,
            height: 300,
        }
    }
}

const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 24.0;
const PAD_TOP: f64 = 44.0;
const PAD_BOTTOM: f64 = 60.0;

impl SvgLineChart {
    fn x_at(&self, index: usize, slots: usize) -> f64 {
        let plot = self.width as f64 - PAD_LEFT - PAD_RIGHT;
        if slots <= 1 {
            return PAD_LEFT + plot / 2.0;
        }
        PAD_LEFT + plot * index as f64 / (slots - 1) as f64
    }

    fn y_at(&self, value: f64, max: f64) -> f64 {
        let plot = self.height as f64 - PAD_TOP - PAD_BOTTOM;
        PAD_TOP + plot - plot * (value / max)
    }
}

impl ChartRenderer for SvgLineChart {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, spec: &ChartSpec) -> String {
        let (width, height) = (self.width, self.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = write!(
            svg,
            r#"<text class="chart-title" x="{}" y="24" text-anchor="middle">{}</text>"#,
            width / 2,
            escape(&spec.title)
        );

        if !spec.has_data() {
            let _ = write!(
                svg,
                r#"<text class="chart-empty" x="{}" y="{}" text-anchor="middle">No {} Data Available</text></svg>"#,
                width / 2,
                height / 2,
                spec.metric.noun()
            );
            return svg;
        }

        let slots = spec.categories.len();
        let max = spec
            .values
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, value| acc.max(*value));
        let max = if max > 0.0 { max } else { 1.0 };
        let bottom = height as f64 - PAD_BOTTOM;

        for &(from, to) in &spec.shaded {
            let x0 = self.x_at(from, slots);
            let x1 = self.x_at(to, slots);
            let _ = write!(
                svg,
                r#"<rect class="chart-band" x="{x0:.1}" y="{PAD_TOP:.1}" width="{:.1}" height="{:.1}" fill="rgba(163,163,163,0.4)"/>"#,
                x1 - x0,
                bottom - PAD_TOP
            );
        }

        let _ = write!(
            svg,
            r#"<line class="chart-axis" x1="{PAD_LEFT:.1}" y1="{bottom:.1}" x2="{:.1}" y2="{bottom:.1}" stroke="currentColor"/>"#,
            width as f64 - PAD_RIGHT
        );
        for (index, label) in spec.categories.iter().enumerate() {
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                self.x_at(index, slots),
                bottom + 16.0,
                escape(label)
            );
        }
        let _ = write!(
            svg,
            r#"<text class="chart-axis-name" x="{}" y="{:.1}" text-anchor="middle">{}</text>"#,
            width / 2,
            bottom + 40.0,
            escape(&spec.x_axis_name)
        );
        let _ = write!(
            svg,
            r#"<text class="chart-axis-name" x="12" y="{:.1}" transform="rotate(-90 12 {:.1})" text-anchor="middle">{}</text>"#,
            PAD_TOP + (bottom - PAD_TOP) / 2.0,
            PAD_TOP + (bottom - PAD_TOP) / 2.0,
            escape(&spec.y_axis_name)
        );

        // Missing days are skipped and the line connects across them.
        let points: Vec<(f64, f64)> = spec
            .values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                value.map(|value| (self.x_at(index, slots), self.y_at(value, max)))
            })
            .collect();
        let path = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r##"<polyline class="chart-line" points="{path}" fill="none" stroke="#3f76c0" stroke-width="3"/>"##
        );
        for (x, y) in &points {
            let _ = write!(
                svg,
                r##"<circle class="chart-point" cx="{x:.1}" cy="{y:.1}" r="3.5" fill="white" stroke="#3f76c0"/>"##
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
