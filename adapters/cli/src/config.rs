//! Optional TOML configuration file for the gauge.
//!
//! Every field is optional; command-line flags take precedence over file
//! values, and anything left unset falls back to the built-in demo gauge.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use ring_gauge_core::Segment;
use serde::Deserialize;

use crate::inputs::parse_hex_color;

/// Gauge description loaded from a TOML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct GaugeConfig {
    /// Heading shown above the center readout.
    pub title: Option<String>,
    /// Score shown in the center readout.
    pub score: Option<f32>,
    /// Maximum score the ring's full sweep corresponds to.
    pub max_score: Option<f32>,
    /// Scale the gauge with the window instead of using fixed pixels.
    pub responsive: Option<bool>,
    /// Play the one-shot entrance sweep when the gauge first appears.
    pub animate_on_visible: Option<bool>,
    /// Weighted categories placed clockwise from the top, in order.
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

/// One segment entry within the configuration file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct SegmentConfig {
    /// Unique key identifying the segment.
    pub key: String,
    /// Relative weight of the segment.
    pub weight: f32,
    /// Text displayed next to the segment's arc.
    pub label: String,
    /// Hex color such as `#ff4d4d`.
    pub color: String,
}

impl SegmentConfig {
    /// Converts the file entry into a domain segment.
    pub(crate) fn into_segment(self) -> Result<Segment> {
        let color = parse_hex_color(&self.color)
            .with_context(|| format!("invalid color for segment '{}'", self.key))?;
        Ok(Segment::new(self.key, self.weight, self.label, color))
    }
}

/// Loads and parses a gauge configuration file.
pub(crate) fn load(path: &Path) -> Result<GaugeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(text: &str) -> Result<GaugeConfig> {
    Ok(toml::from_str(text)?)
}
