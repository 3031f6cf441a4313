#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that presents a Ring Gauge window.

mod config;
mod inputs;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use ring_gauge_core::{
    total_weight, GaugeOptions, ScoreInput, Segment, SegmentColor, DEFAULT_MAX_SCORE,
    DEFAULT_TITLE,
};
use ring_gauge_rendering::{Color, GaugeScene, Presentation, RenderingBackend};
use ring_gauge_rendering_macroquad::MacroquadBackend;

/// Renders a score as a ring of weighted, labelled arc segments with a
/// center readout and a pointer dot marking the score's position.
#[derive(Debug, Parser)]
#[command(name = "ring-gauge", version)]
struct Args {
    /// Score shown in the center readout.
    #[arg(long)]
    score: Option<f32>,

    /// Maximum score the ring's full sweep corresponds to.
    #[arg(long)]
    max_score: Option<f32>,

    /// Segment in KEY:WEIGHT:LABEL:HEXCOLOR form; repeat once per segment.
    #[arg(long = "segment", value_name = "KEY:WEIGHT:LABEL:HEXCOLOR")]
    segments: Vec<String>,

    /// TOML configuration file; command-line flags take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Heading shown above the center readout.
    #[arg(long)]
    title: Option<String>,

    /// Keep the reference pixel dimensions instead of scaling with the window.
    #[arg(long)]
    fixed_size: bool,

    /// Play a one-shot entrance sweep when the gauge first appears.
    #[arg(long)]
    animate: bool,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,

    /// Initial window size in pixels.
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    window_size: Option<String>,

    /// Print frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Ring Gauge command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => config::load(path)?,
        None => config::GaugeConfig::default(),
    };

    let settings = resolve_settings(&args, &file);

    let segments = resolve_segments(&args.segments, file.segments)?;
    ensure!(
        total_weight(&segments) > 0.0,
        "segment weights must sum to a positive value"
    );

    let scene = GaugeScene::new(settings.title, segments, settings.score, settings.options);
    let presentation = Presentation::new("Ring Gauge", Color::from_rgb_u8(0, 0, 0), scene);

    let mut backend = MacroquadBackend::new().with_show_fps(args.show_fps);
    if args.vsync {
        backend = backend.with_vsync(true);
    }
    if let Some(spec) = &args.window_size {
        let (width, height) = inputs::parse_window_size(spec)
            .with_context(|| format!("invalid --window-size value '{spec}'"))?;
        backend = backend.with_window_size(width, height);
    }

    backend
        .run(presentation, |_dt, _viewport, _scene| {})
        .context("rendering backend exited with an error")
}

/// Scene settings after flag-over-file precedence has been applied.
#[derive(Debug, PartialEq)]
struct GaugeSettings {
    title: String,
    score: ScoreInput,
    options: GaugeOptions,
}

/// Merges command-line flags over config file values over built-in defaults.
fn resolve_settings(args: &Args, file: &config::GaugeConfig) -> GaugeSettings {
    let score = args.score.or(file.score).unwrap_or(26.0);
    let max_score = args
        .max_score
        .or(file.max_score)
        .unwrap_or(DEFAULT_MAX_SCORE);
    let title = args
        .title
        .clone()
        .or_else(|| file.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

    GaugeSettings {
        title,
        score: ScoreInput::new(score, max_score),
        options: GaugeOptions {
            responsive: if args.fixed_size {
                false
            } else {
                file.responsive.unwrap_or(true)
            },
            animate_on_visible: args.animate || file.animate_on_visible.unwrap_or(false),
        },
    }
}

/// Selects segments from flags, then the config file, then the demo gauge.
fn resolve_segments(
    flag_specs: &[String],
    file_segments: Vec<config::SegmentConfig>,
) -> Result<Vec<Segment>> {
    if !flag_specs.is_empty() {
        return flag_specs
            .iter()
            .map(|spec| {
                inputs::parse_segment_spec(spec)
                    .with_context(|| format!("invalid --segment value '{spec}'"))
            })
            .collect();
    }

    if !file_segments.is_empty() {
        return file_segments
            .into_iter()
            .map(config::SegmentConfig::into_segment)
            .collect();
    }

    Ok(demo_segments())
}

/// The original demonstration gauge: three categories scoring 26 out of 30.
fn demo_segments() -> Vec<Segment> {
    vec![
        Segment::new("bad", 10.0, "BAD", SegmentColor::from_rgb(0xff, 0x4d, 0x4d)),
        Segment::new("good", 8.0, "GOOD", SegmentColor::from_rgb(0x2d, 0xe0, 0x8a)),
        Segment::new(
            "standard",
            4.0,
            "STANDARD",
            SegmentColor::from_rgb(0xff, 0x8f, 0x33),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_take_precedence_over_file_segments() {
        let file_segments = vec![config::SegmentConfig {
            key: "file".to_owned(),
            weight: 1.0,
            label: "FILE".to_owned(),
            color: "#ffffff".to_owned(),
        }];

        let segments = resolve_segments(&["cli:2:CLI:#000000".to_owned()], file_segments)
            .expect("flag segments resolve");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].key(), "cli");
    }

    #[test]
    fn file_segments_beat_the_demo_defaults() {
        let file_segments = vec![config::SegmentConfig {
            key: "file".to_owned(),
            weight: 1.0,
            label: "FILE".to_owned(),
            color: "#ffffff".to_owned(),
        }];

        let segments = resolve_segments(&[], file_segments).expect("file segments resolve");
        assert_eq!(segments[0].key(), "file");
    }

    #[test]
    fn demo_segments_match_the_reference_gauge() {
        let segments = resolve_segments(&[], Vec::new()).expect("demo segments resolve");

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].key(), "bad");
        assert!((total_weight(&segments) - 22.0).abs() < f32::EPSILON);
    }

    fn full_config_file() -> config::GaugeConfig {
        config::GaugeConfig {
            title: Some("FILE TITLE".to_owned()),
            score: Some(5.0),
            max_score: Some(10.0),
            responsive: Some(false),
            animate_on_visible: Some(true),
            segments: Vec::new(),
        }
    }

    #[test]
    fn flags_override_config_file_settings() {
        let args = Args::parse_from([
            "ring-gauge",
            "--score",
            "12",
            "--max-score",
            "20",
            "--title",
            "FLAG TITLE",
        ]);

        let settings = resolve_settings(&args, &full_config_file());

        assert_eq!(settings.title, "FLAG TITLE");
        assert_eq!(settings.score, ScoreInput::new(12.0, 20.0));
        // Boolean flags only force their value when set; unset flags defer
        // to the file.
        assert!(!settings.options.responsive);
        assert!(settings.options.animate_on_visible);
    }

    #[test]
    fn file_settings_fill_in_unset_flags() {
        let args = Args::parse_from(["ring-gauge"]);

        let settings = resolve_settings(&args, &full_config_file());

        assert_eq!(settings.title, "FILE TITLE");
        assert_eq!(settings.score, ScoreInput::new(5.0, 10.0));
        assert!(!settings.options.responsive);
        assert!(settings.options.animate_on_visible);
    }

    #[test]
    fn fixed_size_flag_overrides_a_responsive_config_file() {
        let args = Args::parse_from(["ring-gauge", "--fixed-size"]);
        let mut file = full_config_file();
        file.responsive = Some(true);

        let settings = resolve_settings(&args, &file);
        assert!(!settings.options.responsive);
    }

    #[test]
    fn defaults_apply_when_neither_flags_nor_file_set_values() {
        let args = Args::parse_from(["ring-gauge"]);

        let settings = resolve_settings(&args, &config::GaugeConfig::default());

        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.score, ScoreInput::new(26.0, DEFAULT_MAX_SCORE));
        assert!(settings.options.responsive);
        assert!(!settings.options.animate_on_visible);
    }

    #[test]
    fn malformed_flag_segments_surface_the_offending_spec() {
        let error = resolve_segments(&["nope".to_owned()], Vec::new())
            .expect_err("malformed spec is rejected");
        assert!(error.to_string().contains("nope"));
    }
}
