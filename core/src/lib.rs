#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ring Gauge widget.
//!
//! This crate defines the domain surface that connects the configuration
//! adapters, the pure layout system, and the rendering backends. Hosts
//! describe the gauge declaratively as a sequence of [`Segment`] values plus
//! a [`ScoreInput`]; the layout system converts that description into
//! angles and anchor points, and rendering adapters project the result onto
//! screen without ever mutating the domain types.

use serde::{Deserialize, Serialize};

/// Title shown above the gauge when the host does not supply one.
pub const DEFAULT_TITLE: &str = "OVERALL SCORE";

/// Maximum score assumed when the host does not supply one.
pub const DEFAULT_MAX_SCORE: f32 = 30.0;

/// One weighted category rendered as one arc of the ring.
///
/// A sequence of segments is order-significant: arcs are placed clockwise
/// around the ring starting at the top, in sequence order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    key: String,
    weight: f32,
    label: String,
    color: SegmentColor,
}

impl Segment {
    /// Creates a new segment from its key, weight, display label and color.
    #[must_use]
    pub fn new<K, L>(key: K, weight: f32, label: L, color: SegmentColor) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            key: key.into(),
            weight,
            label: label.into(),
            color,
        }
    }

    /// Unique key identifying the segment within its gauge.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Relative weight determining the segment's share of the ring.
    ///
    /// A weight of zero is legal and renders a zero-length arc.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Text displayed next to the segment's arc.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Color token applied to the segment's arc and label.
    #[must_use]
    pub const fn color(&self) -> SegmentColor {
        self.color
    }
}

/// Sums the weights of the provided segments.
#[must_use]
pub fn total_weight(segments: &[Segment]) -> f32 {
    segments.iter().map(Segment::weight).sum()
}

/// Color token assigned to a segment, expressed as byte RGB components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl SegmentColor {
    /// Creates a new segment color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Score displayed by the gauge together with the maximum it is read against.
///
/// `0 <= score <= max_score` is expected but deliberately not enforced:
/// out-of-range scores place the pointer beyond or before the ring start,
/// which hosts may rely on to signal anomalous readings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    score: f32,
    max_score: f32,
}

impl ScoreInput {
    /// Creates a new score input.
    #[must_use]
    pub const fn new(score: f32, max_score: f32) -> Self {
        Self { score, max_score }
    }

    /// Current score value shown in the center readout.
    #[must_use]
    pub const fn score(&self) -> f32 {
        self.score
    }

    /// Maximum score the ring's full sweep corresponds to.
    #[must_use]
    pub const fn max_score(&self) -> f32 {
        self.max_score
    }

    /// Replaces the score, keeping the maximum.
    #[must_use]
    pub const fn with_score(self, score: f32) -> Self {
        Self { score, ..self }
    }
}

impl Default for ScoreInput {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_MAX_SCORE)
    }
}

/// Behavioral switches collapsing the widget's variants into one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeOptions {
    /// Scales radius and stroke width with the hosting viewport when `true`;
    /// uses the fixed reference dimensions otherwise.
    pub responsive: bool,
    /// Plays a one-shot entrance sweep the first time the gauge becomes
    /// visible when `true`; renders fully swept immediately otherwise.
    pub animate_on_visible: bool,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            animate_on_visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{total_weight, GaugeOptions, ScoreInput, Segment, SegmentColor};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn segment_round_trips_through_bincode() {
        let segment = Segment::new("bad", 10.0, "BAD", SegmentColor::from_rgb(0xff, 0x4d, 0x4d));
        assert_round_trip(&segment);
    }

    #[test]
    fn segment_color_round_trips_through_bincode() {
        assert_round_trip(&SegmentColor::from_rgb(0x2d, 0xe0, 0x8a));
    }

    #[test]
    fn score_input_round_trips_through_bincode() {
        assert_round_trip(&ScoreInput::new(26.0, 30.0));
    }

    #[test]
    fn gauge_options_round_trips_through_bincode() {
        assert_round_trip(&GaugeOptions {
            responsive: false,
            animate_on_visible: true,
        });
    }

    #[test]
    fn total_weight_sums_segment_weights() {
        let segments = [
            Segment::new("bad", 10.0, "BAD", SegmentColor::from_rgb(255, 77, 77)),
            Segment::new("good", 8.0, "GOOD", SegmentColor::from_rgb(45, 224, 138)),
            Segment::new(
                "standard",
                4.0,
                "STANDARD",
                SegmentColor::from_rgb(255, 143, 51),
            ),
        ];

        assert!((total_weight(&segments) - 22.0).abs() < f32::EPSILON);
    }

    #[test]
    fn total_weight_of_empty_list_is_zero() {
        assert_eq!(total_weight(&[]), 0.0);
    }

    #[test]
    fn score_input_with_score_keeps_maximum() {
        let input = ScoreInput::new(26.0, 30.0).with_score(12.0);
        assert!((input.score() - 12.0).abs() < f32::EPSILON);
        assert!((input.max_score() - 30.0).abs() < f32::EPSILON);
    }
}
