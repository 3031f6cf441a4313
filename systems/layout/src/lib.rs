#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure ring-layout system for the Ring Gauge widget.
//!
//! Converts a sequence of weighted [`Segment`] values plus a [`ScoreInput`]
//! into arc lengths, rotational offsets and Cartesian anchor points on a
//! circle. The system holds no state and performs no side effects: calling
//! it twice with identical inputs yields bit-identical output, so rendering
//! adapters are free to recompute the full layout on every frame.
//!
//! Angles use the ring's own coordinate frame throughout: 0° is the top of
//! the ring and angles grow clockwise (screen coordinates, y pointing down).
//! [`angular_position`] is the single source of truth for converting a
//! ring-frame angle into a point; arc tessellation, pointer placement and
//! label placement all go through it so the visual elements stay aligned.

use std::{error::Error, fmt};

use glam::Vec2;
use ring_gauge_core::{total_weight, ScoreInput, Segment};

/// Full sweep of the ring expressed in degrees.
const FULL_TURN_DEGREES: f32 = 360.0;

/// Rotation between the ring frame (0° at the top) and the standard
/// screen-space frame (0° pointing right).
const RING_FRAME_ROTATION_DEGREES: f32 = -90.0;

/// Validated ring dimensions shared by every layout computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingDimensions {
    radius: f32,
    stroke_width: f32,
    gap_fraction: f32,
}

impl RingDimensions {
    /// Creates ring dimensions from the nominal radius, the stroke width of
    /// the arcs, and the fraction of the circumference reserved as the gap
    /// between consecutive arcs.
    ///
    /// The stroke is centered on the nominal radius, so the effective
    /// (normalized) radius is `radius - stroke_width / 2` and must remain
    /// positive. `gap_fraction` must lie in `[0, 1)`.
    pub fn new(radius: f32, stroke_width: f32, gap_fraction: f32) -> Result<Self, LayoutError> {
        if !radius.is_finite() || !stroke_width.is_finite() || stroke_width < 0.0 {
            return Err(LayoutError::NonPositiveRadius { radius });
        }

        let normalized = radius - stroke_width / 2.0;
        if normalized <= 0.0 {
            return Err(LayoutError::NonPositiveRadius { radius: normalized });
        }

        if !(0.0..1.0).contains(&gap_fraction) {
            return Err(LayoutError::InvalidGapFraction { gap_fraction });
        }

        Ok(Self {
            radius,
            stroke_width,
            gap_fraction,
        })
    }

    /// Nominal ring radius measured to the center of the stroke.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Thickness of the arc stroke.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Fraction of the circumference left blank between consecutive arcs.
    #[must_use]
    pub const fn gap_fraction(&self) -> f32 {
        self.gap_fraction
    }

    /// Radius of the circle the stroke is centered on.
    #[must_use]
    pub fn normalized_radius(&self) -> f32 {
        self.radius - self.stroke_width / 2.0
    }

    /// Circumference of the normalized circle.
    #[must_use]
    pub fn circumference(&self) -> f32 {
        2.0 * std::f32::consts::PI * self.normalized_radius()
    }

    /// Length of the blank gap inserted after each arc.
    #[must_use]
    pub fn gap_length(&self) -> f32 {
        self.gap_fraction * self.circumference()
    }

    /// Outer edge of the stroked ring, where labels begin.
    #[must_use]
    pub fn outer_radius(&self) -> f32 {
        self.normalized_radius() + self.stroke_width / 2.0
    }
}

/// Arc descriptor for a single segment placed on the ring.
///
/// `start_angle` and `end_angle` bound the segment's full weight share
/// (including the trailing gap); the visible arc begins at `start_angle`
/// and sweeps `sweep_angle` degrees clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentArc {
    arc_length: f32,
    start_offset: f32,
    start_angle: f32,
    end_angle: f32,
    sweep_angle: f32,
}

impl SegmentArc {
    /// Length of the visible arc along the circumference, gap subtracted.
    ///
    /// Clamped to zero when the gap outweighs the segment's share, so the
    /// dash pattern never inverts.
    #[must_use]
    pub const fn arc_length(&self) -> f32 {
        self.arc_length
    }

    /// Distance along the circumference where the segment's span begins.
    #[must_use]
    pub const fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Ring-frame angle where the segment's span begins.
    #[must_use]
    pub const fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Ring-frame angle where the segment's span ends.
    #[must_use]
    pub const fn end_angle(&self) -> f32 {
        self.end_angle
    }

    /// Degrees swept by the visible arc, gap subtracted.
    #[must_use]
    pub const fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    /// Ring-frame angle at the middle of the segment's span, used to anchor
    /// the segment's label and connector.
    #[must_use]
    pub fn midpoint_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Complete ring layout derived from one sequence of segments.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLayout {
    arcs: Vec<SegmentArc>,
    circumference: f32,
    gap_length: f32,
}

impl RingLayout {
    /// Arc descriptors in the same order as the input segments.
    #[must_use]
    pub fn arcs(&self) -> &[SegmentArc] {
        &self.arcs
    }

    /// Circumference of the normalized circle the arcs are placed on.
    #[must_use]
    pub const fn circumference(&self) -> f32 {
        self.circumference
    }

    /// Blank length inserted after each arc.
    #[must_use]
    pub const fn gap_length(&self) -> f32 {
        self.gap_length
    }
}

/// Places the segments' arcs consecutively around the ring.
///
/// Arcs start at the top of the circle and proceed clockwise in sequence
/// order; each segment's span covers its share of the total weight, with the
/// visible arc shortened by one gap length. Individual zero weights are
/// legal and produce zero-length arcs.
///
/// # Errors
///
/// Fails with [`LayoutError::EmptySegments`] for an empty sequence and
/// [`LayoutError::NonPositiveTotalWeight`] when the weights sum to zero or
/// less (or to a non-finite value), so no division by zero can occur.
pub fn compute_ring_layout(
    segments: &[Segment],
    dimensions: &RingDimensions,
) -> Result<RingLayout, LayoutError> {
    if segments.is_empty() {
        return Err(LayoutError::EmptySegments);
    }

    let total = total_weight(segments);
    if !(total > 0.0) || !total.is_finite() {
        return Err(LayoutError::NonPositiveTotalWeight { total });
    }

    let circumference = dimensions.circumference();
    let gap_length = dimensions.gap_length();

    let mut arcs = Vec::with_capacity(segments.len());
    let mut cursor_offset = 0.0_f32;
    let mut cursor_angle = 0.0_f32;

    for segment in segments {
        let ratio = segment.weight() / total;
        let span_length = circumference * ratio;
        let arc_length = (span_length - gap_length).max(0.0);
        let start_angle = cursor_angle;
        let end_angle = cursor_angle + ratio * FULL_TURN_DEGREES;
        let sweep_angle = arc_length / circumference * FULL_TURN_DEGREES;

        arcs.push(SegmentArc {
            arc_length,
            start_offset: cursor_offset,
            start_angle,
            end_angle,
            sweep_angle,
        });

        cursor_offset += span_length;
        cursor_angle = end_angle;
    }

    Ok(RingLayout {
        arcs,
        circumference,
        gap_length,
    })
}

/// Maps a ring-frame angle to a Cartesian point on a circle.
///
/// `angular_position(0.0, r, c)` is the top of the ring; `90.0` is a quarter
/// turn clockwise from the top. Every angle→point conversion in the widget
/// goes through this function.
#[must_use]
pub fn angular_position(angle_degrees: f32, radius: f32, center: Vec2) -> Vec2 {
    let radians = (angle_degrees + RING_FRAME_ROTATION_DEGREES).to_radians();
    center + radius * Vec2::new(radians.cos(), radians.sin())
}

/// Ring-frame angle of the pointer dot for the provided score.
///
/// The score is deliberately not clamped: values outside `[0, max_score]`
/// place the pointer beyond or before the ring start. A non-positive or
/// non-finite maximum (or a non-finite score) degenerates to 0° so NaN
/// never propagates into drawing.
#[must_use]
pub fn pointer_angle(input: &ScoreInput) -> f32 {
    let max_score = input.max_score();
    if !(max_score > 0.0) || !max_score.is_finite() || !input.score().is_finite() {
        return 0.0;
    }

    input.score() / max_score * FULL_TURN_DEGREES
}

/// Anchor point for a segment's label and the outer end of its connector.
///
/// Same trigonometric mapping as [`angular_position`], evaluated at a radius
/// beyond the ring's outer edge.
#[must_use]
pub fn label_anchor(midpoint_angle: f32, label_radius: f32, center: Vec2) -> Vec2 {
    angular_position(midpoint_angle, label_radius, center)
}

/// Errors reported when a layout cannot be computed from its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// The segment sequence was empty.
    EmptySegments,
    /// The segment weights summed to zero or less.
    NonPositiveTotalWeight {
        /// Total weight that failed validation.
        total: f32,
    },
    /// The normalized radius was zero or negative.
    NonPositiveRadius {
        /// Radius value that failed validation.
        radius: f32,
    },
    /// The gap fraction was outside `[0, 1)`.
    InvalidGapFraction {
        /// Provided gap fraction that failed validation.
        gap_fraction: f32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegments => write!(f, "segment sequence must not be empty"),
            Self::NonPositiveTotalWeight { total } => {
                write!(f, "total segment weight must be positive (received {total})")
            }
            Self::NonPositiveRadius { radius } => {
                write!(f, "normalized ring radius must be positive (received {radius})")
            }
            Self::InvalidGapFraction { gap_fraction } => {
                write!(f, "gap fraction must lie in [0, 1) (received {gap_fraction})")
            }
        }
    }
}

impl Error for LayoutError {}
