//! Per-frame composition of the gauge into drawable primitives.
//!
//! [`GaugeFrame::compose`] is the render shell's only path from inputs to
//! visuals: it resolves the sizing strategy against the viewport, invokes
//! the layout system once, and projects the result into primitives carrying
//! nothing but screen-space coordinates and colors. Backends stay free of
//! geometry decisions.

use std::{error::Error, fmt};

use glam::Vec2;
use ring_gauge_system_layout::{
    angular_position, compute_ring_layout, label_anchor, pointer_angle, LayoutError,
    RingDimensions,
};

use crate::{Color, GaugeScene, ViewportSize};

/// Reference viewport extent the fixed dimensions were designed against.
const REFERENCE_EXTENT: f32 = 350.0;
/// Ring radius at the reference extent.
const REFERENCE_RADIUS: f32 = 150.0;
/// Stroke width at the reference extent.
const REFERENCE_STROKE_WIDTH: f32 = 35.0;
/// Distance from the ring's outer edge to the label anchors at the
/// reference extent.
const REFERENCE_LABEL_OFFSET: f32 = 40.0;
/// Fraction of the circumference left blank between consecutive arcs.
const DEFAULT_GAP_FRACTION: f32 = 0.04;
/// Pointer dot radius as a fraction of the ring radius.
const POINTER_DOT_FRACTION: f32 = 0.04;
/// Horizontal band around the center, as a fraction of the radius, within
/// which labels stay center-aligned.
const CENTER_ALIGNMENT_BAND: f32 = 0.25;

/// Strategy deciding the ring's dimensions for a given viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GaugeSizing {
    /// Fixed pixel dimensions regardless of viewport size.
    Fixed {
        /// Nominal ring radius in pixels.
        radius: f32,
        /// Stroke width in pixels.
        stroke_width: f32,
        /// Distance from the ring's outer edge to the label anchors.
        label_offset: f32,
    },
    /// Dimensions expressed as fractions of the viewport's shorter extent,
    /// so the whole gauge scales with its container.
    Proportional {
        /// Ring radius as a fraction of the minimum extent.
        radius_fraction: f32,
        /// Stroke width as a fraction of the minimum extent.
        stroke_fraction: f32,
        /// Label offset as a fraction of the minimum extent.
        label_offset_fraction: f32,
    },
}

impl GaugeSizing {
    /// Fixed sizing using the reference dimensions (radius 150, stroke 35).
    #[must_use]
    pub const fn fixed() -> Self {
        Self::Fixed {
            radius: REFERENCE_RADIUS,
            stroke_width: REFERENCE_STROKE_WIDTH,
            label_offset: REFERENCE_LABEL_OFFSET,
        }
    }

    /// Proportional sizing preserving the reference proportions: the ring
    /// fills the same share of any viewport that it fills of a 350px one.
    #[must_use]
    pub const fn proportional() -> Self {
        Self::Proportional {
            radius_fraction: REFERENCE_RADIUS / REFERENCE_EXTENT,
            stroke_fraction: REFERENCE_STROKE_WIDTH / REFERENCE_EXTENT,
            label_offset_fraction: REFERENCE_LABEL_OFFSET / REFERENCE_EXTENT,
        }
    }

    /// Resolves the strategy against the observed viewport.
    ///
    /// The gauge is always centered in the viewport. A zero-area viewport
    /// resolves to zero-radius dimensions, which composition reports as a
    /// degenerate frame rather than attempting to divide by zero.
    #[must_use]
    pub fn resolve(&self, viewport: ViewportSize) -> ResolvedSizing {
        let center = Vec2::new(viewport.width() / 2.0, viewport.height() / 2.0);

        match *self {
            Self::Fixed {
                radius,
                stroke_width,
                label_offset,
            } => ResolvedSizing {
                radius,
                stroke_width,
                label_offset,
                center,
            },
            Self::Proportional {
                radius_fraction,
                stroke_fraction,
                label_offset_fraction,
            } => {
                let extent = viewport.min_extent().max(0.0);
                ResolvedSizing {
                    radius: extent * radius_fraction,
                    stroke_width: extent * stroke_fraction,
                    label_offset: extent * label_offset_fraction,
                    center,
                }
            }
        }
    }
}

/// Concrete pixel dimensions for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSizing {
    /// Nominal ring radius.
    pub radius: f32,
    /// Stroke width of the arcs.
    pub stroke_width: f32,
    /// Distance from the ring's outer edge to the label anchors.
    pub label_offset: f32,
    /// Center of the ring in viewport coordinates.
    pub center: Vec2,
}

impl ResolvedSizing {
    /// Reports whether the dimensions are too small to draw.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius - self.stroke_width / 2.0 <= f32::EPSILON
    }
}

/// One stroked arc of the ring, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPrimitive {
    /// Ring-frame angle where the visible arc begins.
    pub start_angle: f32,
    /// Degrees swept clockwise by the visible arc.
    pub sweep_angle: f32,
    /// Stroke color of the arc.
    pub color: Color,
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlignment {
    /// Text begins at the anchor (labels right of the ring).
    Left,
    /// Text is centered on the anchor (labels above or below the ring).
    Center,
    /// Text ends at the anchor (labels left of the ring).
    Right,
}

/// Segment label with its connector line, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPrimitive {
    /// Display text of the segment.
    pub text: String,
    /// Weight value shown beneath the text.
    pub value: f32,
    /// Anchor point beyond the ring's outer edge.
    pub anchor: Vec2,
    /// Inner endpoint of the connector line, on the ring's outer edge.
    pub connector_inner: Vec2,
    /// Horizontal alignment relative to the anchor.
    pub alignment: LabelAlignment,
    /// Color shared by the label text and its connector.
    pub color: Color,
    /// Lightened variant used for the weight value line.
    pub value_color: Color,
}

/// Pointer dot plus its dashed connector from the ring center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPrimitive {
    /// Center of the pointer dot, on the normalized circle.
    pub dot: Vec2,
    /// Radius of the pointer dot.
    pub dot_radius: f32,
    /// Inner endpoint of the dashed connector (the ring center).
    pub connector_from: Vec2,
    /// Outer endpoint of the dashed connector (the dot).
    pub connector_to: Vec2,
    /// Fill of the dot.
    pub color: Color,
    /// Stroke of the dashed connector.
    pub connector_color: Color,
}

/// Center readout of the numeric score.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadoutPrimitive {
    /// Heading shown above the score.
    pub title: String,
    /// Score formatted for display.
    pub score_text: String,
    /// Center of the readout, equal to the ring center.
    pub center: Vec2,
    /// Score text color.
    pub color: Color,
    /// Title text color.
    pub title_color: Color,
}

/// Fully composed gauge for one frame.
///
/// Owned solely by the render pass that produced it; recomposed from
/// scratch on every input or viewport change.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeFrame {
    sizing: ResolvedSizing,
    arcs: Vec<ArcPrimitive>,
    labels: Vec<LabelPrimitive>,
    pointer: PointerPrimitive,
    readout: ReadoutPrimitive,
    reveal: f32,
}

impl GaugeFrame {
    /// Composes the scene into drawable primitives for the given viewport.
    ///
    /// Invokes the layout system exactly once. `reveal` in `[0, 1]` scales
    /// the arc sweeps and the pointer sweep for the entrance transition; a
    /// fully revealed gauge passes 1.0.
    ///
    /// # Errors
    ///
    /// [`FrameError::DegenerateViewport`] when the viewport (or the resolved
    /// ring) has no drawable area, and [`FrameError::Layout`] when the
    /// segment inputs are structurally invalid. Callers should render
    /// nothing in either case rather than fail the frame loop.
    pub fn compose(
        scene: &GaugeScene,
        viewport: ViewportSize,
        reveal: f32,
    ) -> Result<Self, FrameError> {
        if !viewport.has_area() {
            return Err(FrameError::DegenerateViewport {
                width: viewport.width(),
                height: viewport.height(),
            });
        }

        let sizing = scene.sizing.resolve(viewport);
        if sizing.is_degenerate() {
            return Err(FrameError::DegenerateViewport {
                width: viewport.width(),
                height: viewport.height(),
            });
        }

        let dimensions =
            RingDimensions::new(sizing.radius, sizing.stroke_width, DEFAULT_GAP_FRACTION)
                .map_err(FrameError::Layout)?;
        let layout = compute_ring_layout(&scene.segments, &dimensions).map_err(FrameError::Layout)?;

        let reveal = reveal.clamp(0.0, 1.0);
        let center = sizing.center;
        let ring_radius = dimensions.normalized_radius();
        let outer_radius = dimensions.outer_radius();
        let label_radius = outer_radius + sizing.label_offset;

        let arcs = layout
            .arcs()
            .iter()
            .zip(&scene.segments)
            .map(|(arc, segment)| ArcPrimitive {
                start_angle: arc.start_angle(),
                sweep_angle: arc.sweep_angle() * reveal,
                color: Color::from(segment.color()),
            })
            .collect();

        let labels = layout
            .arcs()
            .iter()
            .zip(&scene.segments)
            .map(|(arc, segment)| {
                let midpoint = arc.midpoint_angle();
                let anchor = label_anchor(midpoint, label_radius, center);
                let color = Color::from(segment.color());
                LabelPrimitive {
                    text: segment.label().to_owned(),
                    value: segment.weight(),
                    anchor,
                    connector_inner: angular_position(midpoint, outer_radius, center),
                    alignment: alignment_for(anchor, center, ring_radius),
                    color: color.with_alpha(reveal),
                    value_color: color.lighten(0.35).with_alpha(reveal),
                }
            })
            .collect();

        let angle = pointer_angle(&scene.score) * reveal;
        let dot = angular_position(angle, ring_radius, center);
        let pointer = PointerPrimitive {
            dot,
            dot_radius: ring_radius * POINTER_DOT_FRACTION,
            connector_from: center,
            connector_to: dot,
            color: scene.style.pointer_color,
            connector_color: scene.style.connector_color,
        };

        let readout = ReadoutPrimitive {
            title: scene.title.clone(),
            score_text: format_score(scene.score.score()),
            center,
            color: scene.style.readout_color.with_alpha(reveal),
            title_color: scene.style.title_color.with_alpha(reveal),
        };

        Ok(Self {
            sizing,
            arcs,
            labels,
            pointer,
            readout,
            reveal,
        })
    }

    /// Resolved dimensions the frame was composed at.
    #[must_use]
    pub const fn sizing(&self) -> ResolvedSizing {
        self.sizing
    }

    /// Stroked arcs in segment order.
    #[must_use]
    pub fn arcs(&self) -> &[ArcPrimitive] {
        &self.arcs
    }

    /// Segment labels with their connectors, in segment order.
    #[must_use]
    pub fn labels(&self) -> &[LabelPrimitive] {
        &self.labels
    }

    /// Pointer dot and its dashed connector.
    #[must_use]
    pub const fn pointer(&self) -> PointerPrimitive {
        self.pointer
    }

    /// Center readout of the score.
    #[must_use]
    pub const fn readout(&self) -> &ReadoutPrimitive {
        &self.readout
    }

    /// Entrance-transition progress the frame was composed with.
    #[must_use]
    pub const fn reveal(&self) -> f32 {
        self.reveal
    }

    /// Radius of the circle the arc strokes are centered on.
    #[must_use]
    pub fn ring_radius(&self) -> f32 {
        self.sizing.radius - self.sizing.stroke_width / 2.0
    }
}

fn alignment_for(anchor: Vec2, center: Vec2, radius: f32) -> LabelAlignment {
    let horizontal = anchor.x - center.x;
    if horizontal.abs() <= radius * CENTER_ALIGNMENT_BAND {
        LabelAlignment::Center
    } else if horizontal > 0.0 {
        LabelAlignment::Left
    } else {
        LabelAlignment::Right
    }
}

fn format_score(score: f32) -> String {
    if (score - score.round()).abs() < 1e-3 {
        format!("{}", score.round() as i64)
    } else {
        format!("{score:.1}")
    }
}

/// Errors reported when a frame cannot be composed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameError {
    /// The viewport or the resolved ring has no drawable area.
    DegenerateViewport {
        /// Observed viewport width.
        width: f32,
        /// Observed viewport height.
        height: f32,
    },
    /// The gauge inputs were structurally invalid.
    Layout(LayoutError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateViewport { width, height } => {
                write!(f, "viewport {width}x{height} has no drawable area")
            }
            Self::Layout(error) => write!(f, "gauge layout failed: {error}"),
        }
    }
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(error) => Some(error),
            Self::DegenerateViewport { .. } => None,
        }
    }
}
