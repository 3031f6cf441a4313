#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Ring Gauge backends.
//!
//! Hosts describe the gauge declaratively as a [`GaugeScene`]; backends hand
//! the scene plus the current [`ViewportSize`] to [`GaugeFrame::compose`]
//! (see [`frame`]) each frame and draw the resulting primitives. The layout
//! system is invoked exactly once per composition, so no frame can ever mix
//! geometry from two different input states.

mod frame;
mod reveal;

pub use frame::{
    ArcPrimitive, FrameError, GaugeFrame, GaugeSizing, LabelAlignment, LabelPrimitive,
    PointerPrimitive, ReadoutPrimitive, ResolvedSizing,
};
pub use reveal::Reveal;

use anyhow::Result as AnyResult;
use ring_gauge_core::{GaugeOptions, ScoreInput, Segment, SegmentColor};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<SegmentColor> for Color {
    fn from(color: SegmentColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Size of the hosting viewport observed by a backend for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ViewportSize {
    width: f32,
    height: f32,
}

impl ViewportSize {
    /// Creates a new viewport size from width and height in pixels.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the viewport.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the viewport.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Shorter of the two viewport extents; proportional sizing scales
    /// against this so the ring always fits.
    #[must_use]
    pub fn min_extent(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Reports whether the viewport encloses a drawable area.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > f32::EPSILON && self.height > f32::EPSILON
    }
}

/// Theme colors applied to the gauge's non-segment elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeStyle {
    /// Fill of the pointer dot.
    pub pointer_color: Color,
    /// Dashed line from the ring center to the pointer dot.
    pub connector_color: Color,
    /// Center score readout text.
    pub readout_color: Color,
    /// Title text above the gauge.
    pub title_color: Color,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            pointer_color: Color::from_rgb_u8(0x54, 0xd8, 0xff),
            connector_color: Color::from_rgb_u8(0x54, 0xd8, 0xff),
            readout_color: Color::new(1.0, 1.0, 1.0, 1.0),
            title_color: Color::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Declarative gauge description consumed by rendering backends.
///
/// The scene carries inputs, never derived geometry; backends recompose the
/// frame from current values whenever the scene or the viewport changes.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeScene {
    /// Heading shown above the center readout.
    pub title: String,
    /// Weighted categories placed clockwise from the top, in order.
    pub segments: Vec<Segment>,
    /// Score shown in the readout and tracked by the pointer.
    pub score: ScoreInput,
    /// Behavioral switches (responsive sizing, entrance animation).
    pub options: GaugeOptions,
    /// Theme applied to non-segment elements.
    pub style: GaugeStyle,
    /// Ring sizing strategy resolved against the viewport each frame.
    pub sizing: GaugeSizing,
}

impl GaugeScene {
    /// Creates a scene with the default style and a sizing strategy derived
    /// from the scene's options.
    #[must_use]
    pub fn new<T>(title: T, segments: Vec<Segment>, score: ScoreInput, options: GaugeOptions) -> Self
    where
        T: Into<String>,
    {
        let sizing = if options.responsive {
            GaugeSizing::proportional()
        } else {
            GaugeSizing::fixed()
        };

        Self {
            title: title.into(),
            segments,
            score,
            options,
            style: GaugeStyle::default(),
            sizing,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Gauge that should be displayed.
    pub scene: GaugeScene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: GaugeScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting a Ring Gauge scene.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// viewport size observed for the frame, and may mutate the scene before
    /// it is composed, allowing hosts to feed in new scores or weights over
    /// time. The viewport is passed explicitly so scene updates never need
    /// to reach for ambient environment state.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, ViewportSize, &mut GaugeScene) + 'static;
}
