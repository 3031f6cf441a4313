#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Ring Gauge widget.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments. To
//! keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; the gauge plays no sound anyway.
//!
//! The adapter polls the window size every frame (its stand-in for a resize
//! observer), recomposes the gauge frame from scratch, and projects the
//! resulting primitives into macroquad draw calls. Arcs are tessellated into
//! short line segments through the layout system's angular mapping so every
//! visual element shares one angle→point conversion.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use ring_gauge_rendering::{
    Color, GaugeFrame, LabelAlignment, LabelPrimitive, PointerPrimitive, Presentation,
    ReadoutPrimitive, RenderingBackend, Reveal, ViewportSize,
};
use ring_gauge_system_layout::angular_position;
use std::time::Duration;

/// Maximum angular step of one tessellated arc chord, in degrees.
const ARC_STEP_DEGREES: f32 = 4.0;

/// Dash and gap lengths of the pointer connector, in pixels.
const CONNECTOR_DASH: f32 = 5.0;
const CONNECTOR_GAP: f32 = 3.0;

/// Snapshot of edge-triggered keyboard shortcuts observed during a frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the render loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, dt: Duration) -> Option<f32> {
        self.elapsed += dt;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            None
        } else {
            Some(self.frames as f32 / seconds)
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        per_second
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_size: (i32, i32),
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_size: (420, 420),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width, height);
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, ViewportSize, &mut ring_gauge_rendering::GaugeScene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_size,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.0,
            window_height: window_size.1,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut reveal = Reveal::new(scene.options.animate_on_visible);
            let mut fps_counter = FpsCounter::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let viewport = ViewportSize::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                // The gauge counts as "entered view" on the first frame it
                // occupies a drawable viewport; the latch never resets.
                if viewport.has_area() {
                    reveal.mark_visible();
                }
                reveal.advance(frame_dt);

                update_scene(frame_dt, viewport, &mut scene);

                // Recomposed every frame, so a resize or score change can
                // never leave stale geometry on screen. Degenerate and
                // structurally invalid inputs draw nothing.
                if let Ok(frame) = GaugeFrame::compose(&scene, viewport, reveal.progress()) {
                    draw_gauge(&frame);
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_gauge(frame: &GaugeFrame) {
    let sizing = frame.sizing();
    let radius = frame.ring_radius();

    for arc in frame.arcs() {
        draw_arc_stroke(
            sizing.center,
            radius,
            arc.start_angle,
            arc.sweep_angle,
            sizing.stroke_width,
            arc.color,
        );
    }

    draw_pointer(frame.pointer());
    draw_readout(frame.readout(), radius);

    for label in frame.labels() {
        draw_label(label, sizing.stroke_width);
    }
}

fn draw_arc_stroke(
    center: Vec2,
    radius: f32,
    start_angle: f32,
    sweep_angle: f32,
    stroke_width: f32,
    color: Color,
) {
    if sweep_angle <= f32::EPSILON || radius <= f32::EPSILON {
        return;
    }

    let points = arc_polyline(center, radius, start_angle, sweep_angle);
    let stroke = to_macroquad_color(color);
    let cap_radius = stroke_width / 2.0;

    for pair in points.windows(2) {
        macroquad::shapes::draw_line(
            pair[0].x,
            pair[0].y,
            pair[1].x,
            pair[1].y,
            stroke_width,
            stroke,
        );
    }

    // Round end caps, matching the stroke centered on the arc.
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        macroquad::shapes::draw_circle(first.x, first.y, cap_radius, stroke);
        macroquad::shapes::draw_circle(last.x, last.y, cap_radius, stroke);
    }
}

fn draw_pointer(pointer: PointerPrimitive) {
    let connector = to_macroquad_color(pointer.connector_color);

    for (from, to) in dash_segments(
        pointer.connector_from,
        pointer.connector_to,
        CONNECTOR_DASH,
        CONNECTOR_GAP,
    ) {
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, 2.0, connector);
    }

    let dot = to_macroquad_color(pointer.color);
    macroquad::shapes::draw_circle(pointer.dot.x, pointer.dot.y, pointer.dot_radius, dot);
}

fn draw_readout(readout: &ReadoutPrimitive, radius: f32) {
    let title_size = (radius * 0.14).max(12.0);
    let score_size = (radius * 0.45).max(16.0);

    let title = measure(&readout.title, title_size);
    macroquad::text::draw_text(
        &readout.title,
        readout.center.x - title.width / 2.0,
        readout.center.y - score_size * 0.5,
        title_size,
        to_macroquad_color(readout.title_color),
    );

    let score = measure(&readout.score_text, score_size);
    macroquad::text::draw_text(
        &readout.score_text,
        readout.center.x - score.width / 2.0,
        readout.center.y + score_size * 0.5,
        score_size,
        to_macroquad_color(readout.color),
    );
}

fn draw_label(label: &LabelPrimitive, stroke_width: f32) {
    let color = to_macroquad_color(label.color);

    macroquad::shapes::draw_line(
        label.connector_inner.x,
        label.connector_inner.y,
        label.anchor.x,
        label.anchor.y,
        1.0,
        color,
    );

    let text_size = (stroke_width * 0.6).max(12.0);
    let value_text = format_weight(label.value);
    let text = measure(&label.text, text_size);
    let value = measure(&value_text, text_size);

    let text_x = aligned_x(label.anchor.x, text.width, label.alignment);
    let value_x = aligned_x(label.anchor.x, value.width, label.alignment);

    macroquad::text::draw_text(&label.text, text_x, label.anchor.y, text_size, color);
    macroquad::text::draw_text(
        &value_text,
        value_x,
        label.anchor.y + text_size * 1.1,
        text_size,
        to_macroquad_color(label.value_color),
    );
}

fn aligned_x(anchor_x: f32, width: f32, alignment: LabelAlignment) -> f32 {
    match alignment {
        LabelAlignment::Left => anchor_x,
        LabelAlignment::Center => anchor_x - width / 2.0,
        LabelAlignment::Right => anchor_x - width,
    }
}

fn measure(text: &str, font_size: f32) -> macroquad::text::TextDimensions {
    macroquad::text::measure_text(text, None, font_size as u16, 1.0)
}

fn format_weight(value: f32) -> String {
    if (value - value.round()).abs() < 1e-3 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Tessellates an arc into a clockwise polyline of chord endpoints.
///
/// Every point goes through the layout system's angular mapping so the arc
/// stays aligned with the pointer and labels.
#[doc(hidden)]
#[must_use]
pub fn arc_polyline(center: Vec2, radius: f32, start_angle: f32, sweep_angle: f32) -> Vec<Vec2> {
    if sweep_angle <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let steps = (sweep_angle / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 1);
    for step in 0..=steps {
        let angle = start_angle + sweep_angle * step as f32 / steps as f32;
        points.push(angular_position(angle, radius, center));
    }

    points
}

/// Splits a straight line into dash segments separated by gaps.
#[doc(hidden)]
#[must_use]
pub fn dash_segments(from: Vec2, to: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON || dash <= f32::EPSILON {
        return Vec::new();
    }

    let direction = delta / length;
    let period = dash + gap.max(0.0);
    let mut segments = Vec::new();
    let mut cursor = 0.0;

    while cursor < length {
        let end = (cursor + dash).min(length);
        segments.push((from + direction * cursor, from + direction * end));
        cursor += period;
    }

    segments
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
