//! One-shot entrance transition for the gauge.

use std::time::Duration;

/// How long the entrance sweep takes once the gauge becomes visible.
const REVEAL_DURATION: Duration = Duration::from_millis(900);

/// Tracks the gauge's one-shot "entered view" state.
///
/// Backends latch visibility with [`Reveal::mark_visible`] the first time
/// the gauge occupies a drawable viewport, then feed frame deltas through
/// [`Reveal::advance`]. Once latched, visibility never resets for the
/// lifetime of the widget, and progress only moves forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    animate: bool,
    visible: bool,
    elapsed: Duration,
}

impl Reveal {
    /// Creates the reveal state. When `animate` is `false` the gauge is
    /// treated as fully revealed from the first frame.
    #[must_use]
    pub const fn new(animate: bool) -> Self {
        Self {
            animate,
            visible: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Latches the one-shot visibility flag. Idempotent.
    pub fn mark_visible(&mut self) {
        self.visible = true;
    }

    /// Whether the gauge has ever been visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Accumulates frame time toward the entrance sweep. Has no effect
    /// before the gauge becomes visible or after the sweep completes.
    pub fn advance(&mut self, dt: Duration) {
        if !self.animate || !self.visible || self.is_complete() {
            return;
        }

        self.elapsed = (self.elapsed + dt).min(REVEAL_DURATION);
    }

    /// Entrance progress in `[0, 1]` with an ease-out curve.
    ///
    /// Always 1.0 when animation is disabled; 0.0 until the gauge becomes
    /// visible; monotonically non-decreasing afterwards.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if !self.animate {
            return 1.0;
        }
        if !self.visible {
            return 0.0;
        }

        let linear = self.elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32();
        ease_out_cubic(linear.clamp(0.0, 1.0))
    }

    /// Whether the entrance sweep has finished (trivially true when
    /// animation is disabled).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.animate || self.elapsed >= REVEAL_DURATION
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let inverse = 1.0 - t;
    1.0 - inverse * inverse * inverse
}
