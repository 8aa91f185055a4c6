//! Gesture interpreter: turns per-frame landmarks into pinch, hover and
//! pointer readings.
//!
//! The interpreter is the pinch state machine:
//!
//! ```text
//! IDLE ──(pinch rising edge, thumb extended)──▶ CLICK_DOWN ──(debounce expires)──▶ IDLE
//! ```
//!
//! A click-down fires only on the rising edge of the pinch, and a click window
//! stays open for the debounce period no matter how long the fingers remain
//! together. A rising edge that arrives while the window is still open is held
//! back and fires on the first frame after the window closes, provided the
//! pinch is still held. Routing happens elsewhere ([`crate::router`]) on the
//! click-down frame; the engine then calls [`Interpreter::consume`] so one
//! click drives at most one action.

#[cfg(test)]
#[path = "interpreter_test.rs"]
mod interpreter_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Viewport};
use crate::consts::{
    BUTTON_MARGIN_PX, BUTTON_RADIUS_PX, PINCH_DEBOUNCE_MS, PINCH_THRESHOLD, REPEAT_GUARD_MS, THUMB_EXTENSION_MIN,
};
use crate::landmark::LandmarkSet;
use crate::timer::Cooldown;

/// Tunable thresholds for gesture recognition.
///
/// `Default` reproduces the stock constants in [`crate::consts`]. Missing
/// fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-to-index distance below which the hand is pinching.
    pub pinch_threshold: f64,
    /// Only recognise a pinch while the thumb is extended away from the wrist.
    pub require_thumb_extension: bool,
    /// Thumb-to-wrist distance the thumb must exceed when the gate is on.
    pub thumb_extension_min: f64,
    /// Radius of the virtual button in overlay pixels.
    pub button_radius_px: f64,
    /// Offset of the button center from the top-left overlay corner.
    pub button_margin_px: f64,
    /// Length of the click window opened by one pinch.
    pub pinch_debounce_ms: f64,
    /// Minimum spacing between two button toggles.
    pub repeat_guard_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: PINCH_THRESHOLD,
            require_thumb_extension: true,
            thumb_extension_min: THUMB_EXTENSION_MIN,
            button_radius_px: BUTTON_RADIUS_PX,
            button_margin_px: BUTTON_MARGIN_PX,
            pinch_debounce_ms: PINCH_DEBOUNCE_MS,
            repeat_guard_ms: REPEAT_GUARD_MS,
        }
    }
}

impl GestureConfig {
    /// Center of the virtual button in overlay pixels.
    #[must_use]
    pub fn button_center(&self) -> Point {
        Point::new(self.button_margin_px, self.button_margin_px)
    }
}

/// Continuous steering output derived from the index tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    /// Index tip x, clamped to `[0, 1]`.
    pub x: f64,
    /// Index tip y, clamped to `[0, 1]`.
    pub y: f64,
    /// Horizontal angle in `[-π/2, π/2]`, drives rotation about the y axis.
    pub yaw: f64,
    /// Vertical angle in `[-π/2, π/2]`, drives rotation about the x axis.
    pub pitch: f64,
}

impl Pointer {
    /// Map a normalized position to steering angles.
    #[must_use]
    pub fn from_normalized(x: f64, y: f64) -> Self {
        let x = x.clamp(0.0, 1.0);
        let y = y.clamp(0.0, 1.0);
        Self { x, y, yaw: (x - 0.5) * PI, pitch: (y - 0.5) * PI }
    }
}

/// Everything the interpreter learned from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    /// Steering output; `None` when no hand was seen.
    pub pointer: Option<Pointer>,
    /// Index tip in overlay pixels, for drawing the fingertip marker.
    pub index_px: Option<Point>,
    /// The index tip is over the virtual button.
    pub hovered: bool,
    /// A click-down edge happened on this frame.
    pub click_down: bool,
    /// A click window is open and nothing has consumed it yet.
    pub click_pending: bool,
    /// Raw thumb-to-index distance, when a hand was seen.
    pub pinch_distance: Option<f64>,
}

/// Pinch lifecycle as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickPhase {
    /// No click window is open.
    Idle,
    /// A click window opened at `since` and has not expired yet.
    Down { since: f64 },
}

/// Mutable per-hand state carried between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// The pinch condition held on the previous frame (for edge detection).
    pub pinch_held: bool,
    /// The click window opened by the last rising edge.
    pub click: Cooldown,
    /// The current click window has already driven an action.
    pub consumed: bool,
    /// The index tip was over the button on the last frame.
    pub hovered: bool,
}

impl GestureState {
    fn new(debounce_ms: f64) -> Self {
        Self { pinch_held: false, click: Cooldown::new(debounce_ms), consumed: false, hovered: false }
    }
}

/// The per-frame gesture state machine.
#[derive(Debug, Clone)]
pub struct Interpreter {
    config: GestureConfig,
    state: GestureState,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl Interpreter {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config, state: GestureState::new(config.pinch_debounce_ms) }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Current click phase at `now`.
    #[must_use]
    pub fn phase(&self, now: f64) -> ClickPhase {
        match self.state.click.started_at() {
            Some(since) if self.state.click.is_active(now) => ClickPhase::Down { since },
            _ => ClickPhase::Idle,
        }
    }

    /// Process one frame.
    ///
    /// `hand` is `None` when the tracker saw no hand (or delivered malformed
    /// data). A missing hand clears hover and the raw pinch level, so a hand
    /// that reappears already pinched counts as a fresh rising edge. An open
    /// click window keeps ageing on its own timestamp.
    pub fn process(&mut self, hand: Option<&LandmarkSet>, now: f64, overlay: Viewport) -> GestureFrame {
        self.expire(now);

        let Some(hand) = hand else {
            self.state.pinch_held = false;
            self.state.hovered = false;
            return GestureFrame {
                pointer: None,
                index_px: None,
                hovered: false,
                click_down: false,
                click_pending: self.click_pending(now),
                pinch_distance: None,
            };
        };

        let distance = hand.pinch_distance();
        let extended = !self.config.require_thumb_extension || hand.thumb_extension() > self.config.thumb_extension_min;
        let held = distance < self.config.pinch_threshold && extended;

        let rising = held && !self.state.pinch_held;
        let click_down = rising && !self.state.click.is_active(now);
        // An edge blocked by the open window stays unlatched so it fires once the window closes.
        if !rising || click_down {
            self.state.pinch_held = held;
        }
        if click_down {
            tracing::debug!(distance, now, "pinch click-down");
            self.state.click.start(now);
            self.state.consumed = false;
        }

        let tip = hand.index_tip();
        let index_px = Point::new(tip.x * overlay.width, tip.y * overlay.height);
        self.state.hovered = index_px.distance(self.config.button_center()) < self.config.button_radius_px;

        GestureFrame {
            pointer: Some(Pointer::from_normalized(tip.x, tip.y)),
            index_px: Some(index_px),
            hovered: self.state.hovered,
            click_down,
            click_pending: self.click_pending(now),
            pinch_distance: Some(distance),
        }
    }

    /// Mark the open click window as used.
    pub fn consume(&mut self) {
        self.state.consumed = true;
    }

    fn click_pending(&self, now: f64) -> bool {
        self.state.click.is_active(now) && !self.state.consumed
    }

    /// Close an expired click window and reset its consumed flag.
    fn expire(&mut self, now: f64) {
        if self.state.click.started_at().is_some() && !self.state.click.is_active(now) {
            tracing::debug!(now, "click window expired");
            self.state.click.clear();
            self.state.consumed = false;
        }
    }
}
