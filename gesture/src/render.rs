//! Rendering: draws the gesture overlay on top of the webcam video.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the last gesture frame and produces
//! pixels. It does not mutate any application state. Colors are chosen by
//! [`ButtonStyle`], which is plain data and testable without a browser.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render_overlay`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Point, Viewport};
use crate::interpreter::{GestureConfig, GestureFrame};

/// Radius of the dot marking the button center, in pixels.
const BUTTON_DOT_RADIUS: f64 = 8.0;

/// Radius of the index fingertip marker, in pixels.
const INDEX_MARKER_RADIUS: f64 = 10.0;

/// Ring stroke width, in pixels.
const BUTTON_LINE_WIDTH: f64 = 3.0;

/// Two-state color scheme for the gesture button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub dot: &'static str,
    pub marker: &'static str,
}

impl ButtonStyle {
    pub const IDLE: ButtonStyle = ButtonStyle {
        fill: "rgba(22, 163, 74, 0.18)",
        stroke: "#22c55e",
        dot: "#22c55e",
        marker: "#38bdf8",
    };

    pub const HOVER: ButtonStyle = ButtonStyle {
        fill: "rgba(250, 204, 21, 0.25)",
        stroke: "#facc15",
        dot: "#facc15",
        marker: "#fbbf24",
    };

    #[must_use]
    pub fn for_hover(hovered: bool) -> Self {
        if hovered { Self::HOVER } else { Self::IDLE }
    }
}

/// Draw the overlay for `frame`.
///
/// The canvas is cleared every call; with no hand in view nothing else is drawn.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    config: &GestureConfig,
    overlay: Viewport,
    frame: Option<&GestureFrame>,
) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, overlay.width, overlay.height);

    let Some(frame) = frame else {
        return Ok(());
    };
    let Some(index_px) = frame.index_px else {
        return Ok(());
    };

    let style = ButtonStyle::for_hover(frame.hovered);
    let center = config.button_center();

    // Button ring.
    circle(ctx, center, config.button_radius_px)?;
    ctx.set_fill_style_str(style.fill);
    ctx.set_stroke_style_str(style.stroke);
    ctx.set_line_width(BUTTON_LINE_WIDTH);
    ctx.fill();
    ctx.stroke();

    // Center dot.
    circle(ctx, center, BUTTON_DOT_RADIUS)?;
    ctx.set_fill_style_str(style.dot);
    ctx.fill();

    // Fingertip.
    circle(ctx, index_px, INDEX_MARKER_RADIUS)?;
    ctx.set_fill_style_str(style.marker);
    ctx.fill();

    Ok(())
}

fn circle(ctx: &CanvasRenderingContext2d, at: Point, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(at.x, at.y, radius, 0.0, TAU)
}
