//! Synthetic sessions: a hand that hovers over the gesture button, pinches
//! for a while, then lets go.

#[cfg(test)]
#[path = "synth_test.rs"]
mod synth_test;

use gesture::camera::Viewport;
use gesture::consts::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST};
use gesture::interpreter::GestureConfig;
use gesture::landmark::Landmark;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::HarnessError;
use crate::session::{EventRecord, FrameRecord, Record, SessionEvent};

/// Thumb-to-index gap while pinching, well under the pinch threshold.
const PINCHED_GAP: f64 = 0.01;

/// Thumb-to-index gap with the hand open.
const OPEN_GAP: f64 = 0.15;

const WRIST_AT: (f64, f64) = (0.5, 0.95);

#[derive(Debug, Clone, Copy)]
pub struct SynthOptions {
    pub fps: f64,
    /// Open hand over the button before the pinch.
    pub lead_ms: f64,
    /// How long the pinch is held.
    pub hold_ms: f64,
    /// Open hand over the button after the pinch.
    pub tail_ms: f64,
    /// Uniform per-coordinate noise amplitude, in normalized units.
    pub jitter: f64,
    pub seed: u64,
    /// Overlay the button is laid out on.
    pub overlay: Viewport,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            fps: 30.0,
            lead_ms: 300.0,
            hold_ms: 1000.0,
            tail_ms: 300.0,
            jitter: 0.002,
            seed: 7,
            overlay: Viewport::default(),
        }
    }
}

/// Build a session: camera start, then frames at `fps` through the lead,
/// hold and tail phases.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidFps`] unless `fps` is positive and finite,
/// and [`HarnessError::InvalidJitter`] unless `jitter` is finite and not negative.
pub fn generate(options: &SynthOptions, config: &GestureConfig) -> Result<Vec<Record>, HarnessError> {
    if !(options.fps.is_finite() && options.fps > 0.0) {
        return Err(HarnessError::InvalidFps(options.fps));
    }
    if !(options.jitter.is_finite() && options.jitter >= 0.0) {
        return Err(HarnessError::InvalidJitter(options.jitter));
    }
    let mut rng = StdRng::seed_from_u64(options.seed);
    let frame_ms = 1000.0 / options.fps;
    let center = config.button_center();
    let target = (center.x / options.overlay.width, center.y / options.overlay.height);

    let pinch_start = options.lead_ms;
    let pinch_end = pinch_start + options.hold_ms;
    let end = pinch_end + options.tail_ms;

    let mut records = vec![Record::Event(EventRecord { t: 0.0, event: SessionEvent::CameraStarted })];
    let mut t = 0.0;
    while t < end {
        let pinched = t >= pinch_start && t < pinch_end;
        let hand = hand_at(target, pinched, options.jitter, &mut rng);
        records.push(Record::Frame(FrameRecord::new(round_ms(t), Some(&hand))));
        t += frame_ms;
    }
    tracing::debug!(frames = records.len() - 1, "synthetic session generated");
    Ok(records)
}

/// A hand whose index tip sits at `tip`, pinched or open.
fn hand_at(tip: (f64, f64), pinched: bool, jitter: f64, rng: &mut StdRng) -> Vec<Landmark> {
    let gap = if pinched { PINCHED_GAP } else { OPEN_GAP };
    let mut noisy = |v: f64| {
        let n = if jitter > 0.0 { rng.random_range(-jitter..=jitter) } else { 0.0 };
        (v + n).clamp(0.0, 1.0)
    };

    let index = Landmark::new(noisy(tip.0), noisy(tip.1));
    let thumb = Landmark::new(noisy(tip.0 + gap), noisy(tip.1 + gap));
    let wrist = Landmark::new(WRIST_AT.0, WRIST_AT.1);

    let mut points = Vec::with_capacity(LANDMARK_COUNT);
    for i in 0..LANDMARK_COUNT {
        let point = match i {
            WRIST => wrist,
            THUMB_TIP => thumb,
            INDEX_TIP => index,
            // Remaining joints sit between the wrist and the fingertips.
            _ => Landmark::new((wrist.x + index.x) / 2.0, (wrist.y + index.y) / 2.0),
        };
        points.push(point);
    }
    points
}

/// Keep timestamps readable in the written file.
fn round_ms(t: f64) -> f64 {
    (t * 10.0).round() / 10.0
}
