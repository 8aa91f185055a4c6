//! Feeds a recorded session through [`EngineCore`] the way the host page
//! would: frame records go to `on_frame` followed by one render tick, event
//! records go to the matching engine control.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::{BufRead, Write};

use gesture::engine::{Action, EngineCore};
use serde::Serialize;

use crate::error::HarnessError;
use crate::session::{self, Record, SessionEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Also print continuous `orientation_target` actions.
    pub pointer: bool,
    /// Leave the camera pending until the session says it started.
    pub wait_for_camera: bool,
}

/// Totals for one replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    pub records: usize,
    pub frames: usize,
    pub actions: usize,
    pub skipped_events: usize,
}

#[derive(Serialize)]
struct Emitted<'a> {
    t: f64,
    #[serde(flatten)]
    action: &'a Action,
}

/// Replay every record from `input`, writing emitted actions to `out` as
/// JSON lines.
///
/// # Errors
///
/// Returns `Err` on I/O failure or a line that is not a valid record.
pub fn replay<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    core: &mut EngineCore,
    options: ReplayOptions,
) -> Result<ReplayReport, HarnessError> {
    let mut report = ReplayReport::default();
    if !options.wait_for_camera {
        core.camera_started();
    }

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let Some(record) = session::parse_line(&line, index + 1)? else {
            continue;
        };
        report.records += 1;
        let t = record.t();

        let actions = match record {
            Record::Frame(frame) => {
                report.frames += 1;
                let points = frame.points();
                if frame.landmarks.is_some() && points.is_none() {
                    tracing::warn!(line = index + 1, "frame has malformed points, treated as no hand");
                }
                let actions = core.on_frame(points.as_deref(), t);
                core.tick();
                actions
            }
            Record::Event(event) => match apply_event(core, event.event) {
                Some(actions) => actions,
                None => {
                    report.skipped_events += 1;
                    Vec::new()
                }
            },
        };

        for action in actions.iter().filter(|a| options.pointer || a.is_discrete()) {
            writeln!(out, "{}", serde_json::to_string(&Emitted { t, action })?)?;
            report.actions += 1;
        }
    }

    tracing::info!(
        records = report.records,
        frames = report.frames,
        actions = report.actions,
        shape = core.shape().name(),
        objects = core.scene.len(),
        "replay complete"
    );
    Ok(report)
}

/// Apply one control event. Returns `None` when the engine rejected it.
fn apply_event(core: &mut EngineCore, event: SessionEvent) -> Option<Vec<Action>> {
    match event {
        SessionEvent::CameraStarted => Some(core.camera_started()),
        SessionEvent::CameraFailed { message } => Some(core.camera_failed(&message)),
        SessionEvent::Subject { name } => match core.set_subject(&name) {
            Ok(()) => Some(Vec::new()),
            Err(err) => {
                tracing::warn!(%err, "subject event skipped");
                None
            }
        },
        SessionEvent::Tool { name } => match core.set_tool(&name) {
            Ok(()) => Some(Vec::new()),
            Err(err) => {
                tracing::warn!(%err, "tool event skipped");
                None
            }
        },
        SessionEvent::Dimension { dimension, value } => match core.set_dimension(dimension, value) {
            Ok(info) => {
                tracing::debug!(volume = %info.volume_text, "dimension changed");
                Some(vec![Action::RenderNeeded])
            }
            Err(err) => {
                tracing::warn!(%err, "dimension event skipped");
                None
            }
        },
        SessionEvent::Viewport { width, height } => {
            core.set_viewport(width, height);
            Some(Vec::new())
        }
    }
}
