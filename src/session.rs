//! Recorded gesture sessions in JSON-lines form.
//!
//! Each non-blank line is one record stamped with the host time `t` in
//! milliseconds. A frame record carries the tracker output (`null` when no
//! hand was seen); an event record drives the camera lifecycle or the UI
//! controls the host page would normally wire up.
//!
//! ```text
//! {"t":0,"event":"camera_started"}
//! {"t":33.3,"landmarks":[[0.5,0.95],[0.48,0.8,0.01], ...]}
//! {"t":66.6,"landmarks":null}
//! {"t":90,"event":"tool","name":"point"}
//! ```

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use gesture::landmark::Landmark;
use gesture::shape::Dimension;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// One line of a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Event(EventRecord),
    Frame(FrameRecord),
}

impl Record {
    #[must_use]
    pub fn t(&self) -> f64 {
        match self {
            Self::Event(e) => e.t,
            Self::Frame(f) => f.t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub t: f64,
    #[serde(flatten)]
    pub event: SessionEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    CameraStarted,
    CameraFailed { message: String },
    Subject { name: String },
    Tool { name: String },
    Dimension { dimension: Dimension, value: f64 },
    Viewport { width: f64, height: f64 },
}

/// Tracker output for one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameRecord {
    pub t: f64,
    /// `[x, y]` or `[x, y, z]` per point; `None` when no hand was detected.
    #[serde(default)]
    pub landmarks: Option<Vec<Vec<f64>>>,
}

impl FrameRecord {
    #[must_use]
    pub fn new(t: f64, landmarks: Option<&[Landmark]>) -> Self {
        let landmarks = landmarks.map(|points| {
            points
                .iter()
                .map(|p| match p.z {
                    Some(z) => vec![p.x, p.y, z],
                    None => vec![p.x, p.y],
                })
                .collect()
        });
        Self { t, landmarks }
    }

    /// Convert the recorded coordinates into landmarks.
    ///
    /// Returns `None` for a no-hand frame, and also when any point does not
    /// have two or three coordinates; the engine sees both as "no hand".
    #[must_use]
    pub fn points(&self) -> Option<Vec<Landmark>> {
        self.landmarks.as_ref()?.iter().map(|c| to_landmark(c)).collect()
    }
}

fn to_landmark(coords: &[f64]) -> Option<Landmark> {
    match *coords {
        [x, y] => Some(Landmark::new(x, y)),
        [x, y, z] => Some(Landmark { x, y, z: Some(z) }),
        _ => None,
    }
}

/// Parse one session line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`HarnessError::BadLine`] when the line is not a valid record.
pub fn parse_line(line: &str, number: usize) -> Result<Option<Record>, HarnessError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| HarnessError::BadLine { line: number, source })
}

/// Render one record as a session line (no trailing newline).
///
/// # Errors
///
/// Returns `Err` if serialization fails.
pub fn format_line(record: &Record) -> Result<String, HarnessError> {
    Ok(serde_json::to_string(record)?)
}
