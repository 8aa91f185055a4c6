use std::fmt::Write as _;

use gesture::consts::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST};
use gesture::shape::ShapeKind;
use serde_json::Value;

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Frame line with the index tip at `index` and the thumb at `thumb`.
fn frame(t: f64, thumb: (f64, f64), index: (f64, f64)) -> String {
    let mut points = vec![[0.5, 0.7]; LANDMARK_COUNT];
    points[WRIST] = [0.5, 0.95];
    points[THUMB_TIP] = [thumb.0, thumb.1];
    points[INDEX_TIP] = [index.0, index.1];
    serde_json::json!({ "t": t, "landmarks": points }).to_string()
}

fn pinch_frames(start: f64, end: f64, out: &mut String) {
    let mut t = start;
    while t < end {
        writeln!(out, "{}", frame(t, (0.5, 0.5), (0.51, 0.5))).unwrap();
        t += 33.0;
    }
}

/// Engine with an 80×80 overlay so (0.51, 0.5) lands on the button.
fn core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_overlay_size(80.0, 80.0);
    core
}

fn run(session: &str, core: &mut EngineCore, options: ReplayOptions) -> (ReplayReport, Vec<Value>) {
    let mut out = Vec::new();
    let report = replay(session.as_bytes(), &mut out, core, options).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (report, lines)
}

fn count(lines: &[Value], action: &str) -> usize {
    lines.iter().filter(|l| l["action"] == action).count()
}

// =============================================================
// Replay
// =============================================================

#[test]
fn sustained_pinch_replays_one_toggle() {
    let mut session = String::new();
    pinch_frames(0.0, 1000.0, &mut session);
    let mut core = core();
    let (report, lines) = run(&session, &mut core, ReplayOptions::default());
    assert_eq!(count(&lines, "shape_changed"), 1);
    assert_eq!(core.shape(), ShapeKind::Sphere);
    assert_eq!(report.frames, 31);
}

#[test]
fn output_lines_carry_timestamp() {
    let mut session = String::new();
    pinch_frames(0.0, 50.0, &mut session);
    let (_, lines) = run(&session, &mut core(), ReplayOptions::default());
    let changed = lines.iter().find(|l| l["action"] == "shape_changed").unwrap();
    assert_eq!(changed["t"], 0.0);
    assert_eq!(changed["info"]["name"], "Sphere");
}

#[test]
fn pointer_updates_only_on_request() {
    let session = frame(0.0, (0.5, 0.8), (0.6, 0.5));
    let (_, quiet) = run(&session, &mut core(), ReplayOptions::default());
    assert_eq!(count(&quiet, "orientation_target"), 0);

    let options = ReplayOptions { pointer: true, ..Default::default() };
    let (_, loud) = run(&session, &mut core(), options);
    assert_eq!(count(&loud, "orientation_target"), 1);
}

#[test]
fn waiting_for_camera_drops_early_frames() {
    let mut session = String::new();
    pinch_frames(0.0, 100.0, &mut session);
    session.push_str("{\"t\": 100, \"event\": \"camera_started\"}\n");
    let mut core = core();
    let options = ReplayOptions { wait_for_camera: true, ..Default::default() };
    let (_, lines) = run(&session, &mut core, options);
    assert_eq!(count(&lines, "shape_changed"), 0);
    assert_eq!(count(&lines, "camera_ready"), 1);
}

#[test]
fn camera_failure_is_reported() {
    let mut session = String::from("{\"t\": 0, \"event\": \"camera_failed\", \"message\": \"denied\"}\n");
    pinch_frames(10.0, 200.0, &mut session);
    let mut core = core();
    let (_, lines) = run(&session, &mut core, ReplayOptions::default());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "Could not access the camera. Check the browser permissions.");
}

#[test]
fn control_events_drive_the_engine() {
    let session = [
        r#"{"t": 0, "event": "subject", "name": "science"}"#,
        r#"{"t": 1, "event": "tool", "name": "point"}"#,
        r#"{"t": 2, "event": "dimension", "dimension": "side", "value": 2}"#,
        r#"{"t": 3, "event": "tool", "name": "lasso"}"#,
    ]
    .join("\n");
    let mut core = core();
    let (report, lines) = run(&session, &mut core, ReplayOptions::default());
    assert_eq!(report.skipped_events, 1);
    assert_eq!(count(&lines, "render_needed"), 1);
    assert_eq!(core.shape_info().volume_text, "8.00 u³");
    assert_eq!(core.ui.tool, gesture::mode::Tool::Point);
}

#[test]
fn malformed_frame_is_no_hand() {
    let session = r#"{"t": 0, "landmarks": [[0.5, 0.5], [0.51]]}"#;
    let (report, lines) = run(session, &mut core(), ReplayOptions::default());
    assert_eq!(report.frames, 1);
    assert!(lines.is_empty());
}

#[test]
fn bad_line_stops_replay() {
    let session = "{\"t\": 0}\nnot json\n";
    let mut out = Vec::new();
    let err = replay(session.as_bytes(), &mut out, &mut core(), ReplayOptions::default()).unwrap_err();
    assert!(matches!(err, HarnessError::BadLine { line: 2, .. }));
}
