//! Shared numeric constants for the gesture crate.

// ── Landmarks ───────────────────────────────────────────────────

/// Number of points in one tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// Index of the wrist landmark.
pub const WRIST: usize = 0;

/// Index of the thumb tip landmark.
pub const THUMB_TIP: usize = 4;

/// Index of the index-finger tip landmark.
pub const INDEX_TIP: usize = 8;

// ── Gesture thresholds ──────────────────────────────────────────

/// Normalized thumb-to-index distance below which the hand is pinching.
pub const PINCH_THRESHOLD: f64 = 0.04;

/// Normalized thumb-to-wrist distance the thumb must exceed to count as extended.
pub const THUMB_EXTENSION_MIN: f64 = 0.18;

/// Radius of the virtual button in overlay pixels.
pub const BUTTON_RADIUS_PX: f64 = 35.0;

/// Distance of the button center from the top-left corner, in overlay pixels.
pub const BUTTON_MARGIN_PX: f64 = 40.0;

// ── Timers ──────────────────────────────────────────────────────

/// How long a single pinch counts as "clicked" before it is forcibly released.
pub const PINCH_DEBOUNCE_MS: f64 = 200.0;

/// Minimum spacing between two button toggles.
pub const REPEAT_GUARD_MS: f64 = 700.0;

// ── Orientation ─────────────────────────────────────────────────

/// Fraction of the remaining angle covered per render tick.
pub const ROTATION_SMOOTHING: f64 = 0.1;

/// Rotation a freshly created primary shape starts at, in radians (x, y, z).
pub const INITIAL_ROTATION: (f64, f64, f64) = (0.4, -0.4, 0.1);

// ── Dimensions ──────────────────────────────────────────────────

/// Smallest value a dimension control accepts.
pub const DIMENSION_MIN: f64 = 0.5;

/// Largest value a dimension control accepts.
pub const DIMENSION_MAX: f64 = 3.0;

pub const DEFAULT_SIDE: f64 = 1.5;
pub const DEFAULT_RADIUS: f64 = 1.0;
pub const DEFAULT_HEIGHT: f64 = 1.5;

/// Base sphere geometry radius before scaling.
pub const SPHERE_BASE_RADIUS: f64 = 0.8;

/// Base cylinder geometry radius before scaling.
pub const CYLINDER_BASE_RADIUS: f64 = 0.6;

/// Base cylinder geometry height before scaling.
pub const CYLINDER_BASE_HEIGHT: f64 = 1.0;

// ── Scene camera ────────────────────────────────────────────────

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEG: f64 = 60.0;

/// Camera distance from the origin along +z.
pub const CAMERA_Z: f64 = 3.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Pick radius around a point marker, in world units.
pub const POINT_PICK_RADIUS: f64 = 0.05;

/// Pick radius around a vector segment, in world units.
pub const VECTOR_PICK_RADIUS: f64 = 0.03;

/// Edge length of a plane created by the plane tool.
pub const PLANE_SIZE: f64 = 0.8;

/// Default paint color for marks placed in the arts subject.
pub const PAINT_COLOR: &str = "#f472b6";
