use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use serde::Serialize;

use crate::camera::{Euler, Orientation, PerspectiveCamera, Vec3, Viewport};
use crate::interpreter::{ClickPhase, GestureConfig, GestureFrame, Interpreter};
use crate::landmark::{Landmark, LandmarkSet};
use crate::mode::{ModeError, Subject, Tool, UiState};
use crate::render;
use crate::router::{Outcome, Router, SceneEffect};
use crate::scene::{ObjectId, SceneStore};
use crate::shape::{Dimension, DimensionError, Dimensions, ShapeInfo, ShapeKind};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Message shown to the user when the webcam cannot be opened.
pub const CAMERA_FAILED_MESSAGE: &str = "Could not access the camera. Check the browser permissions.";

/// Actions returned from frame handlers for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// New steering target for the primary shape, in radians.
    OrientationTarget { yaw: f64, pitch: f64 },
    /// The gesture button's visual state changed.
    ButtonState { hovered: bool, active: bool },
    /// The primary shape was replaced; the HUD should show `info`.
    ShapeChanged { info: ShapeInfo },
    PointCreated { id: ObjectId, at: Vec3 },
    VectorStarted { at: Vec3 },
    VectorCreated { id: ObjectId, from: Vec3, to: Vec3 },
    PlaneCreated { id: ObjectId, center: Vec3 },
    ObjectDeleted { id: ObjectId },
    Painted { id: ObjectId, target: ObjectId, at: Vec3 },
    Selected { id: Option<ObjectId> },
    CameraReady,
    /// The camera could not be started; `message` is user-facing.
    CameraFailed { message: String },
    RenderNeeded,
}

impl Action {
    /// Whether this action is a discrete event rather than continuous steering.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::OrientationTarget { .. })
    }
}

/// Camera stream lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StreamStatus {
    /// Waiting for the user to grant camera access.
    #[default]
    Pending,
    /// Frames are flowing.
    Live,
    /// Acquisition failed; the gesture feature is off but the scene still works.
    Failed(String),
}

/// Core engine state: all logic that does not depend on the overlay canvas.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: SceneStore,
    pub camera: PerspectiveCamera,
    pub ui: UiState,
    pub interpreter: Interpreter,
    pub router: Router,
    pub orientation: Orientation,
    pub dims: Dimensions,
    pub stream: StreamStatus,
    /// Overlay (video) size used for button hover, in CSS pixels.
    pub overlay: Viewport,
    /// Scene canvas size, used for the camera aspect.
    pub viewport: Viewport,
    last_frame: Option<GestureFrame>,
    last_button: (bool, bool),
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(GestureConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        let dims = Dimensions::default();
        let shape = ShapeKind::default();
        Self {
            scene: SceneStore::new(shape, dims.scale(shape), Euler::initial()),
            camera: PerspectiveCamera::default(),
            ui: UiState::default(),
            interpreter: Interpreter::new(config),
            router: Router::new(config.repeat_guard_ms),
            orientation: Orientation::default(),
            dims,
            stream: StreamStatus::Pending,
            overlay: Viewport::default(),
            viewport: Viewport::default(),
            last_frame: None,
            last_button: (false, false),
        }
    }

    // --- Camera stream ---

    /// The webcam delivered its first frame.
    pub fn camera_started(&mut self) -> Vec<Action> {
        tracing::info!("camera stream live");
        self.stream = StreamStatus::Live;
        vec![Action::CameraReady]
    }

    /// The webcam could not be opened. `detail` is logged; the user sees a
    /// fixed message.
    pub fn camera_failed(&mut self, detail: &str) -> Vec<Action> {
        tracing::warn!(detail, "camera acquisition failed");
        self.stream = StreamStatus::Failed(detail.to_string());
        self.last_frame = None;
        vec![Action::CameraFailed { message: CAMERA_FAILED_MESSAGE.to_string() }]
    }

    // --- Frame input ---

    /// Process one tracker callback at host time `now` (milliseconds).
    ///
    /// `points` is `None` when no hand was detected. Malformed point sets are
    /// treated the same as no hand.
    pub fn on_frame(&mut self, points: Option<&[Landmark]>, now: f64) -> Vec<Action> {
        if self.stream != StreamStatus::Live {
            tracing::debug!(status = ?self.stream, "frame ignored, camera not live");
            return Vec::new();
        }

        let hand = points.and_then(|p| match LandmarkSet::new(p) {
            Ok(set) => Some(set),
            Err(err) => {
                tracing::debug!(%err, "malformed landmarks treated as no hand");
                None
            }
        });

        let frame = self.interpreter.process(hand.as_ref(), now, self.overlay);
        let mut actions = Vec::new();

        if let Some(pointer) = frame.pointer {
            self.orientation.set_target(pointer.pitch, pointer.yaw);
            actions.push(Action::OrientationTarget { yaw: pointer.yaw, pitch: pointer.pitch });

            if frame.click_down {
                let ray = self.camera.ray_from_normalized(pointer.x, pointer.y);
                let outcome = self.router.route(frame.hovered, now, &ray, &mut self.ui, &mut self.scene);
                self.interpreter.consume();
                self.apply_outcome(outcome, &mut actions);
            }
        }

        let active = frame.hovered && matches!(self.interpreter.phase(now), ClickPhase::Down { .. });
        if (frame.hovered, active) != self.last_button {
            self.last_button = (frame.hovered, active);
            actions.push(Action::ButtonState { hovered: frame.hovered, active });
        }

        self.last_frame = Some(frame);
        actions
    }

    fn apply_outcome(&mut self, outcome: Outcome, actions: &mut Vec<Action>) {
        match outcome {
            Outcome::CycleShape => {
                actions.push(self.cycle_shape());
                actions.push(Action::RenderNeeded);
            }
            Outcome::ButtonIgnored => {
                tracing::debug!(subject = self.ui.subject.name(), "button has no toggle in this subject");
            }
            Outcome::Guarded => {
                tracing::debug!("button click dropped by repeat guard");
            }
            Outcome::Scene(effect) => {
                if let Some(action) = scene_action(effect) {
                    actions.push(action);
                    actions.push(Action::RenderNeeded);
                }
            }
        }
    }

    /// Advance the primary shape and reset its orientation.
    fn cycle_shape(&mut self) -> Action {
        let next = self.shape().next();
        tracing::info!(shape = next.name(), "shape cycled");
        self.orientation = Orientation::reset_to(Euler::initial());
        self.scene.update_primary(next, self.dims.scale(next), self.orientation.current);
        Action::ShapeChanged { info: ShapeInfo::new(next, &self.dims) }
    }

    // --- Render tick ---

    /// Advance smoothing by one display frame and return the rotation to draw.
    pub fn tick(&mut self) -> Euler {
        self.orientation.step();
        let shape = self.shape();
        self.scene.update_primary(shape, self.dims.scale(shape), self.orientation.current);
        self.orientation.current
    }

    // --- Mode / controls ---

    /// Switch subject by host name.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownSubject`] for unrecognised names.
    pub fn set_subject(&mut self, name: &str) -> Result<(), ModeError> {
        self.set_subject_kind(Subject::from_name(name)?);
        Ok(())
    }

    pub fn set_subject_kind(&mut self, subject: Subject) {
        tracing::info!(subject = subject.name(), "subject changed");
        self.ui.subject = subject;
        self.ui.pending_vector_start = None;
    }

    /// Switch tool by host name.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownTool`] for unrecognised names.
    pub fn set_tool(&mut self, name: &str) -> Result<(), ModeError> {
        self.set_tool_kind(Tool::from_name(name)?);
        Ok(())
    }

    pub fn set_tool_kind(&mut self, tool: Tool) {
        tracing::debug!(tool = tool.name(), "tool changed");
        self.ui.tool = tool;
        self.ui.pending_vector_start = None;
    }

    /// Apply a slider / number-input change. Returns refreshed HUD info.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError`] for non-finite input.
    pub fn set_dimension(&mut self, dim: Dimension, value: f64) -> Result<ShapeInfo, DimensionError> {
        self.dims.set(dim, value)?;
        let shape = self.shape();
        self.scene.update_primary(shape, self.dims.scale(shape), self.orientation.current);
        Ok(ShapeInfo::new(shape, &self.dims))
    }

    /// Update the overlay (video) size in CSS pixels.
    pub fn set_overlay_size(&mut self, width: f64, height: f64) {
        self.overlay = Viewport::new(width, height);
    }

    /// Update the scene canvas size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
    }

    // --- Queries ---

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.scene.primary().map_or_else(ShapeKind::default, |(shape, _, _)| shape)
    }

    #[must_use]
    pub fn shape_info(&self) -> ShapeInfo {
        ShapeInfo::new(self.shape(), &self.dims)
    }

    /// Current rotation readout in whole degrees (x, y).
    #[must_use]
    pub fn rotation_degrees(&self) -> (i64, i64) {
        self.orientation.degrees()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&GestureFrame> {
        self.last_frame.as_ref()
    }
}

fn scene_action(effect: SceneEffect) -> Option<Action> {
    match effect {
        SceneEffect::PointCreated { id, at } => Some(Action::PointCreated { id, at }),
        SceneEffect::VectorStarted { at } => Some(Action::VectorStarted { at }),
        SceneEffect::VectorCreated { id, from, to } => Some(Action::VectorCreated { id, from, to }),
        SceneEffect::PlaneCreated { id, center } => Some(Action::PlaneCreated { id, center }),
        SceneEffect::Deleted { id } => Some(Action::ObjectDeleted { id }),
        SceneEffect::Painted { id, target, at } => Some(Action::Painted { id, target, at }),
        SceneEffect::Selected { id } => Some(Action::Selected { id }),
        SceneEffect::Nothing => None,
    }
}

/// Rebuild landmarks from a flat `[x0, y0, z0, x1, y1, z1, ...]` buffer.
///
/// A buffer whose length is not a multiple of three yields no points, which
/// the engine then treats as "no hand".
#[must_use]
pub fn landmarks_from_flat(coords: &[f64]) -> Vec<Landmark> {
    if coords.len() % 3 != 0 {
        return Vec::new();
    }
    coords
        .chunks_exact(3)
        .map(|c| Landmark { x: c[0], y: c[1], z: Some(c[2]) })
        .collect()
}

/// The full gesture engine. Wraps `EngineCore` and owns the overlay canvas
/// the button and fingertip are drawn on.
pub struct Engine {
    overlay: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas.
    #[must_use]
    pub fn new(overlay: HtmlCanvasElement, config: GestureConfig) -> Self {
        Self { overlay, core: EngineCore::with_config(config) }
    }

    // --- Delegated lifecycle ---

    pub fn camera_started(&mut self) -> Vec<Action> {
        self.core.camera_started()
    }

    pub fn camera_failed(&mut self, detail: &str) -> Vec<Action> {
        self.core.camera_failed(detail)
    }

    /// Process a tracker callback. An empty buffer means no hand.
    pub fn on_frame(&mut self, coords: &[f64], now: f64) -> Vec<Action> {
        self.sync_overlay_size();
        if coords.is_empty() {
            return self.core.on_frame(None, now);
        }
        let points = landmarks_from_flat(coords);
        self.core.on_frame(Some(&points), now)
    }

    pub fn tick(&mut self) -> Euler {
        self.core.tick()
    }

    /// # Errors
    ///
    /// Returns [`ModeError::UnknownSubject`] for unrecognised names.
    pub fn set_subject(&mut self, name: &str) -> Result<(), ModeError> {
        self.core.set_subject(name)
    }

    /// # Errors
    ///
    /// Returns [`ModeError::UnknownTool`] for unrecognised names.
    pub fn set_tool(&mut self, name: &str) -> Result<(), ModeError> {
        self.core.set_tool(name)
    }

    /// # Errors
    ///
    /// Returns [`DimensionError`] for non-finite input.
    pub fn set_dimension(&mut self, dim: Dimension, value: f64) -> Result<ShapeInfo, DimensionError> {
        self.core.set_dimension(dim, value)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.core.set_viewport(width, height);
    }

    /// Match the overlay's backing size to its displayed size.
    fn sync_overlay_size(&mut self) {
        let width = u32::try_from(self.overlay.client_width()).unwrap_or(0);
        let height = u32::try_from(self.overlay.client_height()).unwrap_or(0);
        self.overlay.set_width(width);
        self.overlay.set_height(height);
        self.core.set_overlay_size(f64::from(width), f64::from(height));
    }

    // --- Render ---

    /// Draw the gesture button and fingertip marker for the last frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render_overlay(&self) -> Result<(), JsValue> {
        let ctx = self
            .overlay
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw_overlay(&ctx, self.core.interpreter.config(), self.core.overlay, self.core.last_frame())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn shape_info(&self) -> ShapeInfo {
        self.core.shape_info()
    }

    #[must_use]
    pub fn rotation_degrees(&self) -> (i64, i64) {
        self.core.rotation_degrees()
    }
}

/// Serialize actions into a JS array for the host page.
///
/// # Errors
///
/// Returns `Err` if serialization or `JSON.parse` fails.
pub fn actions_to_js(actions: &[Action]) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(actions).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
