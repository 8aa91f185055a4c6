//! Interaction router: decides what a pinch-click does.
//!
//! A click on the virtual button toggles the primary shape (subject
//! permitting) and locks a repeat guard; a click anywhere else goes to the
//! scene click handler, which hit-tests and then creates, deletes, paints or
//! selects depending on the subject and tool.
//!
//! ```text
//! repeat guard:  UNLOCKED ──(button action)──▶ LOCKED ──(guard expires)──▶ UNLOCKED
//! ```
//!
//! The guard is independent of, and longer than, the pinch debounce, so quick
//! successive pinches on the button still toggle at most once per window.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::camera::{Ray, Vec3};
use crate::consts::{PAINT_COLOR, PLANE_SIZE, REPEAT_GUARD_MS};
use crate::hit::{hit_test, work_plane_hit};
use crate::mode::{Subject, Tool, UiState};
use crate::scene::{ObjectId, ObjectKind, SceneStore};
use crate::timer::Cooldown;

/// What routing one click produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Button click accepted: advance the primary shape.
    CycleShape,
    /// Button click accepted, but the current subject has no toggle.
    ButtonIgnored,
    /// Button click while the repeat guard is locked. The click is spent.
    Guarded,
    /// Click handled by the scene.
    Scene(SceneEffect),
}

/// Effect of a click that landed on the scene rather than the button.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEffect {
    PointCreated { id: ObjectId, at: Vec3 },
    /// First endpoint of a vector stored; waiting for the second click.
    VectorStarted { at: Vec3 },
    VectorCreated { id: ObjectId, from: Vec3, to: Vec3 },
    PlaneCreated { id: ObjectId, center: Vec3 },
    Deleted { id: ObjectId },
    Painted { id: ObjectId, target: ObjectId, at: Vec3 },
    /// Selection changed; `None` when the click hit nothing.
    Selected { id: Option<ObjectId> },
    /// The click had nothing to act on (e.g. erasing empty space).
    Nothing,
}

/// Click router with its repeat guard.
#[derive(Debug, Clone)]
pub struct Router {
    guard: Cooldown,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(REPEAT_GUARD_MS)
    }
}

impl Router {
    #[must_use]
    pub fn new(repeat_guard_ms: f64) -> Self {
        Self { guard: Cooldown::new(repeat_guard_ms) }
    }

    /// Whether button toggles are locked at `now`.
    #[must_use]
    pub fn guard_active(&self, now: f64) -> bool {
        self.guard.is_active(now)
    }

    /// Route one click-down.
    ///
    /// `ray` is the camera ray through the index tip, used when the click
    /// lands on the scene.
    pub fn route(&mut self, hovered: bool, now: f64, ray: &Ray, ui: &mut UiState, scene: &mut SceneStore) -> Outcome {
        if hovered {
            if self.guard.is_active(now) {
                return Outcome::Guarded;
            }
            self.guard.start(now);
            return if ui.subject.cycles_shapes() { Outcome::CycleShape } else { Outcome::ButtonIgnored };
        }
        Outcome::Scene(scene_click(ray, ui, scene))
    }
}

/// Hit-test the scene and apply the current tool.
fn scene_click(ray: &Ray, ui: &mut UiState, scene: &mut SceneStore) -> SceneEffect {
    let hit = hit_test(ray, scene);

    if ui.subject == Subject::Arts {
        return match hit {
            Some(hit) => {
                let id = scene.insert(ObjectKind::PaintMark { at: hit.point, color: PAINT_COLOR.to_string() });
                SceneEffect::Painted { id, target: hit.object_id, at: hit.point }
            }
            None => SceneEffect::Nothing,
        };
    }

    // Placement lands on the clicked surface, else on the z = 0 work plane.
    let place = hit.map(|h| h.point).or_else(|| work_plane_hit(ray));

    match ui.tool {
        Tool::Point => match place {
            Some(at) => SceneEffect::PointCreated { id: scene.insert(ObjectKind::Point { at }), at },
            None => SceneEffect::Nothing,
        },
        Tool::Vector => match (place, ui.pending_vector_start.take()) {
            (Some(to), Some(from)) => {
                SceneEffect::VectorCreated { id: scene.insert(ObjectKind::Vector { from, to }), from, to }
            }
            (Some(at), None) => {
                ui.pending_vector_start = Some(at);
                SceneEffect::VectorStarted { at }
            }
            (None, pending) => {
                ui.pending_vector_start = pending;
                SceneEffect::Nothing
            }
        },
        Tool::Plane => match place {
            Some(center) => SceneEffect::PlaneCreated {
                id: scene.insert(ObjectKind::Plane { center, size: PLANE_SIZE }),
                center,
            },
            None => SceneEffect::Nothing,
        },
        Tool::Erase => match hit.and_then(|h| scene.remove_deletable(&h.object_id)) {
            Some(removed) => {
                if ui.selected == Some(removed.id) {
                    ui.selected = None;
                }
                SceneEffect::Deleted { id: removed.id }
            }
            None => SceneEffect::Nothing,
        },
        Tool::Shape | Tool::None => {
            ui.selected = hit.map(|h| h.object_id);
            SceneEffect::Selected { id: ui.selected }
        }
    }
}
