#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Euler;
use crate::shape::ShapeKind;

// =============================================================
// Helpers
// =============================================================

fn scene() -> SceneStore {
    SceneStore::new(ShapeKind::Cube, Vec3::new(1.0, 1.0, 1.0), Euler::default())
}

fn center_ray() -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0))
}

fn side_ray(x: f64) -> Ray {
    Ray::new(Vec3::new(x, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0))
}

fn ui_with(subject: Subject, tool: Tool) -> UiState {
    UiState { subject, tool, ..Default::default() }
}

// =============================================================
// Button / repeat guard
// =============================================================

#[test]
fn button_click_cycles_in_math() {
    let mut router = Router::default();
    let mut ui = UiState::default();
    let mut s = scene();
    let out = router.route(true, 0.0, &center_ray(), &mut ui, &mut s);
    assert_eq!(out, Outcome::CycleShape);
    assert!(router.guard_active(0.0));
}

#[test]
fn button_ignored_outside_math_still_locks() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Science, Tool::None);
    let mut s = scene();
    assert_eq!(router.route(true, 0.0, &center_ray(), &mut ui, &mut s), Outcome::ButtonIgnored);
    assert!(router.guard_active(100.0));
}

#[test]
fn second_button_click_inside_guard_is_blocked() {
    let mut router = Router::default();
    let mut ui = UiState::default();
    let mut s = scene();
    assert_eq!(router.route(true, 0.0, &center_ray(), &mut ui, &mut s), Outcome::CycleShape);
    let out = router.route(true, 400.0, &center_ray(), &mut ui, &mut s);
    assert_eq!(out, Outcome::Guarded);
    assert_eq!(ui.subject, Subject::Math);
}

#[test]
fn guard_unlocks_after_window() {
    let mut router = Router::default();
    let mut ui = UiState::default();
    let mut s = scene();
    router.route(true, 0.0, &center_ray(), &mut ui, &mut s);
    assert!(!router.guard_active(700.0));
    assert_eq!(router.route(true, 700.0, &center_ray(), &mut ui, &mut s), Outcome::CycleShape);
}

#[test]
fn scene_click_ignores_guard() {
    let mut router = Router::default();
    let mut ui = UiState::default();
    let mut s = scene();
    router.route(true, 0.0, &center_ray(), &mut ui, &mut s);
    let out = router.route(false, 10.0, &center_ray(), &mut ui, &mut s);
    assert!(matches!(out, Outcome::Scene(SceneEffect::Selected { .. })));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_records_hit_object() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Shape);
    let mut s = scene();
    let out = router.route(false, 0.0, &center_ray(), &mut ui, &mut s);
    assert_eq!(out, Outcome::Scene(SceneEffect::Selected { id: Some(s.primary_id()) }));
    assert_eq!(ui.selected, Some(s.primary_id()));
}

#[test]
fn select_on_empty_space_clears_selection() {
    let mut router = Router::default();
    let mut ui = UiState::default();
    let mut s = scene();
    ui.selected = Some(s.primary_id());
    let out = router.route(false, 0.0, &side_ray(2.0), &mut ui, &mut s);
    assert_eq!(out, Outcome::Scene(SceneEffect::Selected { id: None }));
    assert!(ui.selected.is_none());
}

// =============================================================
// Creation tools
// =============================================================

#[test]
fn point_on_surface() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Point);
    let mut s = scene();
    let Outcome::Scene(SceneEffect::PointCreated { id, at }) = router.route(false, 0.0, &center_ray(), &mut ui, &mut s) else {
        panic!("expected a point");
    };
    assert_eq!(at, Vec3::new(0.0, 0.0, 0.5));
    assert_eq!(s.get(&id).unwrap().kind, ObjectKind::Point { at });
}

#[test]
fn point_on_work_plane_when_missing() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Science, Tool::Point);
    let mut s = scene();
    let out = router.route(false, 0.0, &side_ray(2.0), &mut ui, &mut s);
    assert!(matches!(out, Outcome::Scene(SceneEffect::PointCreated { at, .. }) if at == Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn vector_needs_two_clicks() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Vector);
    let mut s = scene();
    let first = router.route(false, 0.0, &side_ray(-2.0), &mut ui, &mut s);
    assert_eq!(first, Outcome::Scene(SceneEffect::VectorStarted { at: Vec3::new(-2.0, 0.0, 0.0) }));
    assert_eq!(s.len(), 1);

    let second = router.route(false, 500.0, &side_ray(2.0), &mut ui, &mut s);
    let Outcome::Scene(SceneEffect::VectorCreated { id, from, to }) = second else {
        panic!("expected a vector");
    };
    assert_eq!(from, Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(to, Vec3::new(2.0, 0.0, 0.0));
    assert!(s.get(&id).is_some());
    assert!(ui.pending_vector_start.is_none());
}

#[test]
fn vector_keeps_pending_start_when_placement_fails() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Vector);
    let mut s = scene();
    router.route(false, 0.0, &side_ray(-2.0), &mut ui, &mut s);
    let away = Ray::new(Vec3::new(2.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(router.route(false, 10.0, &away, &mut ui, &mut s), Outcome::Scene(SceneEffect::Nothing));
    assert!(ui.pending_vector_start.is_some());
}

#[test]
fn plane_created_at_hit() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Plane);
    let mut s = scene();
    let Outcome::Scene(SceneEffect::PlaneCreated { id, center }) = router.route(false, 0.0, &center_ray(), &mut ui, &mut s) else {
        panic!("expected a plane");
    };
    assert_eq!(center, Vec3::new(0.0, 0.0, 0.5));
    assert_eq!(s.get(&id).unwrap().kind, ObjectKind::Plane { center, size: PLANE_SIZE });
}

// =============================================================
// Erase
// =============================================================

#[test]
fn erase_deletes_hit_object() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Erase);
    let mut s = scene();
    let id = s.insert(ObjectKind::Point { at: Vec3::new(0.0, 0.0, 1.0) });
    ui.selected = Some(id);
    assert_eq!(router.route(false, 0.0, &center_ray(), &mut ui, &mut s), Outcome::Scene(SceneEffect::Deleted { id }));
    assert!(s.get(&id).is_none());
    assert!(ui.selected.is_none());
}

#[test]
fn erase_never_deletes_primary() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Erase);
    let mut s = scene();
    assert_eq!(router.route(false, 0.0, &center_ray(), &mut ui, &mut s), Outcome::Scene(SceneEffect::Nothing));
    assert!(s.get(&s.primary_id()).is_some());
}

#[test]
fn erase_on_empty_space_is_nothing() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Math, Tool::Erase);
    let mut s = scene();
    assert_eq!(router.route(false, 0.0, &side_ray(3.0), &mut ui, &mut s), Outcome::Scene(SceneEffect::Nothing));
}

// =============================================================
// Paint
// =============================================================

#[test]
fn arts_paints_on_surface() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Arts, Tool::Point);
    let mut s = scene();
    let Outcome::Scene(SceneEffect::Painted { id, target, at }) = router.route(false, 0.0, &center_ray(), &mut ui, &mut s) else {
        panic!("expected paint");
    };
    assert_eq!(target, s.primary_id());
    assert_eq!(at, Vec3::new(0.0, 0.0, 0.5));
    assert!(matches!(s.get(&id).unwrap().kind, ObjectKind::PaintMark { .. }));
}

#[test]
fn arts_paint_misses_empty_space() {
    let mut router = Router::default();
    let mut ui = ui_with(Subject::Arts, Tool::None);
    let mut s = scene();
    assert_eq!(router.route(false, 0.0, &side_ray(2.0), &mut ui, &mut s), Outcome::Scene(SceneEffect::Nothing));
    assert_eq!(s.len(), 1);
}
