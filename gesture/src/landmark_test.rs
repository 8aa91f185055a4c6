#![allow(clippy::float_cmp)]

use super::*;

fn hand() -> Vec<Landmark> {
    vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT]
}

// =============================================================
// Landmark
// =============================================================

#[test]
fn planar_distance_ignores_depth() {
    let a = Landmark { x: 0.0, y: 0.0, z: Some(5.0) };
    let b = Landmark { x: 0.3, y: 0.4, z: Some(-5.0) };
    assert!((a.planar_distance(&b) - 0.5).abs() < 1e-12);
}

#[test]
fn landmark_deserializes_without_z() {
    let lm: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
    assert_eq!(lm, Landmark::new(0.25, 0.75));
}

// =============================================================
// LandmarkSet validation
// =============================================================

#[test]
fn accepts_exactly_twenty_one_points() {
    assert!(LandmarkSet::new(&hand()).is_ok());
}

#[test]
fn rejects_short_sets() {
    let points = vec![Landmark::default(); 9];
    assert_eq!(LandmarkSet::new(&points), Err(LandmarkError::WrongCount(9)));
}

#[test]
fn rejects_long_sets() {
    let points = vec![Landmark::default(); 42];
    assert_eq!(LandmarkSet::new(&points), Err(LandmarkError::WrongCount(42)));
}

#[test]
fn rejects_empty_set() {
    assert_eq!(LandmarkSet::new(&[]), Err(LandmarkError::WrongCount(0)));
}

#[test]
fn rejects_nan_coordinates() {
    let mut points = hand();
    points[THUMB_TIP].y = f64::NAN;
    assert_eq!(LandmarkSet::new(&points), Err(LandmarkError::NonFinite { index: THUMB_TIP }));
}

#[test]
fn rejects_infinite_depth() {
    let mut points = hand();
    points[2].z = Some(f64::INFINITY);
    assert_eq!(LandmarkSet::new(&points), Err(LandmarkError::NonFinite { index: 2 }));
}

#[test]
fn error_messages_name_the_problem() {
    assert_eq!(LandmarkError::WrongCount(3).to_string(), "expected 21 landmarks, got 3");
    assert!(LandmarkError::NonFinite { index: 8 }.to_string().contains("landmark 8"));
}

// =============================================================
// Accessors
// =============================================================

#[test]
fn accessors_pick_fixed_indices() {
    let mut points = hand();
    points[WRIST] = Landmark::new(0.1, 0.9);
    points[THUMB_TIP] = Landmark::new(0.2, 0.8);
    points[INDEX_TIP] = Landmark::new(0.3, 0.7);
    let set = LandmarkSet::new(&points).unwrap();
    assert_eq!(set.wrist().x, 0.1);
    assert_eq!(set.thumb_tip().x, 0.2);
    assert_eq!(set.index_tip().x, 0.3);
}

#[test]
fn pinch_distance_measures_thumb_to_index() {
    let mut points = hand();
    points[THUMB_TIP] = Landmark::new(0.5, 0.5);
    points[INDEX_TIP] = Landmark::new(0.51, 0.5);
    let set = LandmarkSet::new(&points).unwrap();
    assert!((set.pinch_distance() - 0.01).abs() < 1e-9);
}

#[test]
fn thumb_extension_measures_thumb_to_wrist() {
    let mut points = hand();
    points[WRIST] = Landmark::new(0.5, 0.9);
    points[THUMB_TIP] = Landmark::new(0.5, 0.5);
    let set = LandmarkSet::new(&points).unwrap();
    assert!((set.thumb_extension() - 0.4).abs() < 1e-9);
}
