#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// --- Point / Viewport ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn viewport_aspect() {
    assert!(approx_eq(Viewport::new(640.0, 480.0).aspect(), 4.0 / 3.0));
}

#[test]
fn degenerate_viewport_aspect_is_one() {
    assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
    assert_eq!(Viewport::new(100.0, 0.0).aspect(), 1.0);
}

// --- Vec3 ---

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 5.0, 6.0);
    assert_eq!(a.add(b), Vec3::new(5.0, 7.0, 9.0));
    assert_eq!(b.sub(a), Vec3::new(3.0, 3.0, 3.0));
    assert_eq!(a.scale(2.0), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(a.dot(b), 32.0);
    assert_eq!(a.mul(b), Vec3::new(4.0, 10.0, 18.0));
    assert_eq!(b.div(Vec3::new(2.0, 5.0, 3.0)), Vec3::new(2.0, 1.0, 2.0));
}

#[test]
fn normalize_unit_length() {
    let v = Vec3::new(3.0, 0.0, 4.0).normalize();
    assert!(approx_eq(v.length(), 1.0));
}

#[test]
fn normalize_zero_stays_zero() {
    assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
}

// --- Euler ---

#[test]
fn rotate_then_inverse_is_identity() {
    let e = Euler::new(0.4, -0.4, 0.1);
    let v = Vec3::new(0.3, -1.2, 2.5);
    assert!(vec_approx_eq(e.inverse_rotate(e.rotate(v)), v));
}

#[test]
fn rotate_quarter_turn_about_y() {
    let e = Euler::new(0.0, std::f64::consts::FRAC_PI_2, 0.0);
    assert!(vec_approx_eq(e.rotate(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn initial_rotation_matches_constant() {
    assert_eq!(Euler::initial(), Euler::new(0.4, -0.4, 0.1));
}

// --- PerspectiveCamera ---

#[test]
fn center_ray_points_down_negative_z() {
    let cam = PerspectiveCamera::default();
    let ray = cam.ray_from_normalized(0.5, 0.5);
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 3.0));
    assert!(vec_approx_eq(ray.dir, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn top_edge_ray_matches_half_fov() {
    let cam = PerspectiveCamera::default();
    let ray = cam.ray_from_normalized(0.5, 0.0);
    let angle = ray.dir.y.atan2(-ray.dir.z);
    assert!(approx_eq(angle, 30f64.to_radians()));
}

#[test]
fn image_left_maps_to_world_left() {
    let cam = PerspectiveCamera { aspect: 4.0 / 3.0, ..Default::default() };
    assert!(cam.ray_from_normalized(0.1, 0.5).dir.x < 0.0);
    assert!(cam.ray_from_normalized(0.9, 0.5).dir.x > 0.0);
}

#[test]
fn ray_at_parameter() {
    let r = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(r.at(3.0), Vec3::ZERO);
}

// --- Orientation ---

#[test]
fn orientation_starts_at_rest() {
    let o = Orientation::default();
    assert_eq!(o.current, Euler::initial());
    assert_eq!(o.target_x, 0.4);
    assert_eq!(o.target_y, -0.4);
}

#[test]
fn step_moves_ten_percent() {
    let mut o = Orientation::reset_to(Euler::default());
    o.set_target(1.0, -2.0);
    o.step();
    assert!(approx_eq(o.current.x, 0.1));
    assert!(approx_eq(o.current.y, -0.2));
}

#[test]
fn steps_converge_to_target() {
    let mut o = Orientation::reset_to(Euler::default());
    o.set_target(0.5, 0.5);
    for _ in 0..300 {
        o.step();
    }
    assert!((o.current.x - 0.5).abs() < 1e-6);
    assert!((o.current.y - 0.5).abs() < 1e-6);
}

#[test]
fn step_leaves_z_untouched() {
    let mut o = Orientation::default();
    o.set_target(0.0, 0.0);
    o.step();
    assert_eq!(o.current.z, 0.1);
}

#[test]
fn degrees_rounds() {
    let o = Orientation::reset_to(Euler::new(std::f64::consts::FRAC_PI_2, -0.4, 0.0));
    assert_eq!(o.degrees(), (90, -23));
}
