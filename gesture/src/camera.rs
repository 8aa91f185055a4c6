//! Geometry shared by the interpreter, hit tester and renderer.
//!
//! Screen-side types ([`Point`], [`Viewport`]) are in CSS pixels. World-side
//! types ([`Vec3`], [`Ray`], [`Euler`]) follow the scene's right-handed frame:
//! +x right, +y up, the camera on +z looking toward the origin.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_FOV_DEG, CAMERA_Z, INITIAL_ROTATION, ROTATION_SMOOTHING};

/// A point in screen (overlay) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of a drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 640.0, height: 480.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height; `1.0` for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.width > 0.0 && self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }

    #[must_use]
    pub fn sub(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }

    #[must_use]
    pub fn scale(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x * o.x, self.y * o.y, self.z * o.z)
    }

    /// Component-wise quotient.
    #[must_use]
    pub fn div(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x / o.x, self.y / o.y, self.z / o.z)
    }

    #[must_use]
    pub fn dot(self, o: Vec3) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalize(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self.scale(1.0 / len) } else { self }
    }
}

/// A half-line in world space. `dir` is not required to be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    #[must_use]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin.add(self.dir.scale(t))
    }
}

/// Euler rotation in radians, applied in X, then Y, then Z intrinsic order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotation a freshly created primary shape starts at.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(INITIAL_ROTATION.0, INITIAL_ROTATION.1, INITIAL_ROTATION.2)
    }

    /// Rotate `v` from local into world space (`Rx · Ry · Rz · v`).
    #[must_use]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        rot_x(rot_y(rot_z(v, self.z), self.y), self.x)
    }

    /// Rotate `v` from world into local space.
    #[must_use]
    pub fn inverse_rotate(&self, v: Vec3) -> Vec3 {
        rot_z(rot_y(rot_x(v, -self.x), -self.y), -self.z)
    }
}

fn rot_x(v: Vec3, a: f64) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

fn rot_y(v: Vec3, a: f64) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

fn rot_z(v: Vec3, a: f64) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Fixed perspective camera on the +z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_deg: f64,
    pub aspect: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self { position: Vec3::new(0.0, 0.0, CAMERA_Z), fov_deg: CAMERA_FOV_DEG, aspect: 1.0 }
    }
}

impl PerspectiveCamera {
    /// Ray from the camera through normalized device coordinates
    /// (`-1..1` left to right, `-1..1` bottom to top).
    #[must_use]
    pub fn ray_through(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let tan_half = (self.fov_deg.to_radians() * 0.5).tan();
        let dir = Vec3::new(ndc_x * tan_half * self.aspect, ndc_y * tan_half, -1.0).normalize();
        Ray::new(self.position, dir)
    }

    /// Ray through a normalized image position (`0..1`, y down).
    #[must_use]
    pub fn ray_from_normalized(&self, x: f64, y: f64) -> Ray {
        self.ray_through(2.0 * x - 1.0, 1.0 - 2.0 * y)
    }
}

/// Smoothed orientation of the primary shape.
///
/// The gesture pointer sets `target`; each render tick moves `current` a fixed
/// fraction of the way there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub current: Euler,
    pub target_x: f64,
    pub target_y: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::reset_to(Euler::initial())
    }
}

impl Orientation {
    /// Orientation at rest on `rotation`.
    #[must_use]
    pub fn reset_to(rotation: Euler) -> Self {
        Self { current: rotation, target_x: rotation.x, target_y: rotation.y }
    }

    /// Steer toward pointer angles (pitch → x axis, yaw → y axis).
    pub fn set_target(&mut self, pitch: f64, yaw: f64) {
        self.target_x = pitch;
        self.target_y = yaw;
    }

    /// Advance one render tick.
    pub fn step(&mut self) {
        self.current.x += (self.target_x - self.current.x) * ROTATION_SMOOTHING;
        self.current.y += (self.target_y - self.current.y) * ROTATION_SMOOTHING;
    }

    /// Current x/y rotation in whole degrees, as shown in the HUD readout.
    #[must_use]
    pub fn degrees(&self) -> (i64, i64) {
        #[allow(clippy::cast_possible_truncation)]
        let round = |r: f64| r.to_degrees().round() as i64;
        (round(self.current.x), round(self.current.y))
    }
}
