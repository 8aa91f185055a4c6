//! Ray hit-testing against scene objects.
//!
//! A scene click casts a ray from the camera through the index-tip position
//! and asks which interactive object it meets first. The primary shape is
//! tested in its own local frame so rotation and per-axis scale are honoured.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Ray, Vec3};
use crate::consts::{CYLINDER_BASE_HEIGHT, CYLINDER_BASE_RADIUS, POINT_PICK_RADIUS, SPHERE_BASE_RADIUS, VECTOR_PICK_RADIUS};
use crate::scene::{ObjectId, ObjectKind, SceneStore};
use crate::shape::ShapeKind;

/// Smallest ray parameter counted as "in front of" the origin.
const T_EPSILON: f64 = 1e-9;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub object_id: ObjectId,
    /// World-space point where the ray meets the object.
    pub point: Vec3,
    /// World-space distance from the ray origin.
    pub distance: f64,
}

/// Nearest interactive object along `ray`, if any.
#[must_use]
pub fn hit_test(ray: &Ray, scene: &SceneStore) -> Option<Hit> {
    let dir_len = ray.dir.length();
    if dir_len == 0.0 {
        return None;
    }
    scene
        .sorted_objects()
        .into_iter()
        .filter(|obj| obj.kind.is_interactive())
        .filter_map(|obj| intersect(ray, &obj.kind).map(|t| (obj.id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(object_id, t)| Hit { object_id, point: ray.at(t), distance: t * dir_len })
}

/// Where `ray` crosses the z = 0 work plane, if it does so in front of the origin.
#[must_use]
pub fn work_plane_hit(ray: &Ray) -> Option<Vec3> {
    if ray.dir.z.abs() < T_EPSILON {
        return None;
    }
    let t = -ray.origin.z / ray.dir.z;
    (t > T_EPSILON).then(|| ray.at(t))
}

/// Ray parameter of the first intersection with `kind`.
fn intersect(ray: &Ray, kind: &ObjectKind) -> Option<f64> {
    match kind {
        ObjectKind::PrimaryShape { shape, scale, rotation } => {
            if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
                return None;
            }
            // Affine map into local space keeps the ray parameter unchanged.
            let local = Ray::new(
                rotation.inverse_rotate(ray.origin).div(*scale),
                rotation.inverse_rotate(ray.dir).div(*scale),
            );
            match shape {
                ShapeKind::Cube => ray_box(&local, 0.5),
                ShapeKind::Sphere => ray_sphere(&local, Vec3::ZERO, SPHERE_BASE_RADIUS),
                ShapeKind::Cylinder => ray_cylinder(&local, CYLINDER_BASE_RADIUS, CYLINDER_BASE_HEIGHT * 0.5),
            }
        }
        ObjectKind::Point { at } => ray_sphere(ray, *at, POINT_PICK_RADIUS),
        ObjectKind::Vector { from, to } => ray_segment(ray, *from, *to, VECTOR_PICK_RADIUS),
        ObjectKind::Plane { center, size } => ray_square(ray, *center, size * 0.5),
        ObjectKind::PaintMark { .. } => None,
    }
}

/// Nearest positive root, falling back to the far root when the origin is inside.
fn first_positive(t0: f64, t1: f64) -> Option<f64> {
    let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    if near > T_EPSILON {
        Some(near)
    } else if far > T_EPSILON {
        Some(far)
    } else {
        None
    }
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f64) -> Option<f64> {
    let oc = ray.origin.sub(center);
    let a = ray.dir.dot(ray.dir);
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 || a == 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    first_positive((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a))
}

/// Axis-aligned cube centred on the origin with the given half extent.
fn ray_box(ray: &Ray, half: f64) -> Option<f64> {
    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    for (o, d) in [(ray.origin.x, ray.dir.x), (ray.origin.y, ray.dir.y), (ray.origin.z, ray.dir.z)] {
        if d.abs() < T_EPSILON {
            if o < -half || o > half {
                return None;
            }
            continue;
        }
        let t0 = (-half - o) / d;
        let t1 = (half - o) / d;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
    }
    if t_max < t_min {
        return None;
    }
    first_positive(t_min, t_max)
}

/// Capped cylinder around the y axis.
fn ray_cylinder(ray: &Ray, radius: f64, half_height: f64) -> Option<f64> {
    let mut best: Option<f64> = None;
    let mut consider = |t: f64| {
        if t > T_EPSILON && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    // Side wall.
    let (o, d) = (ray.origin, ray.dir);
    let a = d.x * d.x + d.z * d.z;
    if a > 0.0 {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                let y = o.y + t * d.y;
                if y.abs() <= half_height {
                    consider(t);
                }
            }
        }
    }

    // End caps.
    if d.y.abs() > T_EPSILON {
        for cap in [-half_height, half_height] {
            let t = (cap - o.y) / d.y;
            let x = o.x + t * d.x;
            let z = o.z + t * d.z;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }

    best
}

/// Square patch in the plane `z = center.z`.
fn ray_square(ray: &Ray, center: Vec3, half: f64) -> Option<f64> {
    if ray.dir.z.abs() < T_EPSILON {
        return None;
    }
    let t = (center.z - ray.origin.z) / ray.dir.z;
    if t <= T_EPSILON {
        return None;
    }
    let p = ray.at(t);
    ((p.x - center.x).abs() <= half && (p.y - center.y).abs() <= half).then_some(t)
}

/// Closest approach between the ray and segment `from..to`, accepted within `radius`.
fn ray_segment(ray: &Ray, from: Vec3, to: Vec3, radius: f64) -> Option<f64> {
    let u = ray.dir;
    let v = to.sub(from);
    let w0 = ray.origin.sub(from);
    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w0);
    let e = v.dot(w0);

    let denom = a * c - b * b;
    let seg = if c == 0.0 {
        0.0
    } else if denom.abs() < T_EPSILON {
        (e / c).clamp(0.0, 1.0)
    } else {
        ((a * e - b * d) / denom).clamp(0.0, 1.0)
    };
    let q = from.add(v.scale(seg));
    let t = q.sub(ray.origin).dot(u) / a;
    if t <= T_EPSILON {
        return None;
    }
    (ray.at(t).sub(q).length() <= radius).then_some(t)
}
