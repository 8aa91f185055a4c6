//! Scene model: the interactive objects a click can hit, create or delete.
//!
//! The 3D library owns meshes and materials; this store only tracks what the
//! gesture logic needs to reason about: each object's kind and its geometry
//! in world space. The primary shape is always present and cannot be erased.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::camera::{Euler, Vec3};
use crate::shape::ShapeKind;

/// Unique identifier for a scene object.
pub type ObjectId = Uuid;

/// What a scene object is, with its world-space geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// The solid the lesson is about. Centred on the origin.
    PrimaryShape { shape: ShapeKind, scale: Vec3, rotation: Euler },
    /// A point marker.
    Point { at: Vec3 },
    /// A directed segment between two points.
    Vector { from: Vec3, to: Vec3 },
    /// A square patch facing the camera.
    Plane { center: Vec3, size: f64 },
    /// A paint dab left on a surface. Not clickable.
    PaintMark { at: Vec3, color: String },
}

impl ObjectKind {
    /// Whether clicks can land on this object.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Self::PaintMark { .. })
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::PrimaryShape { .. })
    }
}

/// A scene object as tracked by the gesture engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Insertion counter; older objects sort first.
    pub seq: u64,
}

/// In-memory object store.
#[derive(Debug, Clone)]
pub struct SceneStore {
    objects: HashMap<ObjectId, SceneObject>,
    primary: ObjectId,
    next_seq: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(ShapeKind::default(), Vec3::new(1.0, 1.0, 1.0), Euler::initial())
    }
}

impl SceneStore {
    /// A scene holding only the primary shape.
    #[must_use]
    pub fn new(shape: ShapeKind, scale: Vec3, rotation: Euler) -> Self {
        let primary = Uuid::new_v4();
        let mut store = Self { objects: HashMap::new(), primary, next_seq: 0 };
        store.insert_with_id(primary, ObjectKind::PrimaryShape { shape, scale, rotation });
        store
    }

    /// Add an object and return its id.
    pub fn insert(&mut self, kind: ObjectKind) -> ObjectId {
        let id = Uuid::new_v4();
        self.insert_with_id(id, kind);
        id
    }

    fn insert_with_id(&mut self, id: ObjectId, kind: ObjectKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.objects.insert(id, SceneObject { id, kind, seq });
    }

    /// Remove an object unless it is the primary shape.
    ///
    /// Returns the removed object, or `None` if it was missing or primary.
    pub fn remove_deletable(&mut self, id: &ObjectId) -> Option<SceneObject> {
        if *id == self.primary {
            return None;
        }
        self.objects.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    #[must_use]
    pub fn primary_id(&self) -> ObjectId {
        self.primary
    }

    /// The primary shape's current kind, scale and rotation.
    #[must_use]
    pub fn primary(&self) -> Option<(ShapeKind, Vec3, Euler)> {
        match self.objects.get(&self.primary).map(|o| &o.kind) {
            Some(ObjectKind::PrimaryShape { shape, scale, rotation }) => Some((*shape, *scale, *rotation)),
            _ => None,
        }
    }

    /// Replace the primary shape's geometry in place.
    pub fn update_primary(&mut self, shape: ShapeKind, scale: Vec3, rotation: Euler) {
        if let Some(obj) = self.objects.get_mut(&self.primary) {
            obj.kind = ObjectKind::PrimaryShape { shape, scale, rotation };
        }
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&SceneObject> {
        let mut objs: Vec<&SceneObject> = self.objects.values().collect();
        objs.sort_by_key(|o| o.seq);
        objs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
