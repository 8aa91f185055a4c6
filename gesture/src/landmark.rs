//! Hand landmarks as delivered by the external tracker.
//!
//! The tracker reports zero or one hand per camera frame as 21 normalized
//! points. A [`LandmarkSet`] is only constructed once the point count and the
//! coordinates have been checked, so downstream code can index thumb, index
//! and wrist without bounds checks.

#[cfg(test)]
#[path = "landmark_test.rs"]
mod landmark_test;

use serde::{Deserialize, Serialize};

use crate::consts::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST};

/// Error returned by [`LandmarkSet::new`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    /// The tracker delivered the wrong number of points.
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),
    /// A coordinate is NaN or infinite.
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// One normalized point on the tracked hand.
///
/// `x` and `y` are in `[0, 1]` relative to the video frame; `z` is a relative
/// depth the tracker may omit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Euclidean distance to `other` in the image plane, ignoring depth.
    #[must_use]
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_none_or(f64::is_finite)
    }
}

/// A validated set of exactly [`LANDMARK_COUNT`] points for one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Validate raw tracker output.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::WrongCount`] when `points` is not exactly 21
    /// long and [`LandmarkError::NonFinite`] for NaN or infinite coordinates.
    pub fn new(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount(points.len()))?;
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn wrist(&self) -> &Landmark {
        &self.points[WRIST]
    }

    #[must_use]
    pub fn thumb_tip(&self) -> &Landmark {
        &self.points[THUMB_TIP]
    }

    #[must_use]
    pub fn index_tip(&self) -> &Landmark {
        &self.points[INDEX_TIP]
    }

    /// Thumb-tip to index-tip distance; the pinch measure.
    #[must_use]
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip().planar_distance(self.index_tip())
    }

    /// Thumb-tip to wrist distance; large when the thumb is extended.
    #[must_use]
    pub fn thumb_extension(&self) -> f64 {
        self.thumb_tip().planar_distance(self.wrist())
    }

    #[must_use]
    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}
