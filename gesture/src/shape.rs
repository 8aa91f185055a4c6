//! The primary solid: which shape is showing, its dimensions, and the volume
//! readout that goes with it.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::camera::Vec3;
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_RADIUS, DEFAULT_SIDE, DIMENSION_MAX, DIMENSION_MIN};

/// The three solids the gesture button cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Cube,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    /// Next shape in the fixed cycle cube → sphere → cylinder → cube.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Cube => Self::Sphere,
            Self::Sphere => Self::Cylinder,
            Self::Cylinder => Self::Cube,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
        }
    }
}

/// One adjustable measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Side,
    Radius,
    Height,
}

impl Dimension {
    /// Dimensions that apply to `shape`, in display order.
    #[must_use]
    pub fn for_shape(shape: ShapeKind) -> &'static [Dimension] {
        match shape {
            ShapeKind::Cube => &[Dimension::Side],
            ShapeKind::Sphere => &[Dimension::Radius],
            ShapeKind::Cylinder => &[Dimension::Radius, Dimension::Height],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DimensionError {
    #[error("dimension value must be a finite number, got {0}")]
    NotFinite(f64),
}

/// Current measurements shared by all three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub side: f64,
    pub radius: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { side: DEFAULT_SIDE, radius: DEFAULT_RADIUS, height: DEFAULT_HEIGHT }
    }
}

impl Dimensions {
    /// Set one measurement, clamped to the slider range. Returns the value
    /// actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::NotFinite`] for NaN or infinite input; the
    /// stored value is left unchanged.
    pub fn set(&mut self, dim: Dimension, value: f64) -> Result<f64, DimensionError> {
        if !value.is_finite() {
            return Err(DimensionError::NotFinite(value));
        }
        let value = value.clamp(DIMENSION_MIN, DIMENSION_MAX);
        match dim {
            Dimension::Side => self.side = value,
            Dimension::Radius => self.radius = value,
            Dimension::Height => self.height = value,
        }
        Ok(value)
    }

    /// Volume of `shape` with these measurements.
    #[must_use]
    pub fn volume(&self, shape: ShapeKind) -> f64 {
        match shape {
            ShapeKind::Cube => self.side.powi(3),
            ShapeKind::Sphere => 4.0 / 3.0 * PI * self.radius.powi(3),
            ShapeKind::Cylinder => PI * self.radius * self.radius * self.height,
        }
    }

    /// Per-axis scale applied to the base geometry of `shape`.
    #[must_use]
    pub fn scale(&self, shape: ShapeKind) -> Vec3 {
        match shape {
            ShapeKind::Cube => Vec3::new(self.side, self.side, self.side),
            ShapeKind::Sphere => Vec3::new(self.radius, self.radius, self.radius),
            ShapeKind::Cylinder => Vec3::new(self.radius, self.height, self.radius),
        }
    }
}

/// Everything the HUD shows for the current shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeInfo {
    pub shape: ShapeKind,
    pub name: &'static str,
    pub formula: &'static str,
    /// `(symbol, meaning)` pairs explaining the formula's terms.
    pub terms: Vec<(&'static str, &'static str)>,
    /// Which dimension controls should be visible.
    pub controls: Vec<Dimension>,
    pub volume: f64,
    /// Volume formatted for display, e.g. `"3.38 u³"`.
    pub volume_text: String,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(shape: ShapeKind, dims: &Dimensions) -> Self {
        let (formula, terms): (&str, Vec<(&str, &str)>) = match shape {
            ShapeKind::Cube => (
                "V = side³",
                vec![("V", "volume of the cube"), ("side", "length of each edge of the cube")],
            ),
            ShapeKind::Sphere => (
                "V = (4/3) · π · radius³",
                vec![
                    ("V", "volume of the sphere"),
                    ("radius", "distance from the center of the sphere to its surface"),
                ],
            ),
            ShapeKind::Cylinder => (
                "V = π · radius² · height",
                vec![
                    ("V", "volume of the cylinder"),
                    ("radius", "radius of the circular base"),
                    ("height", "distance between the two bases"),
                ],
            ),
        };
        let volume = dims.volume(shape);
        Self {
            shape,
            name: shape.name(),
            formula,
            terms,
            controls: Dimension::for_shape(shape).to_vec(),
            volume,
            volume_text: format!("{volume:.2} u³"),
        }
    }
}
