//! Application mode: the subject and tool the user picked in the host UI,
//! plus the selection and any half-finished vector.
//!
//! The host page owns the controls; it reports changes through
//! [`crate::engine::EngineCore::set_subject`] and
//! [`crate::engine::EngineCore::set_tool`] using the names accepted by
//! [`Subject::from_name`] and [`Tool::from_name`].

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use serde::{Deserialize, Serialize};

use crate::camera::Vec3;
use crate::scene::ObjectId;

/// Error returned when the host names a mode this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("unknown subject `{0}`")]
    UnknownSubject(String),
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
}

/// Which lesson the scene is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Solid shapes with volume formulas.
    #[default]
    Math,
    /// Astronomy system.
    Science,
    /// Paintable canvas.
    Arts,
}

impl Subject {
    /// Parse a host-side subject name.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownSubject`] for anything but `math`, `science`
    /// or `arts`.
    pub fn from_name(name: &str) -> Result<Self, ModeError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "math" => Ok(Self::Math),
            "science" => Ok(Self::Science),
            "arts" => Ok(Self::Arts),
            _ => Err(ModeError::UnknownSubject(name.to_string())),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::Arts => "arts",
        }
    }

    /// Whether the gesture button cycles the primary shape in this subject.
    #[must_use]
    pub fn cycles_shapes(self) -> bool {
        match self {
            Self::Math => true,
            Self::Science | Self::Arts => false,
        }
    }
}

/// What a scene click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select objects (the primary shape is steered by the pointer).
    Shape,
    /// Place a point.
    Point,
    /// Place two points and join them into a vector.
    Vector,
    /// Place a plane.
    Plane,
    /// Delete the clicked object.
    Erase,
    /// No tool: clicks only select.
    #[default]
    None,
}

impl Tool {
    /// Parse a host-side tool name.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownTool`] for unrecognised names.
    pub fn from_name(name: &str) -> Result<Self, ModeError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "shape" => Ok(Self::Shape),
            "point" => Ok(Self::Point),
            "vector" => Ok(Self::Vector),
            "plane" => Ok(Self::Plane),
            "erase" => Ok(Self::Erase),
            "none" | "" => Ok(Self::None),
            _ => Err(ModeError::UnknownTool(name.to_string())),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Point => "point",
            Self::Vector => "vector",
            Self::Plane => "plane",
            Self::Erase => "erase",
            Self::None => "none",
        }
    }
}

/// Mode state the router reads and updates.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub subject: Subject,
    pub tool: Tool,
    /// The last object a click selected.
    pub selected: Option<ObjectId>,
    /// First endpoint of a vector waiting for its second click.
    pub pending_vector_start: Option<Vec3>,
}
