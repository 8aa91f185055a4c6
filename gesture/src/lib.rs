//! Hand-gesture input engine for the geometry viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to a
//! hand tracker. Each tracker callback hands the engine 21 normalized hand
//! landmarks; the engine turns them into a pointer that steers the primary
//! shape, a debounced pinch "click", and a hover state for the virtual button
//! drawn over the webcam feed. Clicks on the button cycle the primary shape,
//! clicks elsewhere go to the active subject/tool. The host JavaScript layer
//! owns the webcam, the tracker and the 3D renderer, and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`interpreter`] | Pinch/hover state machine and pointer mapping |
//! | [`landmark`] | Validated hand landmark sets |
//! | [`timer`] | Timestamp-based cooldown windows |
//! | [`router`] | Routes clicks to the button or the scene |
//! | [`mode`] | Subject and tool selection |
//! | [`scene`] | In-memory store of scene objects |
//! | [`shape`] | Primary shape kinds, dimensions and volume readout |
//! | [`camera`] | Vector math, perspective camera and smoothed orientation |
//! | [`hit`] | Ray casting against scene objects |
//! | [`render`] | Gesture overlay drawing |
//! | [`consts`] | Shared thresholds, timings and geometry constants |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod interpreter;
pub mod landmark;
pub mod mode;
pub mod render;
pub mod router;
pub mod scene;
pub mod shape;
pub mod timer;
