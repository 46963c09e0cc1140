//! Camera utilities.
//!
//! The camera is a tool owned and driven by game code; the engine never stores
//! cameras. Renderers read its matrices when building per-frame constants.

mod camera;

pub use camera::{Camera, Handedness, Space};
