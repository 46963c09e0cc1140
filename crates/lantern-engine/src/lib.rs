//! Lantern engine crate.
//!
//! Owns the platform shell used by the demos: a window registry with input
//! dispatch, a lazily cached camera, frame timing, and the wgpu device bootstrap.

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
