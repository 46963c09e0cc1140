//! Time subsystem.
//!
//! Frame timing for the application loop:
//! - one `FrameClock` per run loop
//! - call `tick()` once per idle update/render pass to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
