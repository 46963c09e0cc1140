//! Coordinate and geometry types shared by the camera and the device layer.
//!
//! Canonical window space:
//! - client-area pixels
//! - origin top-left
//! - +X right, +Y down

mod viewport;

pub use viewport::Viewport;
