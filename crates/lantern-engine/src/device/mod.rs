//! GPU device and swap-chain bootstrap.
//!
//! Owns the wgpu device, queue and window surface, plus the depth buffer that
//! tracks the surface size.

mod gpu;
mod init;
mod surface;

pub use gpu::{DEPTH_FORMAT, Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
