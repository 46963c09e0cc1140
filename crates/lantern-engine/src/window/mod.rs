//! Window registry, event dispatch and run loop.
//!
//! `Application` owns every window and routes backend messages to the game
//! attached to each one. Backends hide the native windowing layer: winit on
//! desktop, an in-memory queue for tests and headless runs.

mod application;
mod backend;
mod window;
mod winit_backend;

pub use application::Application;
pub use backend::{HeadlessBackend, NativeEvent, NativeMessage, WindowBackend};
pub use window::{Window, WindowDesc, WindowHandle, WindowInfo};
pub use winit_backend::WinitBackend;
