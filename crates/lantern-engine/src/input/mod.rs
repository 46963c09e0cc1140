//! Input records delivered to games.
//!
//! Public types are platform-agnostic and do not expose winit types.
//! Backends translate platform events into these records.

mod events;
pub mod platform;
mod state;
mod types;

pub use events::{KeyEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent, ResizeEvent};
pub use state::InputState;
pub use types::{Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseButtons};
