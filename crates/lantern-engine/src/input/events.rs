//! Structured event records handed to game callbacks.
//!
//! Pointer coordinates are client-relative logical pixels (origin top-left).

use super::types::{Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseButtons};

/// A key went down or up.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    /// Character the key produces under the current layout, if printable.
    pub character: Option<char>,
    pub state: KeyState,
    pub modifiers: Modifiers,
    /// True for auto-repeat presses.
    pub repeat: bool,
}

/// The pointer moved over the client area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMotionEvent {
    pub x: f32,
    pub y: f32,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

/// A mouse button changed state.
///
/// `buttons` already reflects the change (a left press reports `left: true`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

/// The wheel turned.
///
/// `delta` is in wheel notches; positive means away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseWheelEvent {
    pub delta: f32,
    pub x: f32,
    pub y: f32,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

/// New client-area size in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
}

impl ResizeEvent {
    /// Same event with both dimensions raised to at least one pixel.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}
