use super::types::{Modifiers, MouseButton, MouseButtons};

/// Per-window input bookkeeping used while decoding platform events.
///
/// Window systems report modifiers, cursor position and button changes as
/// separate events; this keeps the latest of each so every decoded record
/// carries a complete snapshot.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Last pointer position in logical pixels; `None` once the pointer left.
    pub pointer_pos: Option<(f32, f32)>,

    /// Currently held primary buttons.
    pub buttons: MouseButtons,
}

impl InputState {
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Releases that happen while unfocused are never reported.
            self.buttons = MouseButtons::default();
            self.modifiers = Modifiers::default();
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_pos = Some((x, y));
    }

    pub fn pointer_left(&mut self) {
        self.pointer_pos = None;
    }

    /// Records a button change and returns the held set after it.
    pub fn button_changed(&mut self, button: MouseButton, down: bool) -> MouseButtons {
        self.buttons.set(button, down);
        self.buttons
    }

    /// Pointer position, or the origin if the pointer has not entered yet.
    pub fn pointer_or_origin(&self) -> (f32, f32) {
        self.pointer_pos.unwrap_or((0.0, 0.0))
    }
}
