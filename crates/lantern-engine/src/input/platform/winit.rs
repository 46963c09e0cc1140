use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as LogicalKey, KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputState, Key, KeyEvent, KeyState, Modifiers, MouseButton, MouseButtonEvent,
    MouseButtonState, MouseMotionEvent, MouseWheelEvent, ResizeEvent,
};
use crate::window::NativeEvent;

/// Logical pixels of touchpad scroll counted as one wheel notch.
const WHEEL_PIXELS_PER_NOTCH: f32 = 40.0;

/// Translates a winit `WindowEvent` into an engine `NativeEvent`.
///
/// `state` is updated with modifier, focus, pointer and button changes so
/// every produced record carries a full snapshot. Returns `None` for events
/// that only update `state` or are not represented.
pub fn translate_window_event(
    scale_factor: f64,
    state: &mut InputState,
    event: &WindowEvent,
) -> Option<NativeEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            state.set_modifiers(map_modifiers(m.state()));
            None
        }

        WindowEvent::Focused(f) => {
            state.set_focused(*f);
            None
        }

        WindowEvent::CursorLeft { .. } => {
            state.pointer_left();
            None
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            state.pointer_moved(x, y);
            Some(NativeEvent::MouseMoved(MouseMotionEvent {
                x,
                y,
                buttons: state.buttons,
                modifiers: state.modifiers,
            }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);
            let pressed = *st == ElementState::Pressed;
            let buttons = state.button_changed(button, pressed);

            // winit 0.30 has no cursor query; use the tracked position.
            let (x, y) = state.pointer_or_origin();

            let ev = MouseButtonEvent {
                button,
                state: if pressed {
                    MouseButtonState::Pressed
                } else {
                    MouseButtonState::Released
                },
                x,
                y,
                buttons,
                modifiers: state.modifiers,
            };

            Some(if pressed {
                NativeEvent::MouseButtonPressed(ev)
            } else {
                NativeEvent::MouseButtonReleased(ev)
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => {
                    let (_, y) = to_logical_f32(scale_factor, *p);
                    y / WHEEL_PIXELS_PER_NOTCH
                }
            };
            let (x, y) = state.pointer_or_origin();

            Some(NativeEvent::MouseWheel(MouseWheelEvent {
                delta,
                x,
                y,
                buttons: state.buttons,
                modifiers: state.modifiers,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key);

            let character = event
                .text
                .as_ref()
                .and_then(|t| t.chars().next())
                .or_else(|| match &event.logical_key {
                    LogicalKey::Character(s) => s.chars().next(),
                    _ => None,
                })
                .filter(|c| !c.is_control());

            let ev = KeyEvent {
                key,
                character,
                state: match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                },
                modifiers: state.modifiers,
                repeat: event.repeat,
            };

            Some(match ev.state {
                KeyState::Pressed => NativeEvent::KeyPressed(ev),
                KeyState::Released => NativeEvent::KeyReleased(ev),
            })
        }

        WindowEvent::Resized(size) => Some(NativeEvent::Resized(ResizeEvent {
            width: size.width,
            height: size.height,
        })),

        WindowEvent::CloseRequested => Some(NativeEvent::CloseRequested),

        WindowEvent::Destroyed => Some(NativeEvent::Destroyed),

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        // SAFETY: the dummy id is only compared, never passed to the platform.
        unsafe { DeviceId::dummy() }
    }

    // ── key / button tables ──────────────────────────────────────────────

    #[test]
    fn arrows_and_letters_map() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowLeft)), Key::Left);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
    }

    #[test]
    fn unmapped_key_is_unknown() {
        assert!(matches!(
            map_key(PhysicalKey::Code(KeyCode::NumLock)),
            Key::Unknown(_)
        ));
    }

    #[test]
    fn modifiers_map() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert!(m.shift && m.meta);
        assert!(!m.ctrl && !m.alt);
    }

    // ── event translation ────────────────────────────────────────────────

    #[test]
    fn cursor_position_is_logical() {
        let mut state = InputState::default();
        let ev = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(200.0, 100.0),
        };

        match translate_window_event(2.0, &mut state, &ev) {
            Some(NativeEvent::MouseMoved(m)) => {
                assert_eq!((m.x, m.y), (100.0, 50.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.pointer_pos, Some((100.0, 50.0)));
    }

    #[test]
    fn button_press_carries_position_and_mask() {
        let mut state = InputState::default();
        state.pointer_moved(10.0, 20.0);

        let ev = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        };

        match translate_window_event(1.0, &mut state, &ev) {
            Some(NativeEvent::MouseButtonPressed(b)) => {
                assert_eq!(b.button, MouseButton::Left);
                assert_eq!((b.x, b.y), (10.0, 20.0));
                assert!(b.buttons.left);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn pixel_scroll_converts_to_notches() {
        let mut state = InputState::default();
        let ev = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)),
            phase: winit::event::TouchPhase::Moved,
        };

        match translate_window_event(1.0, &mut state, &ev) {
            Some(NativeEvent::MouseWheel(w)) => assert_eq!(w.delta, 2.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resize_and_close_pass_through() {
        let mut state = InputState::default();

        let ev = WindowEvent::Resized(PhysicalSize::new(640, 0));
        assert_eq!(
            translate_window_event(1.0, &mut state, &ev),
            Some(NativeEvent::Resized(ResizeEvent { width: 640, height: 0 }))
        );

        assert_eq!(
            translate_window_event(1.0, &mut state, &WindowEvent::CloseRequested),
            Some(NativeEvent::CloseRequested)
        );
    }

    #[test]
    fn focus_loss_is_absorbed() {
        let mut state = InputState::default();
        state.button_changed(MouseButton::Right, true);

        assert!(translate_window_event(1.0, &mut state, &WindowEvent::Focused(false)).is_none());
        assert!(!state.buttons.any());
    }
}
