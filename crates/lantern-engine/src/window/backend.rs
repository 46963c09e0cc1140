use std::collections::{HashSet, VecDeque};

use anyhow::{Result, bail};

use crate::input::{KeyEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent, ResizeEvent};

use super::window::{WindowDesc, WindowHandle};

/// A decoded event for one window.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    MouseMoved(MouseMotionEvent),
    MouseButtonPressed(MouseButtonEvent),
    MouseButtonReleased(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
    Resized(ResizeEvent),
    /// The user asked to close the window.
    CloseRequested,
    /// The native window is already gone.
    Destroyed,
}

/// One message taken from the backend queue.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeMessage {
    Window {
        handle: WindowHandle,
        event: NativeEvent,
    },
    /// The platform asked the process to exit.
    Quit(i32),
}

/// Native windowing layer used by `Application`.
pub trait WindowBackend {
    /// Creates a hidden native window sized so its client area matches `desc`.
    fn create_window(&mut self, desc: &WindowDesc) -> Result<WindowHandle>;

    fn show_window(&mut self, handle: WindowHandle);

    /// Destroys the native window. Unknown handles are ignored.
    fn destroy_window(&mut self, handle: WindowHandle);

    /// Removes and returns the next pending message without blocking.
    fn peek_message(&mut self) -> Option<NativeMessage>;
}

/// In-memory backend with a scripted message queue.
///
/// Nothing is drawn. Tests and headless runs push messages with `post`.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: HashSet<WindowHandle>,
    queue: VecDeque<NativeMessage>,
    fail_next_create: bool,
    created: Vec<WindowDesc>,
    shown: Vec<WindowHandle>,
    destroyed: Vec<WindowHandle>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a window event.
    pub fn post(&mut self, handle: WindowHandle, event: NativeEvent) {
        self.queue.push_back(NativeMessage::Window { handle, event });
    }

    /// Queues a platform quit message.
    pub fn post_quit(&mut self, code: i32) {
        self.queue.push_back(NativeMessage::Quit(code));
    }

    /// Makes the next `create_window` call fail.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    pub fn is_live(&self, handle: WindowHandle) -> bool {
        self.live.contains(&handle)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn created(&self) -> &[WindowDesc] {
        &self.created
    }

    pub fn shown(&self) -> &[WindowHandle] {
        &self.shown
    }

    pub fn destroyed(&self) -> &[WindowHandle] {
        &self.destroyed
    }
}

impl WindowBackend for HeadlessBackend {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<WindowHandle> {
        if std::mem::take(&mut self.fail_next_create) {
            bail!("headless backend: scripted failure creating {:?}", desc.name);
        }

        self.next_handle += 1;
        let handle = WindowHandle(self.next_handle);
        self.live.insert(handle);
        self.created.push(desc.clone());
        Ok(handle)
    }

    fn show_window(&mut self, handle: WindowHandle) {
        if self.live.contains(&handle) {
            self.shown.push(handle);
        }
    }

    fn destroy_window(&mut self, handle: WindowHandle) {
        if self.live.remove(&handle) {
            self.destroyed.push(handle);
        }
    }

    fn peek_message(&mut self) -> Option<NativeMessage> {
        self.queue.pop_front()
    }
}
