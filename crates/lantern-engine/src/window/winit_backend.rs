use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{debug, trace, warn};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

use crate::input::InputState;
use crate::input::platform::winit::translate_window_event;

use super::backend::{NativeEvent, NativeMessage, WindowBackend};
use super::window::{WindowDesc, WindowHandle};

/// Desktop backend over a non-blocking winit event loop.
///
/// The loop is pumped with a zero timeout whenever the queue runs dry, so
/// `peek_message` never blocks. Window creation also goes through a pump,
/// since winit only creates windows from inside its callbacks.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    state: PumpState,
    exited: bool,
}

struct WindowEntry {
    window: Arc<Window>,
    input: InputState,
}

#[derive(Default)]
struct PumpState {
    next_handle: u64,
    windows: HashMap<WindowHandle, WindowEntry>,
    ids: HashMap<WindowId, WindowHandle>,
    queue: VecDeque<NativeMessage>,

    request: Option<WindowDesc>,
    created: Option<Result<WindowHandle>>,
}

impl WinitBackend {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        Ok(Self {
            event_loop,
            state: PumpState::default(),
            exited: false,
        })
    }

    /// Native window behind `handle`, for surface creation.
    pub fn native_window(&self, handle: WindowHandle) -> Option<Arc<Window>> {
        self.state.windows.get(&handle).map(|e| Arc::clone(&e.window))
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);

        if let PumpStatus::Exit(code) = status {
            debug!("winit event loop exited with code {code}");
            self.exited = true;
            self.state.queue.push_back(NativeMessage::Quit(code));
        }
    }
}

impl WindowBackend for WinitBackend {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<WindowHandle> {
        if self.exited {
            return Err(anyhow!("event loop has exited"));
        }

        self.state.request = Some(desc.clone());
        self.pump();
        self.state.request = None;

        self.state
            .created
            .take()
            .unwrap_or_else(|| Err(anyhow!("event loop did not service the window request")))
            .with_context(|| format!("failed to create window {:?}", desc.name))
    }

    fn show_window(&mut self, handle: WindowHandle) {
        if let Some(entry) = self.state.windows.get(&handle) {
            entry.window.set_visible(true);
            entry.window.focus_window();
        }
    }

    fn destroy_window(&mut self, handle: WindowHandle) {
        let Some(entry) = self.state.windows.remove(&handle) else {
            return;
        };
        self.state.ids.remove(&entry.window.id());

        // Other owners (a GPU surface) may keep the window alive a bit longer.
        entry.window.set_visible(false);
        if Arc::strong_count(&entry.window) > 1 {
            warn!("window {handle} destroyed while still referenced elsewhere");
        }
    }

    fn peek_message(&mut self) -> Option<NativeMessage> {
        if self.state.queue.is_empty() {
            self.pump();
        }
        self.state.queue.pop_front()
    }
}

impl PumpState {
    fn service_request(&mut self, event_loop: &ActiveEventLoop) {
        let Some(desc) = self.request.take() else {
            return;
        };
        self.created = Some(self.create(event_loop, &desc));
    }

    fn create(&mut self, event_loop: &ActiveEventLoop, desc: &WindowDesc) -> Result<WindowHandle> {
        let mut attrs = Window::default_attributes()
            .with_title(desc.name.clone())
            .with_inner_size(PhysicalSize::new(desc.width.max(1), desc.height.max(1)))
            .with_visible(false);

        if !desc.windowed {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("winit refused to create window")?;

        self.next_handle += 1;
        let handle = WindowHandle(self.next_handle);

        self.ids.insert(window.id(), handle);
        self.windows.insert(
            handle,
            WindowEntry {
                window: Arc::new(window),
                input: InputState::default(),
            },
        );

        Ok(handle)
    }
}

impl ApplicationHandler for PumpState {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.service_request(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.service_request(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(&handle) = self.ids.get(&window_id) else {
            trace!("event for unknown window {window_id:?}: {event:?}");
            return;
        };
        let Some(entry) = self.windows.get_mut(&handle) else {
            return;
        };

        let scale = entry.window.scale_factor();
        let Some(event) = translate_window_event(scale, &mut entry.input, &event) else {
            return;
        };

        if event == NativeEvent::Destroyed {
            self.ids.remove(&window_id);
            self.windows.remove(&handle);
        }

        self.queue.push_back(NativeMessage::Window { handle, event });
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.service_request(event_loop);
    }
}
