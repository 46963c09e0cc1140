use std::collections::{BTreeMap, HashMap};

use log::{debug, error, info, trace, warn};

use crate::core::{Command, Game};
use crate::time::{FrameClock, FrameTime};

use super::backend::{NativeEvent, NativeMessage, WindowBackend};
use super::window::{Window, WindowDesc, WindowHandle, WindowInfo};

/// Window registry and run loop.
///
/// Owns every window it creates; lookups that miss return an invalid sentinel
/// window instead of an error. All calls happen on the thread that owns the
/// application.
pub struct Application<B: WindowBackend> {
    backend: B,
    windows: BTreeMap<WindowHandle, Window>,
    by_name: HashMap<String, WindowHandle>,
    invalid: Window,
    clock: FrameClock,
    quit: Option<i32>,
}

impl<B: WindowBackend> Application<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            windows: BTreeMap::new(),
            by_name: HashMap::new(),
            invalid: Window::invalid(),
            clock: FrameClock::new(),
            quit: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Creates and shows a window, or returns the one already registered under
    /// `desc.name`.
    ///
    /// Returns the invalid sentinel if the backend fails.
    pub fn create_render_window(&mut self, desc: WindowDesc) -> &Window {
        if let Some(&handle) = self.by_name.get(&desc.name) {
            warn!("window {:?} already exists ({handle}); returning it", desc.name);
            return self.window(handle);
        }

        let handle = match self.backend.create_window(&desc) {
            Ok(h) => h,
            Err(err) => {
                error!("failed to create window {:?}: {err:#}", desc.name);
                return &self.invalid;
            }
        };

        self.windows
            .insert(handle, Window::new(WindowInfo::from_desc(handle, &desc)));
        self.by_name.insert(desc.name.clone(), handle);
        self.backend.show_window(handle);

        info!(
            "created window {:?} ({handle}, {}x{}, vsync={}, windowed={})",
            desc.name, desc.width, desc.height, desc.vsync, desc.windowed
        );

        self.window(handle)
    }

    /// Destroys the window registered under `name`. Unknown names are ignored.
    pub fn destroy_window(&mut self, name: &str) {
        match self.by_name.get(name) {
            Some(&handle) => self.destroy_window_by_handle(handle),
            None => warn!("destroy_window: no window named {name:?}"),
        }
    }

    /// Destroys the window with `handle`. Unknown handles are ignored.
    ///
    /// The attached game is notified before the native window goes away.
    pub fn destroy_window_by_handle(&mut self, handle: WindowHandle) {
        self.teardown(handle, true);
    }

    /// Registered window with `name`, or the invalid sentinel.
    pub fn window_by_name(&self, name: &str) -> &Window {
        match self.by_name.get(name) {
            Some(handle) => self.window(*handle),
            None => &self.invalid,
        }
    }

    /// Registered window with `handle`, or the invalid sentinel.
    pub fn window(&self, handle: WindowHandle) -> &Window {
        self.windows.get(&handle).unwrap_or(&self.invalid)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Binds `game` to the window with `handle`.
    ///
    /// Returns `false` if there is no such window or it already has a game.
    pub fn attach_game(&mut self, handle: WindowHandle, game: Box<dyn Game>) -> bool {
        let Some(window) = self.windows.get_mut(&handle) else {
            warn!("attach_game: no window {handle}");
            return false;
        };

        if !window.attach_game(game) {
            warn!("attach_game: window {:?} already has a game", window.name());
            return false;
        }

        debug!("game attached to window {:?}", window.name());
        true
    }

    /// Requests the run loop to stop with `code`.
    ///
    /// Takes effect at the start of the next loop iteration. A later request
    /// replaces the code, including the implicit `quit(0)` posted when the last
    /// window is destroyed.
    pub fn quit(&mut self, code: i32) {
        debug!("quit requested with code {code}");
        self.quit = Some(code);
    }

    /// Routes one backend message.
    ///
    /// Returns `true` if the message was a quit or targeted a registered window.
    pub fn dispatch(&mut self, message: NativeMessage) -> bool {
        let (handle, event) = match message {
            NativeMessage::Quit(code) => {
                self.quit(code);
                return true;
            }
            NativeMessage::Window { handle, event } => (handle, event),
        };

        let Some(window) = self.windows.get_mut(&handle) else {
            trace!("dropping {event:?} for unregistered window {handle}");
            return false;
        };

        trace!("dispatch {event:?} to {handle}");

        match event {
            NativeEvent::CloseRequested => self.teardown(handle, true),
            NativeEvent::Destroyed => self.teardown(handle, false),
            event => {
                let commands = window.deliver(&event);
                self.apply_commands(handle, commands);
            }
        }

        true
    }

    /// Runs until a quit is requested and returns its exit code.
    ///
    /// Each iteration handles one pending message; when none is pending, every
    /// window is updated then rendered in handle order.
    pub fn run(&mut self) -> i32 {
        info!("entering run loop with {} window(s)", self.windows.len());
        self.clock.reset();

        loop {
            if let Some(code) = self.quit.take() {
                info!("run loop finished with code {code}");
                return code;
            }

            match self.backend.peek_message() {
                Some(message) => {
                    self.dispatch(message);
                }
                None => {
                    let time = self.clock.tick();
                    self.frame(&time);
                }
            }
        }
    }

    /// Updates then renders every window in handle order.
    ///
    /// Requests from `on_update` are applied before `on_render`, so a window
    /// destroyed during its update is not rendered.
    fn frame(&mut self, time: &FrameTime) {
        let handles: Vec<WindowHandle> = self.windows.keys().copied().collect();

        for handle in handles {
            let Some(window) = self.windows.get_mut(&handle) else {
                continue;
            };
            let commands = window.with_game(|g, ctx| g.on_update(ctx, time));
            self.apply_commands(handle, commands);

            let Some(window) = self.windows.get_mut(&handle) else {
                continue;
            };
            let commands = window.with_game(|g, ctx| g.on_render(ctx, time));
            self.apply_commands(handle, commands);
        }
    }

    fn apply_commands(&mut self, handle: WindowHandle, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::DestroyWindow => self.destroy_window_by_handle(handle),
                Command::Quit(code) => self.quit(code),
            }
        }
    }

    fn teardown(&mut self, handle: WindowHandle, destroy_native: bool) {
        let Some(window) = self.windows.get_mut(&handle) else {
            trace!("teardown: window {handle} already gone");
            return;
        };

        window.notify_destroy();

        if destroy_native {
            self.backend.destroy_window(handle);
        }

        if let Some(window) = self.windows.remove(&handle) {
            self.by_name.remove(window.name());
            info!("destroyed window {:?} ({handle})", window.name());
        }

        if self.windows.is_empty() {
            debug!("last window closed");
            self.quit(0);
        }
    }
}

impl<B: WindowBackend> Drop for Application<B> {
    fn drop(&mut self) {
        let handles: Vec<WindowHandle> = self.windows.keys().copied().collect();
        for handle in handles {
            self.teardown(handle, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::GameCtx;
    use crate::input::{
        Key, KeyEvent, KeyState, Modifiers, MouseButton, MouseButtonEvent, MouseButtonState,
        MouseButtons, MouseMotionEvent, MouseWheelEvent, ResizeEvent,
    };
    use crate::window::HeadlessBackend;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Game that records every callback as `"<tag>:<callback>"`.
    struct Recorder {
        tag: &'static str,
        log: Log,
        quit_on_render: Option<(u32, i32)>,
        destroy_on_key: bool,
        destroy_on_update: bool,
        renders: u32,
    }

    impl Recorder {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self {
                tag,
                log: Rc::clone(log),
                quit_on_render: None,
                destroy_on_key: false,
                destroy_on_update: false,
                renders: 0,
            }
        }

        fn push(&self, what: impl std::fmt::Display) {
            self.log.borrow_mut().push(format!("{}:{what}", self.tag));
        }
    }

    impl Game for Recorder {
        fn on_update(&mut self, ctx: &mut GameCtx<'_>, _time: &FrameTime) {
            self.push("update");
            if self.destroy_on_update {
                ctx.destroy_window();
            }
        }

        fn on_render(&mut self, ctx: &mut GameCtx<'_>, _time: &FrameTime) {
            self.push("render");
            self.renders += 1;
            if let Some((after, code)) = self.quit_on_render {
                if self.renders >= after {
                    ctx.quit(code);
                }
            }
        }

        fn on_key_pressed(&mut self, ctx: &mut GameCtx<'_>, event: &KeyEvent) {
            self.push(format!("key {}", event.key));
            if self.destroy_on_key {
                ctx.destroy_window();
            }
        }

        fn on_key_released(&mut self, _ctx: &mut GameCtx<'_>, event: &KeyEvent) {
            self.push(format!("key up {} {:?}", event.key, event.modifiers));
        }

        fn on_mouse_moved(&mut self, _ctx: &mut GameCtx<'_>, e: &MouseMotionEvent) {
            self.push(format!("move {},{}", e.x, e.y));
        }

        fn on_mouse_button_pressed(&mut self, _ctx: &mut GameCtx<'_>, e: &MouseButtonEvent) {
            self.push(format!("button down {:?} {},{} {:?}", e.button, e.x, e.y, e.buttons));
        }

        fn on_mouse_button_released(&mut self, _ctx: &mut GameCtx<'_>, e: &MouseButtonEvent) {
            self.push(format!("button up {:?} {},{} {:?}", e.button, e.x, e.y, e.buttons));
        }

        fn on_mouse_wheel(&mut self, _ctx: &mut GameCtx<'_>, e: &MouseWheelEvent) {
            self.push(format!("wheel {} {:?} {:?}", e.delta, e.buttons, e.modifiers));
        }

        fn on_resize(&mut self, ctx: &mut GameCtx<'_>, e: &ResizeEvent) {
            self.push(format!(
                "resize {}x{} info {}x{}",
                e.width, e.height, ctx.window.client_width, ctx.window.client_height
            ));
        }

        fn on_window_destroy(&mut self) {
            self.push("destroy");
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn app() -> Application<HeadlessBackend> {
        Application::new(HeadlessBackend::new())
    }

    fn create(app: &mut Application<HeadlessBackend>, name: &str) -> WindowHandle {
        app.create_render_window(WindowDesc::new(name).with_size(640, 480))
            .handle()
            .unwrap()
    }

    fn key(k: Key) -> NativeEvent {
        NativeEvent::KeyPressed(KeyEvent {
            key: k,
            character: None,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        })
    }

    fn motion(x: f32, y: f32) -> NativeEvent {
        NativeEvent::MouseMoved(MouseMotionEvent {
            x,
            y,
            buttons: MouseButtons::default(),
            modifiers: Modifiers::default(),
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    // ── registry ─────────────────────────────────────────────────────────

    #[test]
    fn create_is_idempotent_by_name() {
        let mut app = app();
        let a1 = create(&mut app, "A");
        let a2 = create(&mut app, "A");
        let b = create(&mut app, "B");

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(app.window_count(), 2);
        assert_eq!(app.backend().created().len(), 2);
        assert_eq!(app.window_by_name("A").handle(), Some(a1));
        assert_eq!(app.window_by_name("B").handle(), Some(b));
    }

    #[test]
    fn created_window_is_shown_with_requested_attributes() {
        let mut app = app();
        let w = app.create_render_window(
            WindowDesc::new("main")
                .with_size(800, 600)
                .with_vsync(false)
                .with_windowed(true),
        );
        assert!(w.is_valid());
        assert_eq!((w.client_width(), w.client_height()), (800, 600));
        assert!(!w.vsync());
        assert!(w.is_windowed());

        let handle = w.handle().unwrap();
        assert_eq!(app.backend().shown(), &[handle]);
    }

    #[test]
    fn backend_failure_returns_sentinel() {
        let mut app = app();
        app.backend_mut().fail_next_create();

        assert!(!app.create_render_window(WindowDesc::new("A")).is_valid());
        assert_eq!(app.window_count(), 0);
        assert!(!app.window_by_name("A").is_valid());
    }

    #[test]
    fn unknown_lookups_return_sentinel() {
        let app = app();
        assert!(!app.window_by_name("nope").is_valid());
        assert!(!app.window(WindowHandle(99)).is_valid());
    }

    #[test]
    fn destroy_notifies_game_then_native() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        create(&mut app, "B");
        assert!(app.attach_game(h, Box::new(Recorder::new("a", &log))));

        app.destroy_window("A");

        assert_eq!(entries(&log), vec!["a:destroy"]);
        assert_eq!(app.backend().destroyed(), &[h]);
        assert!(!app.window_by_name("A").is_valid());
        assert!(!app.window(h).is_valid());
        assert_eq!(app.window_count(), 1);
    }

    #[test]
    fn destroy_unknown_is_noop() {
        let mut app = app();
        create(&mut app, "A");
        app.destroy_window("missing");
        app.destroy_window_by_handle(WindowHandle(1234));
        assert_eq!(app.window_count(), 1);
        assert!(app.backend().destroyed().is_empty());
    }

    #[test]
    fn name_can_be_reused_after_destroy() {
        let mut app = app();
        let first = create(&mut app, "A");
        app.destroy_window("A");
        let second = create(&mut app, "A");
        assert_ne!(first, second);
        assert!(app.window_by_name("A").is_valid());
    }

    // ── game attachment ──────────────────────────────────────────────────

    #[test]
    fn second_attach_is_rejected_and_first_keeps_events() {
        let first = log();
        let second = log();
        let mut app = app();
        let h = create(&mut app, "A");

        assert!(app.attach_game(h, Box::new(Recorder::new("first", &first))));
        assert!(!app.attach_game(h, Box::new(Recorder::new("second", &second))));

        assert!(app.dispatch(NativeMessage::Window { handle: h, event: key(Key::W) }));
        assert_eq!(entries(&first), vec!["first:key W"]);
        assert!(entries(&second).is_empty());
    }

    #[test]
    fn attach_to_missing_window_fails() {
        let log = log();
        let mut app = app();
        assert!(!app.attach_game(WindowHandle(5), Box::new(Recorder::new("x", &log))));
    }

    // ── dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn events_without_game_are_dropped() {
        let mut app = app();
        let h = create(&mut app, "A");
        assert!(app.dispatch(NativeMessage::Window { handle: h, event: motion(1.0, 2.0) }));
        assert_eq!(app.window_count(), 1);
    }

    #[test]
    fn unregistered_target_is_not_handled() {
        let mut app = app();
        assert!(!app.dispatch(NativeMessage::Window {
            handle: WindowHandle(77),
            event: key(Key::A),
        }));
    }

    #[test]
    fn resize_is_clamped_and_stored_before_forwarding() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        app.attach_game(h, Box::new(Recorder::new("a", &log)));

        app.dispatch(NativeMessage::Window {
            handle: h,
            event: NativeEvent::Resized(ResizeEvent { width: 0, height: 300 }),
        });

        assert_eq!(entries(&log), vec!["a:resize 1x300 info 1x300"]);
        assert_eq!(app.window(h).client_width(), 1);
        assert_eq!(app.window(h).client_height(), 300);
    }

    #[test]
    fn each_input_event_reaches_its_handler() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        app.attach_game(h, Box::new(Recorder::new("a", &log)));

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let held = MouseButtons {
            right: true,
            ..MouseButtons::default()
        };
        let button = |state| MouseButtonEvent {
            button: MouseButton::Right,
            state,
            x: 3.0,
            y: 4.0,
            buttons: MouseButtons {
                right: state == MouseButtonState::Pressed,
                ..MouseButtons::default()
            },
            modifiers: Modifiers::default(),
        };

        let events = [
            key(Key::A),
            NativeEvent::KeyReleased(KeyEvent {
                key: Key::A,
                character: Some('a'),
                state: KeyState::Released,
                modifiers: ctrl,
                repeat: false,
            }),
            motion(3.0, 4.0),
            NativeEvent::MouseButtonPressed(button(MouseButtonState::Pressed)),
            NativeEvent::MouseWheel(MouseWheelEvent {
                delta: -1.5,
                x: 3.0,
                y: 4.0,
                buttons: held,
                modifiers: ctrl,
            }),
            NativeEvent::MouseButtonReleased(button(MouseButtonState::Released)),
        ];
        for event in events {
            assert!(app.dispatch(NativeMessage::Window { handle: h, event }));
        }

        let held_dbg = format!("{held:?}");
        let none_dbg = format!("{:?}", MouseButtons::default());
        let ctrl_dbg = format!("{ctrl:?}");
        assert_eq!(
            entries(&log),
            vec![
                "a:key A".to_string(),
                format!("a:key up A {ctrl_dbg}"),
                "a:move 3,4".to_string(),
                format!("a:button down Right 3,4 {held_dbg}"),
                format!("a:wheel -1.5 {held_dbg} {ctrl_dbg}"),
                format!("a:button up Right 3,4 {none_dbg}"),
            ]
        );
    }

    #[test]
    fn close_requested_destroys_window() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        app.attach_game(h, Box::new(Recorder::new("a", &log)));

        app.dispatch(NativeMessage::Window { handle: h, event: NativeEvent::CloseRequested });

        assert_eq!(entries(&log), vec!["a:destroy"]);
        assert_eq!(app.backend().destroyed(), &[h]);
        assert_eq!(app.window_count(), 0);
    }

    #[test]
    fn native_destroyed_deregisters_without_native_call() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        create(&mut app, "B");
        app.attach_game(h, Box::new(Recorder::new("a", &log)));

        app.dispatch(NativeMessage::Window { handle: h, event: NativeEvent::Destroyed });

        assert_eq!(entries(&log), vec!["a:destroy"]);
        assert!(app.backend().destroyed().is_empty());
        assert!(!app.window_by_name("A").is_valid());
    }

    #[test]
    fn destroy_requested_from_callback_is_applied_after_it() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");
        create(&mut app, "B");

        let mut game = Recorder::new("a", &log);
        game.destroy_on_key = true;
        app.attach_game(h, Box::new(game));

        app.dispatch(NativeMessage::Window { handle: h, event: key(Key::Escape) });

        assert_eq!(entries(&log), vec!["a:key Escape", "a:destroy"]);
        assert_eq!(app.window_count(), 1);
    }

    // ── run loop ─────────────────────────────────────────────────────────

    #[test]
    fn destroying_last_window_ends_run_with_zero() {
        let mut app = app();
        let h = create(&mut app, "A");
        app.backend_mut().post(h, NativeEvent::CloseRequested);

        assert_eq!(app.run(), 0);
        assert_eq!(app.window_count(), 0);
    }

    #[test]
    fn platform_quit_code_is_returned() {
        let mut app = app();
        create(&mut app, "A");
        app.backend_mut().post_quit(7);
        assert_eq!(app.run(), 7);
    }

    #[test]
    fn messages_drain_before_frames() {
        let log = log();
        let mut app = app();
        let h = create(&mut app, "A");

        let mut game = Recorder::new("a", &log);
        game.quit_on_render = Some((1, 0));
        app.attach_game(h, Box::new(game));

        app.backend_mut().post(h, motion(1.0, 1.0));
        app.backend_mut().post(h, motion(2.0, 2.0));

        assert_eq!(app.run(), 0);
        assert_eq!(
            entries(&log),
            vec!["a:move 1,1", "a:move 2,2", "a:update", "a:render"]
        );
        assert_eq!(app.backend().pending(), 0);
    }

    #[test]
    fn frames_visit_windows_in_handle_order() {
        let log = log();
        let mut app = app();
        let a = create(&mut app, "A");
        let b = create(&mut app, "B");

        app.attach_game(b, Box::new(Recorder::new("b", &log)));
        let mut game = Recorder::new("a", &log);
        game.quit_on_render = Some((2, 3));
        app.attach_game(a, Box::new(game));

        assert_eq!(app.run(), 3);
        assert_eq!(
            entries(&log),
            vec![
                "a:update", "a:render", "b:update", "b:render",
                "a:update", "a:render", "b:update", "b:render",
            ]
        );
    }

    #[test]
    fn last_window_close_replaces_pending_quit_code() {
        let mut app = app();
        let h = create(&mut app, "A");
        app.quit(5);
        app.destroy_window_by_handle(h);
        assert_eq!(app.run(), 0);
    }

    #[test]
    fn window_destroyed_in_update_is_not_rendered() {
        let log = log();
        let mut app = app();
        let a = create(&mut app, "A");
        let b = create(&mut app, "B");

        let mut game = Recorder::new("a", &log);
        game.destroy_on_update = true;
        app.attach_game(a, Box::new(game));
        let mut other = Recorder::new("b", &log);
        other.quit_on_render = Some((1, 2));
        app.attach_game(b, Box::new(other));

        assert_eq!(app.run(), 2);
        assert_eq!(
            entries(&log),
            vec!["a:update", "a:destroy", "b:update", "b:render"]
        );
    }

    #[test]
    fn drop_tears_down_remaining_windows() {
        let log = log();
        {
            let mut app = app();
            let a = create(&mut app, "A");
            let b = create(&mut app, "B");
            app.attach_game(a, Box::new(Recorder::new("a", &log)));
            app.attach_game(b, Box::new(Recorder::new("b", &log)));
        }
        assert_eq!(entries(&log), vec!["a:destroy", "b:destroy"]);
    }
}
