use std::fmt;

use crate::core::{Command, Game, GameCtx};

use super::backend::NativeEvent;

/// Opaque identifier of a native window, assigned by the backend.
///
/// Ordering follows creation order for both shipped backends, which is the
/// order windows are updated and rendered in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parameters for `Application::create_render_window`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub windowed: bool,
}

impl WindowDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_windowed(mut self, windowed: bool) -> Self {
        self.windowed = windowed;
        self
    }
}

impl Default for WindowDesc {
    fn default() -> Self {
        Self {
            name: "lantern".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            windowed: true,
        }
    }
}

/// Attributes of a registered window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowInfo {
    /// `None` only for the invalid sentinel.
    pub handle: Option<WindowHandle>,
    pub name: String,
    pub client_width: u32,
    pub client_height: u32,
    pub vsync: bool,
    pub windowed: bool,
}

impl WindowInfo {
    pub(crate) fn from_desc(handle: WindowHandle, desc: &WindowDesc) -> Self {
        Self {
            handle: Some(handle),
            name: desc.name.clone(),
            client_width: desc.width.max(1),
            client_height: desc.height.max(1),
            vsync: desc.vsync,
            windowed: desc.windowed,
        }
    }
}

/// A registered native window plus the game driving it.
pub struct Window {
    info: WindowInfo,
    game: Option<Box<dyn Game>>,
}

impl Window {
    pub(crate) fn new(info: WindowInfo) -> Self {
        Self { info, game: None }
    }

    pub(crate) fn invalid() -> Self {
        Self::new(WindowInfo::default())
    }

    /// `false` for the sentinel returned when a lookup or creation fails.
    pub fn is_valid(&self) -> bool {
        self.info.handle.is_some()
    }

    pub fn info(&self) -> &WindowInfo {
        &self.info
    }

    pub fn handle(&self) -> Option<WindowHandle> {
        self.info.handle
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn client_width(&self) -> u32 {
        self.info.client_width
    }

    pub fn client_height(&self) -> u32 {
        self.info.client_height
    }

    pub fn vsync(&self) -> bool {
        self.info.vsync
    }

    pub fn is_windowed(&self) -> bool {
        self.info.windowed
    }

    pub fn has_game(&self) -> bool {
        self.game.is_some()
    }

    /// Binds `game` to this window. Only the first attachment succeeds.
    pub(crate) fn attach_game(&mut self, game: Box<dyn Game>) -> bool {
        if !self.is_valid() || self.game.is_some() {
            return false;
        }
        self.game = Some(game);
        true
    }

    /// Runs `f` against the attached game. Returns the requests it buffered,
    /// or nothing when no game is attached.
    pub(crate) fn with_game<F>(&mut self, f: F) -> Vec<Command>
    where
        F: FnOnce(&mut dyn Game, &mut GameCtx<'_>),
    {
        let Some(game) = self.game.as_deref_mut() else {
            return Vec::new();
        };
        let mut ctx = GameCtx::new(&self.info);
        f(game, &mut ctx);
        ctx.into_commands()
    }

    /// Forwards an input or resize event to the attached game.
    ///
    /// Resize is clamped to at least 1x1 and stored before the game sees it.
    /// Close and destroy are lifecycle events owned by the application and are
    /// ignored here.
    pub(crate) fn deliver(&mut self, event: &NativeEvent) -> Vec<Command> {
        if let NativeEvent::Resized(r) = event {
            let r = r.clamped();
            self.info.client_width = r.width;
            self.info.client_height = r.height;
            return self.with_game(|g, ctx| g.on_resize(ctx, &r));
        }

        self.with_game(|g, ctx| match event {
            NativeEvent::KeyPressed(e) => g.on_key_pressed(ctx, e),
            NativeEvent::KeyReleased(e) => g.on_key_released(ctx, e),
            NativeEvent::MouseMoved(e) => g.on_mouse_moved(ctx, e),
            NativeEvent::MouseButtonPressed(e) => g.on_mouse_button_pressed(ctx, e),
            NativeEvent::MouseButtonReleased(e) => g.on_mouse_button_released(ctx, e),
            NativeEvent::MouseWheel(e) => g.on_mouse_wheel(ctx, e),
            NativeEvent::Resized(_) | NativeEvent::CloseRequested | NativeEvent::Destroyed => {}
        })
    }

    /// Notifies the game that the window is going away and detaches it.
    pub(crate) fn notify_destroy(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.on_window_destroy();
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("info", &self.info)
            .field("has_game", &self.game.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ResizeEvent;

    struct Nop;
    impl Game for Nop {}

    fn window() -> Window {
        Window::new(WindowInfo::from_desc(
            WindowHandle(1),
            &WindowDesc::new("w").with_size(320, 240),
        ))
    }

    #[test]
    fn sentinel_is_invalid_and_refuses_games() {
        let mut w = Window::invalid();
        assert!(!w.is_valid());
        assert!(!w.attach_game(Box::new(Nop)));
        assert!(!w.has_game());
    }

    #[test]
    fn attach_is_one_shot() {
        let mut w = window();
        assert!(w.attach_game(Box::new(Nop)));
        assert!(!w.attach_game(Box::new(Nop)));
    }

    #[test]
    fn resize_is_clamped_and_stored_without_game() {
        let mut w = window();
        let cmds = w.deliver(&NativeEvent::Resized(ResizeEvent { width: 0, height: 0 }));
        assert!(cmds.is_empty());
        assert_eq!((w.client_width(), w.client_height()), (1, 1));
    }

    #[test]
    fn desc_builder_and_info() {
        let desc = WindowDesc::new("demo").with_size(800, 600).with_vsync(false);
        let info = WindowInfo::from_desc(WindowHandle(7), &desc);
        assert_eq!(info.name, "demo");
        assert!(!info.vsync);
        assert!(info.windowed);
        assert_eq!((info.client_width, info.client_height), (800, 600));
    }
}
