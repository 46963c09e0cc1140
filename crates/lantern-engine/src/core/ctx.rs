use crate::window::WindowInfo;

/// Context passed to every `Game` callback.
///
/// Requests are buffered and applied after the current callback returns, so a
/// game can ask for its own window to be destroyed without invalidating the
/// borrow it is running under.
pub struct GameCtx<'a> {
    /// Attributes of the window the game is attached to.
    pub window: &'a WindowInfo,
    commands: Vec<Command>,
}

impl<'a> GameCtx<'a> {
    /// Context with an empty request buffer.
    ///
    /// `Application` builds one per callback; games can build their own to
    /// drive callbacks directly.
    pub fn new(window: &'a WindowInfo) -> Self {
        Self {
            window,
            commands: Vec::new(),
        }
    }

    /// Destroys the window this game is attached to.
    pub fn destroy_window(&mut self) {
        self.commands.push(Command::DestroyWindow);
    }

    /// Stops the run loop with `code` once the current pass completes.
    pub fn quit(&mut self, code: i32) {
        self.commands.push(Command::Quit(code));
    }

    pub fn destroy_requested(&self) -> bool {
        self.commands.contains(&Command::DestroyWindow)
    }

    /// Most recent quit code requested during this callback.
    pub fn quit_requested(&self) -> Option<i32> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Quit(code) => Some(*code),
            Command::DestroyWindow => None,
        })
    }

    pub(crate) fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Command {
    DestroyWindow,
    Quit(i32),
}
