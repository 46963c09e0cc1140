//! Game-facing contracts.
//!
//! A `Game` is attached to one window and receives that window's events plus
//! per-frame update and render calls. Requests back to the runtime go through
//! `GameCtx` and are applied once the callback returns.

mod ctx;
mod game;

pub use ctx::GameCtx;
pub(crate) use ctx::Command;
pub use game::Game;
