use crate::input::{KeyEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent, ResizeEvent};
use crate::time::FrameTime;

use super::ctx::GameCtx;

/// Contract implemented by code that drives one window.
///
/// Every method has a no-op default so games only override what they use.
pub trait Game {
    /// Advances simulation state. Called once per idle iteration, before `on_render`.
    fn on_update(&mut self, ctx: &mut GameCtx<'_>, time: &FrameTime) {
        let _ = (ctx, time);
    }

    /// Draws the current frame.
    fn on_render(&mut self, ctx: &mut GameCtx<'_>, time: &FrameTime) {
        let _ = (ctx, time);
    }

    fn on_key_pressed(&mut self, ctx: &mut GameCtx<'_>, event: &KeyEvent) {
        let _ = (ctx, event);
    }

    fn on_key_released(&mut self, ctx: &mut GameCtx<'_>, event: &KeyEvent) {
        let _ = (ctx, event);
    }

    fn on_mouse_moved(&mut self, ctx: &mut GameCtx<'_>, event: &MouseMotionEvent) {
        let _ = (ctx, event);
    }

    fn on_mouse_button_pressed(&mut self, ctx: &mut GameCtx<'_>, event: &MouseButtonEvent) {
        let _ = (ctx, event);
    }

    fn on_mouse_button_released(&mut self, ctx: &mut GameCtx<'_>, event: &MouseButtonEvent) {
        let _ = (ctx, event);
    }

    fn on_mouse_wheel(&mut self, ctx: &mut GameCtx<'_>, event: &MouseWheelEvent) {
        let _ = (ctx, event);
    }

    /// Client area changed size. `ctx.window` already holds the new size.
    fn on_resize(&mut self, ctx: &mut GameCtx<'_>, event: &ResizeEvent) {
        let _ = (ctx, event);
    }

    /// The window is about to be torn down. Called exactly once, before the
    /// native window is destroyed.
    fn on_window_destroy(&mut self) {}
}
