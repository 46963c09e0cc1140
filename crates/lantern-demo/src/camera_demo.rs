use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};
use log::{error, info};

use lantern_engine::camera::{Camera, Space};
use lantern_engine::coords::Viewport;
use lantern_engine::core::{Game, GameCtx};
use lantern_engine::input::{Key, KeyEvent, MouseButtonEvent, MouseMotionEvent, ResizeEvent};
use lantern_engine::time::FrameTime;
use lantern_engine::window::WindowInfo;

use crate::frame_constants::FrameConstants;
use crate::renderer::Renderer;

const EYE: Vec3 = Vec3::new(0.0, 5.0, -20.0);
const TARGET: Vec3 = Vec3::new(0.0, 5.0, 0.0);

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

const MOVE_SPEED: f32 = 4.0;
const FAST_MOVE_SPEED: f32 = 8.0;
/// Degrees of pitch/yaw per pixel of left-drag.
const LOOK_SPEED: f32 = 0.5;

#[derive(Debug, Default, Copy, Clone)]
struct Controls {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    fast: bool,
}

impl Controls {
    /// Sets the flag bound to `key`. Returns `false` for unbound keys.
    fn set(&mut self, key: Key, down: bool) -> bool {
        let flag = match key {
            Key::W => &mut self.forward,
            Key::S => &mut self.back,
            Key::A | Key::Left => &mut self.left,
            Key::D | Key::Right => &mut self.right,
            Key::E | Key::Up => &mut self.up,
            Key::Q | Key::Down => &mut self.down,
            Key::Shift => &mut self.fast,
            _ => return false,
        };
        *flag = down;
        true
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    positive as i32 as f32 - negative as i32 as f32
}

/// Fly-through camera over the scene.
///
/// W/S move forward/back and A/D strafe in camera space; Q/E pan down/up in
/// world space; Shift doubles the speed; left-drag looks around; R resets;
/// Space toggles the world spin; Escape closes the window.
pub struct CameraDemo {
    camera: Camera,
    initial_translation: Vec3,
    initial_rotation: Quat,

    controls: Controls,
    pitch: f32,
    yaw: f32,
    last_pointer: (f32, f32),

    animate: bool,
    spin: f32,

    renderer: Option<Renderer>,
}

impl CameraDemo {
    /// `renderer` is `None` when running without a GPU.
    pub fn new(window: &WindowInfo, renderer: Option<Renderer>) -> Self {
        let mut camera = Camera::default();
        camera.set_look_at(EYE, TARGET, Vec3::Y);

        let mut demo = Self {
            initial_translation: camera.translation(),
            initial_rotation: camera.rotation(),
            camera,
            controls: Controls::default(),
            pitch: 0.0,
            yaw: 0.0,
            last_pointer: (0.0, 0.0),
            animate: false,
            spin: 0.0,
            renderer,
        };
        demo.apply_client_size(window.client_width, window.client_height);
        demo
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Spin of the world around +Y, in radians.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin)
    }

    fn reset_camera(&mut self) {
        self.camera.set_translation(self.initial_translation);
        self.camera.set_rotation(self.initial_rotation);
        self.pitch = 0.0;
        self.yaw = 0.0;
    }

    fn apply_client_size(&mut self, width: u32, height: u32) {
        let viewport = Viewport::from_client_size(width.max(1), height.max(1));

        self.camera
            .set_projection(FOV_Y_DEGREES, viewport.aspect_ratio(), Z_NEAR, Z_FAR);
        self.camera.set_viewport(viewport);
    }
}

impl Game for CameraDemo {
    fn on_update(&mut self, _ctx: &mut GameCtx<'_>, time: &FrameTime) {
        let c = self.controls;
        let speed = (if c.fast { FAST_MOVE_SPEED } else { MOVE_SPEED }) * time.dt;

        let local = Vec3::new(axis(c.right, c.left), 0.0, axis(c.forward, c.back)) * speed;
        let pan = Vec3::new(0.0, axis(c.up, c.down), 0.0) * speed;
        self.camera.translate(local, Space::Local);
        self.camera.translate(pan, Space::World);

        self.camera.set_rotation(Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        ));

        if self.animate {
            self.spin += time.dt * 0.5 * PI;
        }
    }

    fn on_render(&mut self, ctx: &mut GameCtx<'_>, _time: &FrameTime) {
        let constants = FrameConstants::new(&self.camera, self.world_matrix());
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if let Err(err) = renderer.draw(&constants) {
            error!("rendering {:?} failed: {err:#}", ctx.window.name);
            ctx.quit(1);
        }
    }

    fn on_key_pressed(&mut self, ctx: &mut GameCtx<'_>, event: &KeyEvent) {
        if self.controls.set(event.key, true) {
            return;
        }

        match event.key {
            Key::Escape => ctx.destroy_window(),
            Key::R => self.reset_camera(),
            Key::Space if !event.repeat => self.animate = !self.animate,
            _ => {}
        }
    }

    fn on_key_released(&mut self, _ctx: &mut GameCtx<'_>, event: &KeyEvent) {
        self.controls.set(event.key, false);
    }

    fn on_mouse_button_pressed(&mut self, _ctx: &mut GameCtx<'_>, event: &MouseButtonEvent) {
        self.last_pointer = (event.x, event.y);
    }

    fn on_mouse_moved(&mut self, _ctx: &mut GameCtx<'_>, event: &MouseMotionEvent) {
        let (dx, dy) = (event.x - self.last_pointer.0, event.y - self.last_pointer.1);
        self.last_pointer = (event.x, event.y);

        if event.buttons.left {
            self.pitch += dy * LOOK_SPEED;
            self.yaw += dx * LOOK_SPEED;
        }
    }

    fn on_resize(&mut self, ctx: &mut GameCtx<'_>, event: &ResizeEvent) {
        self.apply_client_size(event.width, event.height);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(ctx.window.client_width, ctx.window.client_height);
        }
    }

    fn on_window_destroy(&mut self) {
        info!("camera demo shutting down");
        // The surface keeps the native window alive; release it first.
        self.renderer = None;
    }
}
