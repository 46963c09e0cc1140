use std::cell::Cell;

use glam::{Mat4, Quat, Vec3};

use crate::coords::Viewport;

/// Frame of reference for a translation delta.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Space {
    /// Delta is expressed in camera axes ("forward" is where the camera looks).
    #[default]
    Local,
    /// Delta is expressed in world axes.
    World,
}

/// Sign convention used when building view and projection matrices.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Handedness {
    /// +Z points into the screen (Direct3D convention).
    #[default]
    LeftHanded,
    /// -Z points into the screen (OpenGL convention).
    RightHanded,
}

/// A derived matrix and the flag telling whether it must be rebuilt.
#[derive(Debug)]
struct CachedMatrix {
    value: Cell<Mat4>,
    dirty: Cell<bool>,
}

impl CachedMatrix {
    fn stale() -> Self {
        Self {
            value: Cell::new(Mat4::IDENTITY),
            dirty: Cell::new(true),
        }
    }

    #[inline]
    fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    #[inline]
    fn invalidate(&self) {
        self.dirty.set(true);
    }

    #[inline]
    fn store(&self, m: Mat4) {
        self.value.set(m);
        self.dirty.set(false);
    }

    #[inline]
    fn get(&self) -> Mat4 {
        self.value.get()
    }
}

impl Clone for CachedMatrix {
    fn clone(&self) -> Self {
        Self {
            value: Cell::new(self.value.get()),
            dirty: Cell::new(self.dirty.get()),
        }
    }
}

/// Perspective camera with lazily derived matrices.
///
/// Setters only record inputs and mark the affected matrices dirty. A getter
/// rebuilds its matrix the first time it is read after a mutation, so moving
/// and turning the camera several times per frame costs one rebuild at render.
///
/// Invalidation groups:
/// - translation / rotation: view, inverse view
/// - projection parameters: projection, inverse projection
///
/// The caches live in `Cell`s so readers only need `&Camera`; the type is
/// therefore `!Sync`.
#[derive(Debug, Clone)]
pub struct Camera {
    translation: Vec3,
    rotation: Quat,

    fov_y: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,

    viewport: Viewport,
    handedness: Handedness,

    view: CachedMatrix,
    inverse_view: CachedMatrix,
    projection: CachedMatrix,
    inverse_projection: CachedMatrix,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Handedness::default())
    }
}

impl Camera {
    /// Identity transform, 45 degree vertical fov, square aspect, clip range `[0.1, 100]`.
    pub fn new(handedness: Handedness) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: 45.0,
            aspect_ratio: 1.0,
            z_near: 0.1,
            z_far: 100.0,
            viewport: Viewport::default(),
            handedness,
            view: CachedMatrix::stale(),
            inverse_view: CachedMatrix::stale(),
            projection: CachedMatrix::stale(),
            inverse_projection: CachedMatrix::stale(),
        }
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ===== VIEW =====

    /// Points the camera from `eye` at `target`.
    ///
    /// The view matrix is built directly; translation and rotation are then
    /// recovered from it so later relative moves start from this pose.
    pub fn set_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let view = match self.handedness {
            Handedness::LeftHanded => Mat4::look_at_lh(eye, target, up),
            Handedness::RightHanded => Mat4::look_at_rh(eye, target, up),
        };

        self.translation = eye;
        // The view's 3x3 block is the inverse (transpose) of the camera orientation.
        self.rotation = Quat::from_mat4(&view.transpose()).normalize();

        self.view.store(view);
        self.inverse_view.invalidate();
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        if self.view.is_dirty() {
            self.update_view_matrix();
        }
        self.view.get()
    }

    /// Camera-to-world matrix.
    pub fn inverse_view_matrix(&self) -> Mat4 {
        if self.inverse_view.is_dirty() {
            self.update_inverse_view_matrix();
        }
        self.inverse_view.get()
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate_view();
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Sets the world-space orientation. `rotation` is normalized.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
        self.invalidate_view();
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Moves the camera by `delta`.
    ///
    /// In [`Space::Local`] the delta is first rotated by the current orientation.
    pub fn translate(&mut self, delta: Vec3, space: Space) {
        self.translation += match space {
            Space::Local => self.rotation * delta,
            Space::World => delta,
        };
        self.invalidate_view();
    }

    /// Applies `rotation` on top of the current orientation (world-space rotation).
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = (rotation * self.rotation).normalize();
        self.invalidate_view();
    }

    // ===== PROJECTION =====

    /// Sets a perspective projection.
    ///
    /// `fov_y` is the vertical field of view in degrees.
    pub fn set_projection(&mut self, fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) {
        self.fov_y = fov_y;
        self.aspect_ratio = aspect_ratio;
        self.z_near = z_near;
        self.z_far = z_far;

        self.projection.invalidate();
        self.inverse_projection.invalidate();
    }

    pub fn projection_matrix(&self) -> Mat4 {
        if self.projection.is_dirty() {
            self.update_projection_matrix();
        }
        self.projection.get()
    }

    pub fn inverse_projection_matrix(&self) -> Mat4 {
        if self.inverse_projection.is_dirty() {
            self.update_inverse_projection_matrix();
        }
        self.inverse_projection.get()
    }

    /// Vertical field of view in degrees.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Combined `projection * view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    // ===== CACHE MAINTENANCE =====

    fn invalidate_view(&self) {
        self.view.invalidate();
        self.inverse_view.invalidate();
    }

    fn update_view_matrix(&self) {
        let inverse_rotation = Mat4::from_quat(self.rotation).transpose();
        let inverse_translation = Mat4::from_translation(-self.translation);

        self.view.store(inverse_rotation * inverse_translation);
        self.inverse_view.invalidate();
    }

    fn update_inverse_view_matrix(&self) {
        if self.view.is_dirty() {
            self.update_view_matrix();
        }
        self.inverse_view.store(self.view.get().inverse());
    }

    fn update_projection_matrix(&self) {
        let fov = self.fov_y.to_radians();
        let projection = match self.handedness {
            Handedness::LeftHanded => {
                Mat4::perspective_lh(fov, self.aspect_ratio, self.z_near, self.z_far)
            }
            Handedness::RightHanded => {
                Mat4::perspective_rh(fov, self.aspect_ratio, self.z_near, self.z_far)
            }
        };

        self.projection.store(projection);
        self.inverse_projection.invalidate();
    }

    fn update_inverse_projection_matrix(&self) {
        if self.projection.is_dirty() {
            self.update_projection_matrix();
        }
        self.inverse_projection.store(self.projection.get().inverse());
    }
}
