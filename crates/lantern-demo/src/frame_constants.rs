use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use lantern_engine::camera::Camera;

/// Per-frame uniform block.
///
/// Matrices are column-major, matching WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameConstants {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    pub inverse_view: Mat4,
    /// Camera position in world space, `w = 1`.
    pub eye_position: Vec4,
}

impl FrameConstants {
    pub fn new(camera: &Camera, world: Mat4) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        Self {
            world,
            view,
            projection,
            view_projection: projection * view,
            inverse_view: camera.inverse_view_matrix(),
            eye_position: camera.translation().extend(1.0),
        }
    }
}
