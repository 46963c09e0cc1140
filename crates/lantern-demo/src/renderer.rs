use anyhow::{Result, bail};
use log::trace;

use lantern_engine::device::{Gpu, SurfaceErrorAction};

use crate::frame_constants::FrameConstants;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.39,
    g: 0.58,
    b: 0.93,
    a: 1.0,
};

/// GPU side of the demo: the device plus the per-frame uniform buffer.
pub struct Renderer {
    gpu: Gpu,
    frame_constants: wgpu::Buffer,
}

impl Renderer {
    pub fn new(gpu: Gpu) -> Self {
        let frame_constants = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("demo frame constants"),
            size: std::mem::size_of::<FrameConstants>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            gpu,
            frame_constants,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Uploads `constants`, clears color and depth, and presents.
    ///
    /// Transient surface errors skip the frame; only an unusable device is
    /// reported as an error.
    pub fn draw(&mut self, constants: &FrameConstants) -> Result<()> {
        self.gpu.queue().write_buffer(
            &self.frame_constants,
            0,
            bytemuck::bytes_of(constants),
        );

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                trace!("begin_frame failed: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => bail!("surface device is out of memory"),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                };
            }
        };

        self.gpu.clear(&mut frame, CLEAR_COLOR, 1.0);
        self.gpu.submit(frame);
        Ok(())
    }
}
