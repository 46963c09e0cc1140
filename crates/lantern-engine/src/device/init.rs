use crate::window::WindowInfo;

/// Parameters for `Gpu` creation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Requested present mode. Falls back to `Fifo` if the surface lacks it.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; the first supported mode is used otherwise.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Frame latency hint passed to the surface.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Defaults with the present mode derived from the window's vsync flag.
    pub fn for_window(info: &WindowInfo) -> Self {
        Self {
            present_mode: present_mode_for_vsync(info.vsync),
            ..Self::default()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// `Fifo` waits for vertical blank; `AutoNoVsync` presents as fast as possible.
pub fn present_mode_for_vsync(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        let mut info = WindowInfo {
            vsync: true,
            ..WindowInfo::default()
        };
        assert_eq!(GpuInit::for_window(&info).present_mode, wgpu::PresentMode::Fifo);

        info.vsync = false;
        let init = GpuInit::for_window(&info);
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert!(init.prefer_srgb);
    }
}
