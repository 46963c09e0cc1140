use lantern_engine::window::WindowDesc;

/// Startup settings for the demo window.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub window_name: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub windowed: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_name: "Texture and Lighting Demo".to_string(),
            width: 800,
            height: 600,
            vsync: false,
            windowed: true,
        }
    }
}

impl DemoConfig {
    pub fn window_desc(&self) -> WindowDesc {
        WindowDesc::new(self.window_name.clone())
            .with_size(self.width, self.height)
            .with_vsync(self.vsync)
            .with_windowed(self.windowed)
    }
}
