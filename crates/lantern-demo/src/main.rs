//! Fly-through camera demo.
//!
//! Opens one window, binds a GPU surface to it and drives the camera from
//! keyboard and mouse until the window is closed.

mod camera_demo;
mod config;
mod frame_constants;
mod renderer;

use anyhow::{Context, Result, bail};
use log::{error, info};

use lantern_engine::device::{Gpu, GpuInit};
use lantern_engine::logging::{LoggingConfig, init_logging};
use lantern_engine::window::{Application, WinitBackend};

use camera_demo::CameraDemo;
use config::DemoConfig;
use renderer::Renderer;

fn main() {
    init_logging(LoggingConfig::default());

    let code = match run(DemoConfig::default()) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            1
        }
    };

    info!("exiting with code {code}");
    std::process::exit(code);
}

fn run(config: DemoConfig) -> Result<i32> {
    let backend = WinitBackend::new()?;
    let mut app = Application::new(backend);

    let window = app.create_render_window(config.window_desc());
    let Some(handle) = window.handle() else {
        bail!("failed to create window {:?}", config.window_name);
    };
    let info = window.info().clone();

    let native = app
        .backend()
        .native_window(handle)
        .context("backend has no native window for the demo")?;

    let gpu = Gpu::create(native, GpuInit::for_window(&info)).context("failed to initialize GPU")?;
    let demo = CameraDemo::new(&info, Some(Renderer::new(gpu)));

    if !app.attach_game(handle, Box::new(demo)) {
        bail!("window {:?} already has a game attached", info.name);
    }

    Ok(app.run())
}
