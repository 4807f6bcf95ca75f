//! softsrv: a software framebuffer demo
//!
//! Draws pixels and lines into a CPU-side framebuffer with a fixed-timestep
//! update loop and blits the result to a native window every update.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod logging;
mod platform;
mod rasterizer;
mod timestep;

use app::App;
use config::{Config, CONFIG_PATH};
use logging::init_logging;
use macroquad::prelude::{next_frame, Conf};
use platform::{MacroquadPlatform, Platform};
use rasterizer::Bitmap;

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: config.title.clone(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn main() {
    let (config, config_error) = match Config::load_optional(CONFIG_PATH) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config);

    log::info!("softsrv v{}", VERSION);
    if let Some(e) = config_error {
        log::error!("Failed to load {}: {}, using defaults", CONFIG_PATH, e);
    }

    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: Config) {
    let mut platform = match MacroquadPlatform::init(&config.title, config.width, config.height) {
        Ok(platform) => platform,
        Err(e) => {
            log::error!("Platform init failed: {}", e);
            std::process::exit(1);
        }
    };

    let overlay = config.overlay_image.as_ref().and_then(|path| match Bitmap::from_file(path) {
        Ok(bitmap) => {
            log::info!("Loaded overlay {} ({}x{})", path.display(), bitmap.width, bitmap.height);
            Some(bitmap)
        }
        Err(e) => {
            log::warn!("Failed to load overlay {}: {}", path.display(), e);
            None
        }
    });

    let mut app = match App::new(&config, overlay, platform.time()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Framebuffer init failed: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        app.frame(&mut platform);
        if !app.is_running() {
            break;
        }
        platform.show();
        next_frame().await;
    }

    // Reverse order of creation
    app.shutdown();
    platform.destroy();
}
