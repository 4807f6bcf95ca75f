//! Application state and the fixed-timestep loop driver
//!
//! One `frame()` per loop iteration: poll the platform, then spend the
//! elapsed time in fixed updates. Each update clears the framebuffer, draws
//! the demo scene and presents it.

use crate::config::Config;
use crate::platform::{Platform, PresentError};
use crate::rasterizer::{draw, Bitmap, Color, Framebuffer, FramebufferError};
use crate::timestep::FixedTimestep;

/// Loop state: running until the platform reports a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Quitting,
}

/// What the demo draws besides its fixed lines
pub struct Scene {
    /// Optional image drawn last, with its top-left corner at `overlay_position`
    pub overlay: Option<Bitmap>,
    pub overlay_position: (i32, i32),
}

/// Main application state
pub struct App {
    /// Running or quitting
    pub state: LoopState,

    /// The CPU-side render target
    pub fb: Framebuffer,

    /// Fixed update clock
    pub timestep: FixedTimestep,

    pub scene: Scene,

    /// Total updates run so far
    pub updates: u64,

    /// Presents that returned an error
    pub failed_presents: u64,
}

impl App {
    /// Create the framebuffer and start the clock at `start_time`
    pub fn new(config: &Config, overlay: Option<Bitmap>, start_time: f64) -> Result<Self, FramebufferError> {
        let fb = Framebuffer::new(config.width as usize, config.height as usize)?;
        let timestep = FixedTimestep::from_rate(config.update_rate, start_time);
        log::info!(
            "Framebuffer {}x{}, {} updates/s ({:.5}s step)",
            fb.width,
            fb.height,
            config.update_rate,
            timestep.step()
        );

        Ok(Self {
            state: LoopState::Running,
            fb,
            timestep,
            scene: Scene {
                overlay,
                overlay_position: config.overlay_position,
            },
            updates: 0,
            failed_presents: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Run one loop iteration and return the resulting state
    pub fn frame<P: Platform>(&mut self, platform: &mut P) -> LoopState {
        if self.state == LoopState::Quitting {
            return self.state;
        }

        platform.poll();
        if platform.should_quit() {
            log::info!(
                "Quitting after {} updates ({:.5}s left unspent)",
                self.updates,
                self.timestep.accumulated()
            );
            self.state = LoopState::Quitting;
            return self.state;
        }

        let now = platform.time();
        let Self { fb, timestep, scene, updates, failed_presents, .. } = self;
        timestep.advance(now, |_step| {
            *updates += 1;
            if let Err(e) = update(fb, scene, platform) {
                *failed_presents += 1;
                log::warn!("Present failed: {}", e);
            }
        });

        self.state
    }

    /// Release the framebuffer. The platform is released after this by its owner.
    pub fn shutdown(&mut self) {
        self.state = LoopState::Quitting;
        if !self.fb.is_destroyed() {
            self.fb.destroy();
            log::debug!("Framebuffer released");
        }
    }
}

/// One fixed update: clear, draw, present
fn update<P: Platform>(
    fb: &mut Framebuffer,
    scene: &Scene,
    platform: &mut P,
) -> Result<(), PresentError> {
    fb.clear();
    draw_scene(fb, scene, platform.time());
    platform.present(fb)
}

/// The demo picture: a marker pixel, an eight-spoke star and one wobbling line
pub fn draw_scene(fb: &mut Framebuffer, scene: &Scene, time: f64) {
    draw::pixel(fb, 1, 1, Color::RED);

    let (x, y) = (150, 110);
    let spokes = [
        (50, 100, Color::new(255, 0, 126)),   // pink
        (-50, 100, Color::new(255, 255, 0)),  // yellow
        (-50, -100, Color::new(126, 0, 255)), // violet
        (50, -100, Color::new(0, 126, 255)),  // blue
        (100, 50, Color::new(255, 25, 25)),   // red
        (-100, 50, Color::new(0, 225, 160)),  // green
        (-100, -50, Color::new(255, 126, 126)), // orange
        (100, -50, Color::WHITE),
    ];
    for (dx, dy, color) in spokes {
        draw::line(fb, x, y, x + dx, y + dy, color);
    }

    let y0 = (2.0 * time).cos() * 10.0 + 100.0;
    let y1 = (2.0 * time + 2.0).sin() * 10.0 + 300.0;
    draw::line(fb, 300, y0 as i32, 500, y1 as i32, Color::new(100, 200, 250));

    if let Some(overlay) = &scene.overlay {
        let (ox, oy) = scene.overlay_position;
        draw::bitmap(fb, overlay, ox, oy);
    }
}
