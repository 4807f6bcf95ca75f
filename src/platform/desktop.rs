//! Windowed backend on top of macroquad
//!
//! The presentable surface is uploaded to a texture on every present and the
//! texture is stretched over the whole window. macroquad itself pumps OS
//! events and swaps buffers inside `next_frame()`, so `poll` only reads the
//! state it collected.

use macroquad::prelude::{
    clear_background, draw_texture_ex, get_time, is_key_pressed, is_quit_requested, prevent_quit,
    screen_height, screen_width, vec2, DrawTextureParams, FilterMode, KeyCode, Texture2D, BLACK,
    WHITE,
};

use super::{validate_size, Platform, PlatformInitError, PresentError};
use crate::rasterizer::{Bitmap, ChannelOrder};

pub struct MacroquadPlatform {
    surface: Option<Bitmap>,
    texture: Option<Texture2D>,
    start_time: f64,
    quit: bool,
}

impl MacroquadPlatform {
    /// Set up the presentable surface for a window of the given size.
    /// Must run inside the macroquad main future, after the window exists.
    pub fn init(title: &str, width: u32, height: u32) -> Result<Self, PlatformInitError> {
        let (w, h) = validate_size(width, height)?;

        let surface = Bitmap::new(w, h);
        let texture = Texture2D::from_rgba8(w as u16, h as u16, &surface.buffer);
        texture.set_filter(FilterMode::Nearest);

        // Close requests become a flag we read in poll()
        prevent_quit();

        log::info!("Opened window '{}' ({}x{})", title, w, h);

        Ok(Self {
            surface: Some(surface),
            texture: Some(texture),
            start_time: get_time(),
            quit: false,
        })
    }

    /// Draw the last presented frame. Called once per displayed frame so the
    /// window keeps its picture when no update ran.
    pub fn show(&self) {
        clear_background(BLACK);
        if let Some(texture) = &self.texture {
            draw_texture_ex(
                texture,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(screen_width(), screen_height())),
                    ..Default::default()
                },
            );
        }
    }
}

impl Platform for MacroquadPlatform {
    const CHANNEL_ORDER: ChannelOrder = ChannelOrder::Rgba;

    fn poll(&mut self) {
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            log::debug!("Close requested");
            self.quit = true;
        }
    }

    fn should_quit(&self) -> bool {
        self.quit
    }

    fn time(&self) -> f64 {
        get_time() - self.start_time
    }

    fn surface_mut(&mut self) -> Option<&mut Bitmap> {
        self.surface.as_mut()
    }

    fn show_surface(&mut self) -> Result<(), PresentError> {
        match (&self.surface, &self.texture) {
            (Some(surface), Some(texture)) => {
                texture.update_from_bytes(surface.width as u32, surface.height as u32, &surface.buffer);
                Ok(())
            }
            _ => Err(PresentError::SurfaceUnavailable),
        }
    }

    fn destroy(&mut self) {
        if self.surface.take().is_some() {
            log::info!("Window surface released");
        }
        self.texture = None;
    }
}

impl Drop for MacroquadPlatform {
    fn drop(&mut self) {
        self.destroy();
    }
}
