//! In-memory backend with a hand-driven clock, used to run the loop in tests

use super::{validate_size, Platform, PlatformInitError, PresentError};
use crate::rasterizer::{Bitmap, ChannelOrder};

pub struct HeadlessPlatform {
    surface: Option<Bitmap>,
    pub clock: f64,
    pub close_requested: bool,
    quit: bool,
    pub polls: usize,
    pub presents: usize,
}

impl HeadlessPlatform {
    pub fn init(width: u32, height: u32) -> Result<Self, PlatformInitError> {
        let (w, h) = validate_size(width, height)?;
        Ok(Self {
            surface: Some(Bitmap::new(w, h)),
            clock: 0.0,
            close_requested: false,
            quit: false,
            polls: 0,
            presents: 0,
        })
    }

    pub fn surface(&self) -> Option<&Bitmap> {
        self.surface.as_ref()
    }
}

impl Platform for HeadlessPlatform {
    const CHANNEL_ORDER: ChannelOrder = ChannelOrder::Bgra;

    fn poll(&mut self) {
        self.polls += 1;
        if self.close_requested {
            self.quit = true;
        }
    }

    fn should_quit(&self) -> bool {
        self.quit
    }

    fn time(&self) -> f64 {
        self.clock
    }

    fn surface_mut(&mut self) -> Option<&mut Bitmap> {
        self.surface.as_mut()
    }

    fn show_surface(&mut self) -> Result<(), PresentError> {
        self.presents += 1;
        Ok(())
    }

    fn destroy(&mut self) {
        self.surface = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{draw, Color, Framebuffer, FramebufferError};

    #[test]
    fn test_present_blits_in_platform_order() {
        let mut platform = HeadlessPlatform::init(4, 4).unwrap();
        let mut fb = Framebuffer::new(4, 4).unwrap();
        draw::pixel(&mut fb, 1, 0, Color::new(10, 20, 30));

        platform.present(&fb).unwrap();

        let surface = platform.surface().unwrap();
        assert_eq!(surface.get_pixel(1, 0), Some([30, 20, 10, 0]));
        assert_eq!(platform.presents, 1);
    }

    #[test]
    fn test_present_after_destroy_fails() {
        let mut platform = HeadlessPlatform::init(4, 4).unwrap();
        let fb = Framebuffer::new(4, 4).unwrap();
        platform.destroy();
        assert_eq!(platform.present(&fb), Err(PresentError::SurfaceUnavailable));
        assert_eq!(platform.presents, 0);
    }

    #[test]
    fn test_present_size_mismatch() {
        let mut platform = HeadlessPlatform::init(4, 4).unwrap();
        let fb = Framebuffer::new(8, 4).unwrap();
        assert_eq!(
            platform.present(&fb),
            Err(PresentError::Blit(FramebufferError::SizeMismatch {
                expected: (8, 4),
                actual: (4, 4),
            }))
        );
    }

    #[test]
    fn test_quit_flag_set_by_poll() {
        let mut platform = HeadlessPlatform::init(4, 4).unwrap();
        platform.close_requested = true;
        assert!(!platform.should_quit());
        platform.poll();
        assert!(platform.should_quit());
    }

    #[test]
    fn test_init_rejects_empty_surface() {
        assert!(HeadlessPlatform::init(0, 4).is_err());
    }
}
