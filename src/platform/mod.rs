//! Platform layer: window, event pump, clock and presentation
//!
//! Every backend implements [`Platform`]. Construction is the `init` step and
//! [`Platform::destroy`] (or dropping the value) releases the window. The
//! binary picks one backend at build time; there is no runtime switching.

mod desktop;
#[cfg(test)]
pub mod headless;

pub use desktop::MacroquadPlatform;

use crate::rasterizer::{Bitmap, ChannelOrder, Framebuffer, FramebufferError};

/// Error type for platform startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformInitError {
    InvalidSize { width: u32, height: u32 },
}

impl std::fmt::Display for PlatformInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformInitError::InvalidSize { width, height } => {
                write!(f, "Cannot create a {}x{} window surface", width, height)
            }
        }
    }
}

impl std::error::Error for PlatformInitError {}

/// Error type for presenting a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    SurfaceUnavailable,
    Blit(FramebufferError),
}

impl From<FramebufferError> for PresentError {
    fn from(e: FramebufferError) -> Self {
        PresentError::Blit(e)
    }
}

impl std::fmt::Display for PresentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentError::SurfaceUnavailable => write!(f, "No surface to present to"),
            PresentError::Blit(e) => write!(f, "Blit failed: {}", e),
        }
    }
}

impl std::error::Error for PresentError {}

/// Check a requested surface size. Textures are addressed with u16 sides.
pub fn validate_size(width: u32, height: u32) -> Result<(usize, usize), PlatformInitError> {
    if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(PlatformInitError::InvalidSize { width, height });
    }
    Ok((width as usize, height as usize))
}

pub trait Platform {
    /// Byte order of the presentable surface
    const CHANNEL_ORDER: ChannelOrder;

    /// Drain pending window events without blocking
    fn poll(&mut self);

    /// Whether a close request has been seen by [`Platform::poll`]
    fn should_quit(&self) -> bool;

    /// Monotonic seconds since the platform was created
    fn time(&self) -> f64;

    /// The presentable surface, or None once destroyed
    fn surface_mut(&mut self) -> Option<&mut Bitmap>;

    /// Push the presentable surface to the visible window
    fn show_surface(&mut self) -> Result<(), PresentError>;

    /// Release the window surface. Later presents fail with `SurfaceUnavailable`.
    fn destroy(&mut self);

    /// Blit the framebuffer into the presentable surface and show it
    fn present(&mut self, fb: &Framebuffer) -> Result<(), PresentError> {
        let surface = self.surface_mut().ok_or(PresentError::SurfaceUnavailable)?;
        fb.blit(surface, Self::CHANNEL_ORDER)?;
        self.show_surface()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert_eq!(validate_size(800, 600), Ok((800, 600)));
        assert_eq!(
            validate_size(0, 600),
            Err(PlatformInitError::InvalidSize { width: 0, height: 600 })
        );
        assert!(validate_size(70_000, 10).is_err());
    }
}
