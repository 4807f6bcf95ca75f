//! CPU-side framebuffer: a color buffer plus a depth buffer

use super::bitmap::Bitmap;
use super::types::ChannelOrder;

/// Error type for framebuffer construction and blitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    InvalidDimensions { width: usize, height: usize },
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl std::fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FramebufferError::InvalidDimensions { width, height } => {
                write!(f, "Invalid framebuffer size {}x{}", width, height)
            }
            FramebufferError::SizeMismatch { expected, actual } => write!(
                f,
                "Target is {}x{}, framebuffer is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for FramebufferError {}

/// Framebuffer for software rendering
#[derive(Debug)]
pub struct Framebuffer {
    pub color: Vec<u8>, // RGBA, 4 bytes per pixel
    pub depth: Vec<f32>, // one float per pixel, never cleared
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    /// Allocate zeroed color and depth buffers. Both sides must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self, FramebufferError> {
        let invalid = FramebufferError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let pixels = width.checked_mul(height).ok_or(invalid.clone())?;
        let bytes = pixels.checked_mul(4).ok_or(invalid)?;

        Ok(Self {
            color: vec![0; bytes],
            depth: vec![0.0; pixels],
            width,
            height,
        })
    }

    /// Release both buffers. Width and height drop to zero, so every later
    /// draw call falls outside the bounds and is ignored.
    pub fn destroy(&mut self) {
        self.width = 0;
        self.height = 0;
        self.color = Vec::new();
        self.depth = Vec::new();
    }

    pub fn is_destroyed(&self) -> bool {
        self.color.is_empty() && self.depth.is_empty()
    }

    /// Zero the color buffer. The depth buffer is left alone.
    pub fn clear(&mut self) {
        self.color.fill(0);
    }

    /// Copy the color buffer into `target`, reordering channels for it.
    pub fn blit(&self, target: &mut Bitmap, order: ChannelOrder) -> Result<(), FramebufferError> {
        if target.width != self.width || target.height != self.height {
            return Err(FramebufferError::SizeMismatch {
                expected: (self.width, self.height),
                actual: (target.width, target.height),
            });
        }

        match order {
            ChannelOrder::Rgba => self.blit_rgb(target),
            ChannelOrder::Bgra => self.blit_bgr(target),
        }
        Ok(())
    }

    fn blit_rgb(&self, target: &mut Bitmap) {
        target.buffer.copy_from_slice(&self.color);
    }

    fn blit_bgr(&self, target: &mut Bitmap) {
        for (dst, src) in target.buffer.chunks_exact_mut(4).zip(self.color.chunks_exact(4)) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
    }
}
