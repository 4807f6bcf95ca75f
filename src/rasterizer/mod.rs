//! Software rasterizer
//!
//! A framebuffer with an RGBA color buffer and a float depth buffer,
//! plus pixel, line and bitmap drawing into it.

mod bitmap;
mod framebuffer;
mod types;
pub mod draw;

pub use bitmap::*;
pub use framebuffer::*;
pub use types::*;
