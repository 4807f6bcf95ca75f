//! RGBA bitmaps: the presentable surface and the result of image loading

use std::fs;
use std::path::Path;

/// Error type for image loading
#[derive(Debug)]
pub enum BitmapError {
    UnsupportedFormat(String),
    IoError(std::io::Error),
    DecodeError(image::ImageError),
}

impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        BitmapError::IoError(e)
    }
}

impl From<image::ImageError> for BitmapError {
    fn from(e: image::ImageError) -> Self {
        BitmapError::DecodeError(e)
    }
}

impl std::fmt::Display for BitmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitmapError::UnsupportedFormat(ext) => write!(f, "Unsupported image format: '{}'", ext),
            BitmapError::IoError(e) => write!(f, "IO error: {}", e),
            BitmapError::DecodeError(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for BitmapError {}

/// Width x height RGBA pixels, 4 bytes each, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub buffer: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width * height * 4],
        }
    }

    /// Load a PPM, BMP or TGA file, picked by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BitmapError> {
        let path = path.as_ref();
        let format = format_for(path)?;
        let bytes = fs::read(path)?;
        let img = image::load_from_memory_with_format(&bytes, format)?;
        let rgba = img.to_rgba8();

        Ok(Self {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            buffer: rgba.into_raw(),
        })
    }

    /// Get the RGBA bytes at x,y, or None outside the bitmap
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) * 4;
            Some([self.buffer[i], self.buffer[i + 1], self.buffer[i + 2], self.buffer[i + 3]])
        } else {
            None
        }
    }
}

fn format_for(path: &Path) -> Result<image::ImageFormat, BitmapError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "ppm" => Ok(image::ImageFormat::Pnm),
        "bmp" => Ok(image::ImageFormat::Bmp),
        "tga" => Ok(image::ImageFormat::Tga),
        _ => Err(BitmapError::UnsupportedFormat(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("softsrv-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        match Bitmap::from_file("picture.png") {
            Err(BitmapError::UnsupportedFormat(ext)) => assert_eq!(ext, "png"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
        assert!(matches!(
            Bitmap::from_file("no_extension"),
            Err(BitmapError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Bitmap::from_file("/definitely/not/here.ppm"),
            Err(BitmapError::IoError(_))
        ));
    }

    #[test]
    fn test_load_ppm() {
        let mut data = b"P6\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[255, 0, 0, 0, 255, 0]);
        let path = temp_file("two.PPM", &data);

        let bmp = Bitmap::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!((bmp.width, bmp.height), (2, 1));
        assert_eq!(bmp.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(bmp.get_pixel(1, 0), Some([0, 255, 0, 255]));
        assert_eq!(bmp.get_pixel(2, 0), None);
    }

    #[test]
    fn test_garbage_ppm_is_decode_error() {
        let path = temp_file("bad.ppm", b"not an image");
        let result = Bitmap::from_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(BitmapError::DecodeError(_))));
    }
}
