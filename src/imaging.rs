//! Image downscaling for exported media.
//!
//! The cataloguing platform does not need full-resolution stills, so
//! exported images wider than the configured width are shrunk before the
//! metadata is written. Videos and images that are already small enough are
//! passed through untouched.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// JPEG quality used when re-encoding resized stills.
pub const JPEG_QUALITY: u8 = 90;

/// Downscales encoded images.
pub trait ImageResizer {
    /// Shrink the encoded image in `bytes` (read from `path`) to at most
    /// `max_width` pixels wide, keeping the aspect ratio.
    ///
    /// Returns `Ok(None)` when the image is already narrow enough, so the
    /// caller can copy the original bytes.
    fn resize(&self, path: &Path, bytes: &[u8], max_width: u32) -> Result<Option<Vec<u8>>>;
}

/// [`ImageResizer`] using the `image` crate's Lanczos3 filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl ImageResizer for LanczosResizer {
    fn resize(&self, path: &Path, bytes: &[u8], max_width: u32) -> Result<Option<Vec<u8>>> {
        let image_error = |message: String| Error::Image {
            path: path.to_path_buf(),
            message,
        };

        let format = ImageFormat::from_path(path)
            .or_else(|_| image::guess_format(bytes))
            .map_err(|e| image_error(e.to_string()))?;
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| image_error(e.to_string()))?;

        if img.width() <= max_width {
            return Ok(None);
        }

        let (width, height) = scaled_dimensions(img.width(), img.height(), max_width);
        let resized = img.resize_exact(width, height, FilterType::Lanczos3);
        log::debug!(
            "Resized {} from {}x{} to {}x{}",
            path.display(),
            img.width(),
            img.height(),
            width,
            height
        );

        encode(&resized, format).map(Some).map_err(|e| image_error(e.to_string()))
    }
}

/// Dimensions of an image scaled to `target_width`, aspect ratio kept.
pub fn scaled_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let ratio = f64::from(target_width) / f64::from(width);
    let scaled_height = (f64::from(height) * ratio).round().max(1.0) as u32;
    (target_width, scaled_height)
}

fn encode(img: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    if format == ImageFormat::Jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
        DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
    } else {
        img.write_to(&mut buffer, format)?;
    }
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(4800, 3200, 2400), (2400, 1600));
        assert_eq!(scaled_dimensions(3000, 1, 100), (100, 1));
    }

    #[test]
    fn test_resize_shrinks_wide_jpeg() {
        let bytes = encoded(400, 200, ImageFormat::Jpeg);
        let resized = LanczosResizer
            .resize(Path::new("IMG_0001.JPG"), &bytes, 100)
            .unwrap()
            .expect("image should be resized");

        let img = image::load_from_memory(&resized).unwrap();
        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(image::guess_format(&resized).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_resize_keeps_png_format() {
        let bytes = encoded(300, 300, ImageFormat::Png);
        let resized = LanczosResizer
            .resize(Path::new("frame.png"), &bytes, 150)
            .unwrap()
            .unwrap();
        assert_eq!(image::guess_format(&resized).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_resize_skips_narrow_image() {
        let bytes = encoded(100, 50, ImageFormat::Png);
        let result = LanczosResizer
            .resize(Path::new("small.png"), &bytes, 2400)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_resize_rejects_corrupt_data() {
        let err = LanczosResizer
            .resize(Path::new("broken.jpg"), b"not an image", 100)
            .unwrap_err();
        assert!(err.to_string().contains("broken.jpg"));
    }
}
