//! Image decoding and encoding at the crate boundary.
//!
//! The front end exchanges raster bytes; internally everything is an
//! uncompressed RGB pixel buffer. Decoding flattens whatever channel
//! layout arrives (RGBA drops alpha, grayscale expands) so the rest of
//! the pipeline only ever sees [`RgbImage`]. Encoding targets PNG, the
//! lossless format the front end displays.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::error::TaskvizError;

/// Decodes raster bytes into an owned RGB buffer.
///
/// # Errors
/// Returns [`TaskvizError::ImageDecode`] if the bytes are not a
/// recognizable image.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, TaskvizError> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| TaskvizError::ImageDecode { source })?
        .to_rgb8();

    debug!(
        width = image.width(),
        height = image.height(),
        "decoded image"
    );

    Ok(image)
}

/// Encodes an RGB buffer to PNG bytes.
///
/// # Errors
/// Returns [`TaskvizError::ImageEncode`] if encoding fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, TaskvizError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| TaskvizError::ImageEncode { source })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let original = RgbImage::from_fn(20, 10, |x, y| Rgb([x as u8, y as u8, 200]));

        let bytes = encode_png(&original).expect("encode png");
        let restored = decode_rgb(&bytes).expect("decode png");

        assert_eq!(restored.dimensions(), (20, 10));
        assert_eq!(restored.as_raw(), original.as_raw());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = decode_rgb(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TaskvizError::ImageDecode { .. }));
    }
}
