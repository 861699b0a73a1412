use crate::media::error::MediaError;
use image::ImageFormat;
use std::io::Cursor;

/// Downscales an image to at most `max_width` pixels wide, preserving aspect
/// ratio, and re-encodes it as JPEG. Images already narrower than the limit
/// are only re-encoded.
pub fn downscale(bytes: &[u8], max_width: u32) -> Result<Vec<u8>, MediaError> {
    let img = image::load_from_memory(bytes)?;
    let resized = if img.width() > max_width {
        img.thumbnail(max_width, u32::MAX)
    } else {
        img
    };
    // JPEG has no alpha channel; flatten whatever the source format was.
    let rgb = image::DynamicImage::from(resized.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::from(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 30, 200]),
        ));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode fixture");
        out.into_inner()
    }

    #[test]
    fn downscales_wide_images() -> Result<(), MediaError> {
        let thumb = downscale(&png_fixture(400, 200), 100)?;
        let decoded = image::load_from_memory(&thumb)?;
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
        Ok(())
    }

    #[test]
    fn keeps_small_images_at_original_size() -> Result<(), MediaError> {
        let thumb = downscale(&png_fixture(50, 80), 100)?;
        let decoded = image::load_from_memory(&thumb)?;
        assert_eq!((decoded.width(), decoded.height()), (50, 80));
        Ok(())
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(downscale(b"not an image", 100).is_err());
    }
}
