use image::RgbaImage;
use image::imageops::{self, FilterType};

use romprops_core::RomError;

use crate::RasterImage;

/// Render a square `size`x`size` thumbnail: expand to ARGB32, pad to a
/// square, then scale.
pub fn thumbnail(image: &RasterImage, size: u32) -> Result<RgbaImage, RomError> {
    if size == 0 {
        return Err(RomError::range("thumbnail size must be at least 1"));
    }
    let square = image.to_argb32()?.squared().to_rgba_image()?;
    if square.width() == size {
        return Ok(square);
    }
    let filter = if size > square.width() {
        FilterType::Nearest // keep pixel art crisp
    } else {
        FilterType::Lanczos3
    };
    Ok(imageops::resize(&square, size, size, filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, argb: u32) -> RasterImage {
        let data = (0..width * height).flat_map(|_| argb.to_le_bytes()).collect();
        RasterImage::new_argb32(width, height, data).unwrap()
    }

    #[test]
    fn test_thumbnail_is_square() {
        let thumb = thumbnail(&solid(8, 4, 0xFF11_2233), 16).unwrap();
        assert_eq!(thumb.dimensions(), (16, 16));
        // Top row is padding, middle rows are the image
        assert_eq!(thumb.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(thumb.get_pixel(8, 8).0, [0x11, 0x22, 0x33, 0xFF]);
    }

    #[test]
    fn test_thumbnail_same_size() {
        let thumb = thumbnail(&solid(4, 4, 0xFF00_00FF), 4).unwrap();
        assert_eq!(thumb.get_pixel(3, 3).0, [0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_thumbnail_zero_size() {
        assert!(matches!(
            thumbnail(&solid(2, 2, 0), 0),
            Err(RomError::Range(_))
        ));
    }
}
