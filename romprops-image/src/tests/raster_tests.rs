use super::*;

const OPAQUE_RED: u32 = 0xFFFF_0000;
const OPAQUE_BLUE: u32 = 0xFF00_00FF;

/// Build an ARGB32 image where pixel (x, y) = `f(x, y)`.
fn make_argb(width: u32, height: u32, f: impl Fn(u32, u32) -> u32) -> RasterImage {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y).to_le_bytes());
        }
    }
    RasterImage::new_argb32(width, height, data).unwrap()
}

fn grey_palette() -> Vec<u32> {
    (0..256u32)
        .map(|i| 0xFF00_0000 | (i << 16) | (i << 8) | i)
        .collect()
}

#[test]
fn test_argb32_memory_order_is_bgra() {
    let img = make_argb(1, 1, |_, _| 0x8011_2233);
    assert_eq!(img.data(), &[0x33, 0x22, 0x11, 0x80]);
    assert_eq!(img.pixel(0, 0), Some(0x8011_2233));
}

#[test]
fn test_rejects_zero_area() {
    assert!(RasterImage::new_argb32(0, 4, Vec::new()).is_err());
    assert!(RasterImage::new_ci8(4, 0, Vec::new(), grey_palette()).is_err());
}

#[test]
fn test_rejects_wrong_buffer_length() {
    assert!(matches!(
        RasterImage::new_argb32(2, 2, vec![0; 15]),
        Err(RomError::Malformed(_))
    ));
}

#[test]
fn test_duplicate_is_deep_copy() {
    let img = RasterImage::new_ci8(2, 1, vec![0, 255], grey_palette()).unwrap();
    let dup = img.duplicate();
    assert_eq!(dup, img);
    assert_ne!(dup.data().as_ptr(), img.data().as_ptr());
}

#[test]
fn test_to_argb32_identity_on_argb32() {
    let img = make_argb(3, 2, |x, y| 0xFF00_0000 | (x << 8) | y);
    assert_eq!(img.to_argb32().unwrap(), img.duplicate());
}

#[test]
fn test_to_argb32_expands_palette() {
    let img = RasterImage::new_ci8(2, 1, vec![0x10, 0xFF], grey_palette()).unwrap();
    let argb = img.to_argb32().unwrap();
    assert_eq!(argb.format(), PixelFormat::Argb32);
    assert_eq!(argb.pixel(0, 0), Some(0xFF10_1010));
    assert_eq!(argb.pixel(1, 0), Some(0xFFFF_FFFF));
}

#[test]
fn test_to_argb32_requires_full_palette() {
    let img = RasterImage::new_ci8(1, 1, vec![0], vec![OPAQUE_RED; 16]).unwrap();
    assert!(matches!(img.to_argb32(), Err(RomError::Malformed(_))));
}

#[test]
fn test_squared_square_is_duplicate() {
    let img = make_argb(4, 4, |x, _| if x % 2 == 0 { OPAQUE_RED } else { OPAQUE_BLUE });
    assert_eq!(img.squared(), img.duplicate());
}

#[test]
fn test_squared_wide_pads_top_and_bottom() {
    // 4x1: 3 padding rows, 1 above and 2 below
    let img = make_argb(4, 1, |_, _| OPAQUE_RED);
    let sq = img.squared();
    assert_eq!((sq.width(), sq.height()), (4, 4));
    for x in 0..4 {
        assert_eq!(sq.pixel(x, 0), Some(0));
        assert_eq!(sq.pixel(x, 1), Some(OPAQUE_RED));
        assert_eq!(sq.pixel(x, 2), Some(0));
        assert_eq!(sq.pixel(x, 3), Some(0));
    }
}

#[test]
fn test_squared_wide_even_padding_is_centered() {
    let img = make_argb(6, 2, |x, y| 0xFF00_0000 | (y << 8) | x);
    let sq = img.squared();
    assert_eq!((sq.width(), sq.height()), (6, 6));
    assert!((0..6).all(|x| sq.pixel(x, 1) == Some(0)));
    assert_eq!(sq.pixel(5, 2), Some(0xFF00_0005));
    assert_eq!(sq.pixel(0, 3), Some(0xFF00_0100));
    assert!((0..6).all(|x| sq.pixel(x, 4) == Some(0)));
}

#[test]
fn test_squared_tall_pads_left_and_right() {
    // 1x4: 3 padding columns, 1 left and 2 right
    let img = make_argb(1, 4, |_, y| 0xFF00_0000 | y);
    let sq = img.squared();
    assert_eq!((sq.width(), sq.height()), (4, 4));
    for y in 0..4 {
        assert_eq!(sq.pixel(0, y), Some(0));
        assert_eq!(sq.pixel(1, y), Some(0xFF00_0000 | y));
        assert_eq!(sq.pixel(2, y), Some(0));
        assert_eq!(sq.pixel(3, y), Some(0));
    }
}

#[test]
fn test_squared_ci8_falls_back_to_duplicate() {
    let img = RasterImage::new_ci8(3, 1, vec![1, 2, 3], grey_palette()).unwrap();
    let sq = img.squared();
    assert_eq!(sq, img);
    assert_eq!(sq.format(), PixelFormat::Ci8);
}

#[test]
fn test_squared_does_not_modify_source() {
    let img = make_argb(2, 1, |_, _| OPAQUE_BLUE);
    let before = img.clone();
    let _ = img.squared();
    assert_eq!(img, before);
}

#[test]
fn test_to_rgba_image_channel_order() {
    let img = make_argb(1, 1, |_, _| 0x8011_2233);
    let rgba = img.to_rgba_image().unwrap();
    assert_eq!(rgba.get_pixel(0, 0).0, [0x11, 0x22, 0x33, 0x80]);
}
