use super::*;
use crate::PixelFormat;

/// Encode a PNG in memory.
fn make_png(
    width: u32,
    height: u32,
    color: ColorType,
    depth: BitDepth,
    plte: Option<&[u8]>,
    trns: Option<&[u8]>,
    pixels: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(plte) = plte {
            encoder.set_palette(plte.to_vec());
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
        writer.finish().unwrap();
    }
    out
}

#[test]
fn test_rejects_unknown_magic() {
    let err = load_bytes(b"GIF89a\0\0\0\0\0\0").unwrap_err();
    assert!(matches!(err, RomError::Unsupported(_)));
    assert!(matches!(load_bytes(&[]), Err(RomError::Unsupported(_))));
}

#[test]
fn test_rejects_truncated_png() {
    let png = make_png(2, 2, ColorType::Rgb, BitDepth::Eight, None, None, &[0; 12]);
    assert!(load_bytes(&png[..20]).is_err());
    assert!(load_bytes(&PNG_MAGIC).is_err());
}

#[test]
fn test_rejects_corrupt_header() {
    let mut png = make_png(1, 1, ColorType::Rgb, BitDepth::Eight, None, None, &[1, 2, 3]);
    // Zero the width; the chunk CRC no longer matches either
    png[16..20].copy_from_slice(&[0, 0, 0, 0]);
    assert!(load_bytes(&png).is_err());
}

#[test]
fn test_rgb_gets_opaque_alpha() {
    let png = make_png(
        2,
        1,
        ColorType::Rgb,
        BitDepth::Eight,
        None,
        None,
        &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66],
    );
    let img = load_bytes(&png).unwrap();
    assert_eq!(img.format(), PixelFormat::Argb32);
    assert_eq!((img.width(), img.height()), (2, 1));
    assert_eq!(img.pixel(0, 0), Some(0xFF11_2233));
    assert_eq!(img.pixel(1, 0), Some(0xFF44_5566));
    // BGRA in memory
    assert_eq!(&img.data()[..4], &[0x33, 0x22, 0x11, 0xFF]);
}

#[test]
fn test_rgba_keeps_alpha() {
    let png = make_png(
        1,
        1,
        ColorType::Rgba,
        BitDepth::Eight,
        None,
        None,
        &[0x10, 0x20, 0x30, 0x40],
    );
    assert_eq!(load_bytes(&png).unwrap().pixel(0, 0), Some(0x4010_2030));
}

#[test]
fn test_grayscale_expands_to_argb() {
    let png = make_png(2, 1, ColorType::Grayscale, BitDepth::Eight, None, None, &[0x00, 0x80]);
    let img = load_bytes(&png).unwrap();
    assert_eq!(img.pixel(0, 0), Some(0xFF00_0000));
    assert_eq!(img.pixel(1, 0), Some(0xFF80_8080));
}

#[test]
fn test_sixteen_bit_is_stripped() {
    let png = make_png(
        1,
        1,
        ColorType::Rgb,
        BitDepth::Sixteen,
        None,
        None,
        &[0xAB, 0x00, 0xCD, 0x00, 0xEF, 0x00],
    );
    assert_eq!(load_bytes(&png).unwrap().pixel(0, 0), Some(0xFFAB_CDEF));
}

#[test]
fn test_palette_with_trns() {
    let plte = [0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF];
    // Only the first two entries get alpha; the third stays opaque
    let trns = [0x00, 0x80];
    let png = make_png(
        3,
        1,
        ColorType::Indexed,
        BitDepth::Eight,
        Some(&plte),
        Some(&trns),
        &[0, 1, 2],
    );
    let img = load_bytes(&png).unwrap();
    assert_eq!(img.format(), PixelFormat::Ci8);
    assert_eq!(img.data(), &[0, 1, 2]);
    assert_eq!(img.palette().len(), 256);
    assert_eq!(img.palette()[0], 0x00FF_0000);
    assert_eq!(img.palette()[1], 0x8000_FF00);
    assert_eq!(img.palette()[2], 0xFF00_00FF);
    assert_eq!(img.palette()[3], 0);
}

#[test]
fn test_palette_without_trns_is_opaque() {
    let plte = [0x10, 0x20, 0x30];
    let png = make_png(1, 1, ColorType::Indexed, BitDepth::Eight, Some(&plte), None, &[0]);
    let img = load_bytes(&png).unwrap();
    assert_eq!(img.palette()[0], 0xFF10_2030);
    assert_eq!(img.to_argb32().unwrap().pixel(0, 0), Some(0xFF10_2030));
}

#[test]
fn test_low_bit_depth_indices_are_unpacked() {
    let plte = [0, 0, 0, 255, 255, 255, 255, 0, 0, 0, 255, 0];
    // 2-bit indices 0,1,2,3 packed MSB first into one byte, 5 pixels spill into a second
    let png = make_png(
        5,
        1,
        ColorType::Indexed,
        BitDepth::Two,
        Some(&plte),
        None,
        &[0b00_01_10_11, 0b10_00_00_00],
    );
    let img = load_bytes(&png).unwrap();
    assert_eq!(img.data(), &[0, 1, 2, 3, 2]);
}

#[test]
fn test_load_from_reader_rewinds() {
    let png = make_png(1, 1, ColorType::Grayscale, BitDepth::Eight, None, None, &[7]);
    let mut cursor = Cursor::new(png);
    cursor.seek(SeekFrom::End(0)).unwrap();
    let img = load(&mut cursor).unwrap();
    assert_eq!(img.pixel(0, 0), Some(0xFF07_0707));
}

/// Counts the bytes handed out through `read`.
struct CountingReader {
    inner: Cursor<Vec<u8>>,
    bytes_read: usize,
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n;
        Ok(n)
    }
}

impl Seek for CountingReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_load_rejects_from_signature_alone() {
    let mut reader = CountingReader {
        inner: Cursor::new(vec![0u8; 1 << 20]),
        bytes_read: 0,
    };
    assert!(matches!(load(&mut reader), Err(RomError::Unsupported(_))));
    assert!(reader.bytes_read <= PNG_MAGIC.len());
}

#[test]
fn test_load_short_source_is_unsupported() {
    let mut cursor = Cursor::new(PNG_MAGIC[..5].to_vec());
    assert!(matches!(load(&mut cursor), Err(RomError::Unsupported(_))));
}

#[test]
fn test_build_palette_rejects_bad_length() {
    assert!(build_palette(&[1, 2], None).is_err());
    assert!(build_palette(&vec![0; 3 * 257], None).is_err());
}

#[test]
fn test_unpack_one_bit() {
    let mut out = Vec::new();
    unpack_indices(&[0b1010_0000], BitDepth::One, 4, &mut out).unwrap();
    assert_eq!(out, vec![1, 0, 1, 0]);
}
