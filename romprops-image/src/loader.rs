//! Image Loader: sniff the magic bytes and decode into a [`RasterImage`].
//!
//! Only PNG is recognized. Palette images stay indexed (`Ci8`, with the
//! palette widened to 256 ARGB entries); everything else becomes `Argb32`
//! with an opaque alpha channel when the source has none.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use log::trace;
use png::{BitDepth, ColorType, Transformations};

use romprops_core::RomError;

use crate::raster::{PALETTE_SIZE, RasterImage};

/// PNG file signature.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// IHDR is always the first chunk: signature, length, tag, then fields.
const IHDR_TAG_OFFSET: usize = 12;
const IHDR_COLOR_TYPE_OFFSET: usize = 25;

/// PNG color type value for palette images.
const PNG_COLOR_INDEXED: u8 = 3;

/// Load an image from a seekable source. Fails with `Unsupported` unless the
/// data starts with a recognized signature; only the signature is read
/// from a source that has none.
pub fn load<R: Read + Seek>(reader: &mut R) -> Result<RasterImage, RomError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut magic = [0u8; PNG_MAGIC.len()];
    match reader.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(unknown_signature()),
        Err(e) => return Err(e.into()),
    }
    if magic != PNG_MAGIC {
        return Err(unknown_signature());
    }

    reader.seek(SeekFrom::Start(0))?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_png(&data)
}

/// Load an image from an in-memory buffer.
pub fn load_bytes(data: &[u8]) -> Result<RasterImage, RomError> {
    if data.starts_with(&PNG_MAGIC) {
        return decode_png(data);
    }
    Err(unknown_signature())
}

fn unknown_signature() -> RomError {
    RomError::unsupported("no decoder for this image signature")
}

fn png_error(e: png::DecodingError) -> RomError {
    RomError::malformed(format!("PNG decode failed: {}", e))
}

fn decode_png(data: &[u8]) -> Result<RasterImage, RomError> {
    if data.get(IHDR_TAG_OFFSET..IHDR_TAG_OFFSET + 4) != Some(b"IHDR".as_slice()) {
        return Err(RomError::malformed("PNG does not start with an IHDR chunk"));
    }
    let indexed = data.get(IHDR_COLOR_TYPE_OFFSET) == Some(&PNG_COLOR_INDEXED);

    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(if indexed {
        Transformations::IDENTITY
    } else {
        Transformations::EXPAND | Transformations::STRIP_16
    });
    let mut reader = decoder.read_info().map_err(png_error)?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width == 0 || height == 0 {
        return Err(RomError::malformed(format!(
            "image has zero area ({}x{})",
            width, height
        )));
    }
    trace!("decoding {}x{} PNG (indexed: {})", width, height, indexed);

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(png_error)?;
    let rows = buf[..frame.buffer_size()].chunks_exact(frame.line_size);

    if indexed {
        let palette = {
            let info = reader.info();
            let plte = info
                .palette
                .as_deref()
                .ok_or_else(|| RomError::malformed("palette image has no PLTE chunk"))?;
            build_palette(plte, info.trns.as_deref())?
        };
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            unpack_indices(row, frame.bit_depth, width as usize, &mut pixels)?;
        }
        RasterImage::new_ci8(width, height, pixels, palette)
    } else {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for row in rows {
            pack_bgra(row, frame.color_type, width as usize, &mut pixels)?;
        }
        RasterImage::new_argb32(width, height, pixels)
    }
}

/// Combine PLTE with tRNS index for index. Entries tRNS does not cover are
/// opaque; slots past the end of PLTE are zero.
fn build_palette(plte: &[u8], trns: Option<&[u8]>) -> Result<Vec<u32>, RomError> {
    if plte.len() % 3 != 0 || plte.len() / 3 > PALETTE_SIZE {
        return Err(RomError::malformed(format!(
            "PLTE chunk has invalid length {}",
            plte.len()
        )));
    }
    let trns = trns.unwrap_or(&[]);
    let mut palette = vec![0u32; PALETTE_SIZE];
    for (i, rgb) in plte.chunks_exact(3).enumerate() {
        let alpha = trns.get(i).copied().unwrap_or(0xFF);
        palette[i] = u32::from_be_bytes([alpha, rgb[0], rgb[1], rgb[2]]);
    }
    Ok(palette)
}

/// Expand one row of 1/2/4/8-bit palette indices to one byte per pixel.
fn unpack_indices(
    row: &[u8],
    depth: BitDepth,
    width: usize,
    out: &mut Vec<u8>,
) -> Result<(), RomError> {
    let bits = match depth {
        BitDepth::One => 1,
        BitDepth::Two => 2,
        BitDepth::Four => 4,
        BitDepth::Eight => 8,
        BitDepth::Sixteen => {
            return Err(RomError::malformed("16-bit palette indices"));
        }
    };
    let per_byte = 8 / bits;
    let mask = ((1u16 << bits) - 1) as u8;
    for x in 0..width {
        let byte = *row
            .get(x / per_byte)
            .ok_or_else(|| RomError::malformed("PNG row is truncated"))?;
        let shift = 8 - bits * (x % per_byte + 1);
        out.push((byte >> shift) & mask);
    }
    Ok(())
}

/// Convert one row of 8-bit gray/RGB samples (with or without alpha) to
/// BGRA bytes.
fn pack_bgra(
    row: &[u8],
    color: ColorType,
    width: usize,
    out: &mut Vec<u8>,
) -> Result<(), RomError> {
    let channels = match color {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(RomError::malformed("palette was not expanded"));
        }
    };
    let samples = row
        .get(..width * channels)
        .ok_or_else(|| RomError::malformed("PNG row is truncated"))?;
    for px in samples.chunks_exact(channels) {
        let [b, g, r, a] = match color {
            ColorType::Grayscale => [px[0], px[0], px[0], 0xFF],
            ColorType::GrayscaleAlpha => [px[0], px[0], px[0], px[1]],
            ColorType::Rgb => [px[2], px[1], px[0], 0xFF],
            _ => [px[2], px[1], px[0], px[3]],
        };
        out.extend_from_slice(&[b, g, r, a]);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
