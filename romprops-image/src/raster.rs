//! In-memory raster images and derived-image operations.
//!
//! Pixels are stored row-major with no row padding. `Argb32` pixels are
//! 32-bit ARGB words stored little-endian, so the bytes in memory read
//! blue, green, red, alpha.

use image::RgbaImage;

use romprops_core::RomError;

/// Number of entries an indexed image's palette must have to be expanded.
pub const PALETTE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit palette index per pixel
    Ci8,
    /// 32-bit ARGB per pixel (BGRA in memory)
    Argb32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Ci8 => 1,
            Self::Argb32 => 4,
        }
    }
}

/// A decoded image: dimensions, pixel format, pixels, and (for `Ci8`) an
/// ARGB palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
    palette: Vec<u32>,
}

fn check_dimensions(width: u32, height: u32, bpp: usize, len: usize) -> Result<(), RomError> {
    if width == 0 || height == 0 {
        return Err(RomError::malformed(format!(
            "image has zero area ({}x{})",
            width, height
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(bpp))
        .ok_or_else(|| RomError::range(format!("{}x{} image is too large", width, height)))?;
    if len != expected {
        return Err(RomError::malformed(format!(
            "pixel buffer holds {} bytes, expected {}",
            len, expected
        )));
    }
    Ok(())
}

impl RasterImage {
    /// Build an ARGB32 image from BGRA-ordered bytes.
    pub fn new_argb32(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RomError> {
        check_dimensions(width, height, 4, data.len())?;
        Ok(Self {
            width,
            height,
            format: PixelFormat::Argb32,
            data,
            palette: Vec::new(),
        })
    }

    /// Build an indexed image from one index byte per pixel.
    pub fn new_ci8(
        width: u32,
        height: u32,
        data: Vec<u8>,
        palette: Vec<u32>,
    ) -> Result<Self, RomError> {
        check_dimensions(width, height, 1, data.len())?;
        Ok(Self {
            width,
            height,
            format: PixelFormat::Ci8,
            data,
            palette,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// ARGB palette. Empty for `Argb32` images.
    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// ARGB value at `(x, y)`, resolved through the palette for `Ci8`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * self.format.bytes_per_pixel();
        match self.format {
            PixelFormat::Ci8 => self.palette.get(self.data[offset] as usize).copied(),
            PixelFormat::Argb32 => {
                let px = &self.data[offset..offset + 4];
                Some(u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            }
        }
    }

    /// Deep copy of pixels and palette.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Convert to `Argb32`. Indexed images need a full 256-entry palette.
    pub fn to_argb32(&self) -> Result<Self, RomError> {
        match self.format {
            PixelFormat::Argb32 => Ok(self.duplicate()),
            PixelFormat::Ci8 => {
                if self.palette.len() != PALETTE_SIZE {
                    return Err(RomError::malformed(format!(
                        "palette has {} entries, expected {}",
                        self.palette.len(),
                        PALETTE_SIZE
                    )));
                }
                let data = self
                    .data
                    .iter()
                    .flat_map(|&i| self.palette[i as usize].to_le_bytes())
                    .collect();
                Self::new_argb32(self.width, self.height, data)
            }
        }
    }

    /// Pad to a square with fully transparent pixels, centering the
    /// original. An odd leftover row goes to the bottom, an odd leftover
    /// column to the right.
    ///
    /// Only `Argb32` images are padded; anything else is duplicated as-is.
    pub fn squared(&self) -> Self {
        if self.width == self.height || self.format != PixelFormat::Argb32 {
            return self.duplicate();
        }
        let side = self.width.max(self.height);
        let src_stride = self.stride();
        let dst_stride = side as usize * 4;
        let mut data = vec![0u8; dst_stride * side as usize];

        let (left, top) = if self.width > self.height {
            (0, ((self.width - self.height) / 2) as usize)
        } else {
            (((self.height - self.width) / 2) as usize, 0)
        };

        for (y, row) in self.data.chunks_exact(src_stride).enumerate() {
            let start = (y + top) * dst_stride + left * 4;
            data[start..start + src_stride].copy_from_slice(row);
        }

        Self {
            width: side,
            height: side,
            format: PixelFormat::Argb32,
            data,
            palette: Vec::new(),
        }
    }

    /// Export as an RGBA buffer for the `image` crate.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, RomError> {
        let argb = self.to_argb32()?;
        let rgba: Vec<u8> = argb
            .data
            .chunks_exact(4)
            .flat_map(|bgra| [bgra[2], bgra[1], bgra[0], bgra[3]])
            .collect();
        RgbaImage::from_raw(argb.width, argb.height, rgba)
            .ok_or_else(|| RomError::malformed("pixel buffer does not match dimensions"))
    }
}

#[cfg(test)]
#[path = "tests/raster_tests.rs"]
mod tests;
