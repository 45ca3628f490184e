use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::ImageFormat;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romprops_lib::{PixelFormat, load_image, thumbnail};

use crate::error::CliError;

/// Decode `input`, pad it to a square, resize it to `size` pixels, and
/// write it out as PNG.
pub(crate) fn run_thumb(input: &Path, output: &Path, size: u32) -> Result<(), CliError> {
    if size == 0 {
        return Err(CliError::other("thumbnail size must be at least 1"));
    }

    let mut reader = BufReader::new(File::open(input)?);
    let image = load_image(&mut reader)?;
    log::info!(
        "{}: {}x{} {}",
        input.display(),
        image.width(),
        image.height(),
        match image.format() {
            PixelFormat::Ci8 => "indexed",
            PixelFormat::Argb32 => "ARGB32",
        }
    );

    let thumb = thumbnail(&image, size)?;
    thumb.save_with_format(output, ImageFormat::Png)?;

    println!(
        "{} {} ({}x{})",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        output.display(),
        size,
        size
    );
    Ok(())
}
