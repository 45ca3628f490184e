use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romprops_lib::RomContext;
use romprops_lib::cache::cache_file_path;
use romprops_lib::settings::{Settings, settings_path};

use crate::error::CliError;

/// List every external image URL the file resolves to, with the path its
/// download would be cached at.
pub(crate) fn run_urls(ctx: &RomContext, file: &Path, settings: &Settings) -> Result<(), CliError> {
    if !settings.ext_images.enabled {
        println!(
            "External images are disabled in {}",
            settings_path().display()
        );
        return Ok(());
    }

    let mut rom = ctx.open_path(file)?;
    let types = rom.supported_image_types();
    println!("{}", file.display().if_supports_color(Stdout, |t| t.bold()));
    if types.is_empty() {
        println!(
            "  {}",
            "No external images for this format".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    for image_type in types.iter() {
        let urls = rom.load_external_urls(image_type)?;
        if urls.is_empty() {
            log::info!("{}: no URLs", image_type.name());
            continue;
        }
        for ext in urls {
            println!(
                "  [{}] {}",
                image_type.name().if_supports_color(Stdout, |t| t.cyan()),
                ext.url
            );
            match cache_file_path(&ext.cache_key) {
                Some(path) if path.exists() => println!(
                    "    Cache: {} {}",
                    path.display(),
                    "(cached)".if_supports_color(Stdout, |t| t.green())
                ),
                Some(path) => println!("    Cache: {}", path.display()),
                None => println!(
                    "    Cache: {}",
                    "no valid cache path".if_supports_color(Stdout, |t| t.red())
                ),
            }
        }
    }
    Ok(())
}
