use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romprops_lib::cache::cache_dir;
use romprops_lib::settings::{load_settings, settings_path, settings_string};

use crate::error::CliError;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Show the effective settings and where they came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();

    println!(
        "{}",
        "romprops Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    if path.exists() {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    match cache_dir() {
        Some(dir) => println!(
            "  Image cache:   {}",
            dir.display().if_supports_color(Stdout, |t| t.cyan())
        ),
        None => println!(
            "  Image cache:   {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    println!();

    let settings = load_settings();
    for line in settings_string(&settings)?.lines() {
        println!("  {}", line);
    }
    Ok(())
}
