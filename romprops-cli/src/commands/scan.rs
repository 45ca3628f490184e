use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romprops_lib::util::format_bytes;
use romprops_lib::{FormatId, RomContext};

use crate::error::CliError;

/// Detect every regular file under `dir` and print the recognized ones.
pub(crate) fn run_scan(ctx: &RomContext, dir: &Path) -> Result<(), CliError> {
    if !dir.is_dir() {
        return Err(CliError::other(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut found: Vec<(PathBuf, FormatId, Option<u64>)> = Vec::new();
    for path in &files {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        match ctx.identify_path(path) {
            Ok(Some(format)) => {
                found.push((path.clone(), format, file_size(path)));
            }
            Ok(None) => {}
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (path, format, size) in &found {
        let shown = path.strip_prefix(dir).unwrap_or(path.as_path());
        println!(
            "  {} [{}] {} ({})",
            shown.display().if_supports_color(Stdout, |t| t.bold()),
            format
                .system()
                .short_name()
                .if_supports_color(Stdout, |t| t.cyan()),
            format.describe(),
            size.map(format_bytes).unwrap_or_else(|| "unknown size".to_string()),
        );
    }
    println!();
    println!(
        "{} of {} files recognized",
        found.len().if_supports_color(Stdout, |t| t.bold()),
        files.len()
    );
    Ok(())
}

fn file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.len()),
        Err(e) => {
            log::warn!("{}: cannot read size: {}", path.display(), e);
            None
        }
    }
}

/// Recursively collect regular files. Symlinked directories are not
/// followed.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), CliError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
