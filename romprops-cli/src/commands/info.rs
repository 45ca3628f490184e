use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};
use serde_json::{Value, json};

use romprops_lib::{Fields, RomContext, RomFormat};

use crate::error::CliError;

/// Show the properties of each file, as text or as a JSON array.
///
/// Files that cannot be read are reported and skipped; the command fails at
/// the end if any were skipped.
pub(crate) fn run_info(ctx: &RomContext, files: &[PathBuf], json: bool) -> Result<(), CliError> {
    let mut failed = 0;
    let mut reports = Vec::new();

    for (i, path) in files.iter().enumerate() {
        let result = ctx
            .open_path(path)
            .map_err(CliError::from)
            .and_then(|mut rom| {
                if json {
                    reports.push(file_json(path, rom.as_mut())?);
                } else {
                    if i > 0 {
                        println!();
                    }
                    print_file(path, rom.as_mut())?;
                }
                Ok(())
            });

        if let Err(e) = result {
            failed += 1;
            if json {
                reports.push(json!({
                    "file": path.display().to_string(),
                    "error": e.to_string(),
                }));
            } else {
                eprintln!(
                    "{} {}: {}",
                    "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                    path.display(),
                    e
                );
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        return Err(CliError::Partial {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}

fn print_file(path: &Path, rom: &mut dyn RomFormat) -> Result<(), CliError> {
    let format = rom
        .format_id()
        .map(|f| f.to_string())
        .unwrap_or_else(|| rom.system().display_name().to_string());
    let fields = rom.loaded_fields()?;

    println!("{}", path.display().if_supports_color(Stdout, |t| t.bold()));
    println!(
        "  {}",
        format.if_supports_color(Stdout, |t| t.cyan())
    );

    let rows = field_rows(fields);
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in rows {
        let mut lines = value.lines();
        let first = lines.next().unwrap_or("");
        println!(
            "  {:<width$}  {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.bold()),
            first,
            width = width + 1
        );
        for line in lines {
            println!("  {:<width$}  {}", "", line, width = width + 1);
        }
    }
    Ok(())
}

/// Displayable `(name, value)` rows. Entries recorded as invalid are
/// hidden.
pub(crate) fn field_rows(fields: &Fields) -> Vec<(&'static str, String)> {
    fields
        .iter()
        .filter_map(|(desc, value)| Some((desc.name, value.display(desc)?)))
        .collect()
}

fn file_json(path: &Path, rom: &mut dyn RomFormat) -> Result<Value, CliError> {
    let system = rom.system();
    let format = rom.format_id().map(|f| f.describe());
    let fields = rom.loaded_fields()?;
    Ok(json!({
        "file": path.display().to_string(),
        "system": system.short_name(),
        "format": format,
        "fields": fields_json(fields)?,
    }))
}

/// Each entry as `{name, kind, value, display}`. `display` is null for
/// invalid entries.
pub(crate) fn fields_json(fields: &Fields) -> Result<Value, CliError> {
    let entries = fields
        .iter()
        .map(|(desc, value)| -> Result<Value, CliError> {
            Ok(json!({
                "name": desc.name,
                "kind": desc.kind.name(),
                "value": serde_json::to_value(value)?,
                "display": value.display(desc),
            }))
        })
        .collect::<Result<Vec<Value>, CliError>>()?;
    Ok(Value::Array(entries))
}

#[cfg(test)]
#[path = "tests/info_tests.rs"]
mod tests;
