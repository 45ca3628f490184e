//! romprops CLI
//!
//! Command-line interface for inspecting amiibo dumps and Sega Saturn disc
//! images.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use romprops_lib::settings::load_settings;
use romprops_lib::RomContext;

use crate::commands::config::{run_config_path, run_config_show};
use crate::commands::info::run_info;
use crate::commands::list::run_list;
use crate::commands::scan::run_scan;
use crate::commands::thumb::run_thumb;
use crate::commands::urls::run_urls;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "romprops")]
#[command(about = "Identify ROM, disc, and figurine dumps and show their properties", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the properties of one or more files
    Info {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List external image URLs and their cache paths
    Urls { file: PathBuf },

    /// Export a square PNG thumbnail of an image
    Thumb {
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Edge length in pixels (defaults to the configured size)
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Detect every file under a directory
    Scan { dir: PathBuf },

    /// List supported systems
    List,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = RomContext::new();

    let result = match cli.command {
        Commands::Info { files, json } => run_info(&ctx, &files, json),
        Commands::Urls { file } => run_urls(&ctx, &file, &load_settings()),
        Commands::Thumb {
            input,
            output,
            size,
        } => {
            let size = size.unwrap_or_else(|| load_settings().thumbnails.size);
            run_thumb(&input, &output, size)
        }
        Commands::Scan { dir } => run_scan(&ctx, &dir),
        Commands::List => {
            run_list(&ctx);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Show => run_config_show(),
        },
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn report_error(e: &CliError) {
    eprintln!(
        "{} {}",
        "error:".if_supports_color(Stderr, |t| t.red()),
        e
    );
}
