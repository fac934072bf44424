//! Binary entry point for barillet.
//!
//! Command-line front-end for creating, editing, importing and exporting
//! barillets stored under the configured data directory.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use barillet::config::BarilletConfig;
use barillet::observability;
use clap::{Parser, Subcommand};

use commands::{AppContext, ThemeEdit};

/// Barillet - build, check and export improv match theme lists.
#[derive(Parser)]
#[command(name = "barillet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user instead of the configured one.
    #[arg(short, long, global = true, env = "BARILLET_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a barillet from the default template.
    New {
        /// Title.
        #[arg(short, long)]
        title: Option<String>,

        /// Match date (YYYY-MM-DD).
        #[arg(short, long)]
        date: Option<String>,

        /// Venue.
        #[arg(short, long)]
        location: Option<String>,
    },

    /// List your barillets, newest match first.
    List,

    /// Show a barillet with its statistics.
    Show {
        /// Barillet id.
        id: String,

        /// Print the portable JSON document instead.
        #[arg(long)]
        json: bool,
    },

    /// Change one theme of a barillet.
    EditTheme {
        /// Barillet id.
        id: String,

        /// Theme number (1-18).
        number: usize,

        #[command(flatten)]
        edit: ThemeEdit,
    },

    /// Import a barillet from a JSON file.
    Import {
        /// Path to a `.json` export.
        file: PathBuf,
    },

    /// Export a barillet.
    Export {
        /// Barillet id.
        id: String,

        /// Output format: pdf, json, csv or xlsx.
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Output directory (defaults to the configured export directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy a barillet.
    Duplicate {
        /// Barillet id.
        id: String,
    },

    /// Delete a barillet.
    Delete {
        /// Barillet id.
        id: String,
    },

    /// List the preset categories.
    Categories,
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = config.logging.clone().with_env_overrides(cli.verbose);
    if let Err(e) = observability::init_logging(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match cli.user.clone() {
        Some(user) => config.with_user(user),
        None => config,
    };

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Loads the explicit config file, or the default one, then env overrides.
fn load_config(path: Option<&std::path::Path>) -> barillet::Result<BarilletConfig> {
    let config = match path {
        Some(path) => BarilletConfig::load_from_file(path)?,
        None => BarilletConfig::load_default(),
    };
    Ok(config.with_env_overrides())
}

/// Runs the selected command.
fn run_command(command: Commands, config: BarilletConfig) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(command, Commands::Categories) {
        commands::cmd_categories();
        return Ok(());
    }

    let ctx = AppContext::open(config)?;
    match command {
        Commands::New {
            title,
            date,
            location,
        } => commands::cmd_new(&ctx, title, date, location),
        Commands::List => commands::cmd_list(&ctx),
        Commands::Show { id, json } => commands::cmd_show(&ctx, &id, json),
        Commands::EditTheme { id, number, edit } => commands::cmd_edit_theme(&ctx, &id, number, edit),
        Commands::Import { file } => commands::cmd_import(&ctx, &file),
        Commands::Export { id, format, output } => commands::cmd_export(&ctx, &id, &format, output),
        Commands::Duplicate { id } => commands::cmd_duplicate(&ctx, &id),
        Commands::Delete { id } => commands::cmd_delete(&ctx, &id),
        Commands::Categories => Ok(()),
    }
}
