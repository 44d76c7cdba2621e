//! EBillr - invoicing client preferences, dashboard and settings
//!
//! Runs the terminal UI by default; subcommands expose the same preference,
//! theme and formatting operations for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ebillr::app::AppContext;
use ebillr::cli::{
    self, ConfigSubcommand, FieldsSubcommand, FormatSubcommand, PrefsSubcommand, ThemeSubcommand,
};
use ebillr::config::ConfigLoader;

/// EBillr - invoicing client preferences, dashboard and settings
#[derive(Parser, Debug)]
#[command(name = "ebillr")]
#[command(about = "Terminal client for EBillr preferences and dashboard", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Read and write stored preferences
    Prefs {
        #[command(subcommand)]
        subcommand: PrefsSubcommand,
    },
    /// Theme choice
    Theme {
        #[command(subcommand)]
        subcommand: ThemeSubcommand,
    },
    /// Invoice fields
    Fields {
        #[command(subcommand)]
        subcommand: FieldsSubcommand,
    },
    /// Preview locale formatting
    Format {
        #[command(subcommand)]
        subcommand: FormatSubcommand,
    },
    /// Print the dashboard summary and sales figures
    Dashboard {
        /// Chart range (7d, 1m, 3m or 1y); defaults to the preferred range
        #[arg(long)]
        range: Option<String>,
    },
    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config commands work on the config file alone
    let command = match args.command {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        other => other,
    };

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
        ConfigLoader::load_defaults()
    });

    if let Some(Command::Version) = command {
        cli::display_version(&config);
        return Ok(());
    }

    let ctx = AppContext::open(config).context("Failed to open EBillr storage")?;

    match command {
        Some(Command::Prefs { subcommand }) => cli::handle_prefs_command(&ctx, subcommand),
        Some(Command::Theme { subcommand }) => cli::handle_theme_command(&ctx, subcommand),
        Some(Command::Fields { subcommand }) => cli::handle_fields_command(&ctx, subcommand),
        Some(Command::Format { subcommand }) => cli::handle_format_command(&ctx, subcommand),
        Some(Command::Dashboard { range }) => cli::handle_dashboard_command(&ctx, range),
        Some(Command::Config { .. }) | Some(Command::Version) => Ok(()),
        None => run_ui(ctx).await,
    }
}

#[cfg(feature = "tui")]
async fn run_ui(ctx: AppContext) -> Result<()> {
    ebillr::tui::run_tui(ctx).await
}

#[cfg(not(feature = "tui"))]
async fn run_ui(_ctx: AppContext) -> Result<()> {
    anyhow::bail!("Built without the terminal UI; use a subcommand (see --help)")
}
