//! FocusLens CLI: score recorded landmark streams for attention.
//!
//! Usage:
//!   focuslens replay <PATH>       Replay a stream and print per-frame status
//!   focuslens summarize <PATH>    Print the session summary as JSON
//!   focuslens validate <PATH>     Check a landmark stream for problems
//!   focuslens config              Show or initialize configuration

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use focuslens_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "focuslens",
    about = "Attention scoring from facial landmark streams",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/focuslens/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a landmark stream and print attention per frame
    Replay {
        /// Path to the landmark stream (JSONL)
        path: PathBuf,

        /// Rolling attention window, in face-present frames
        #[arg(long)]
        window: Option<usize>,

        /// Iris offset threshold (normalized units)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Also write a report log to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a landmark stream and print only the session summary
    Summarize {
        /// Path to the landmark stream (JSONL)
        path: PathBuf,
    },

    /// Validate a landmark stream
    Validate {
        /// Path to the landmark stream (JSONL)
        path: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Configuration the command runs with.
///
/// An explicit `--config` path is loaded strictly, except under
/// `config --init`, which replaces whatever is there with the defaults.
fn resolve_config(path: Option<&Path>, init: bool) -> anyhow::Result<AppConfig> {
    match path {
        Some(_) if init => Ok(AppConfig::default()),
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let init = matches!(cli.command, Commands::Config { init: true });
    let config = resolve_config(cli.config.as_deref(), init)?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    focuslens_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            path,
            window,
            threshold,
            json,
            output,
        } => commands::replay::run(
            commands::replay::ReplayArgs {
                path,
                window,
                threshold,
                json,
                output,
            },
            &config,
        ),
        Commands::Summarize { path } => commands::summarize::run(path, &config),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Config { init } => commands::config::run(cli.config, init, &config),
    }
}
