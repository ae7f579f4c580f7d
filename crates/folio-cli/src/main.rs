use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Scroll choreography for portfolio pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal preview of the page
    Preview {
        /// Page layout TOML (defaults to the built-in portfolio page)
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
    /// Replay a scripted session and print engine events as JSON lines
    Simulate {
        /// Session script TOML
        script: PathBuf,
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Pace the replay in real time
        #[arg(long)]
        realtime: bool,
    },
    /// Print measured geometry and trigger windows for a viewport
    Inspect {
        #[arg(short, long)]
        layout: Option<PathBuf>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
        /// Write the default configuration if no file exists yet
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Logs go to stderr so simulate output stays machine readable. The
    // preview owns the terminal, so it stays silent unless RUST_LOG asks.
    let interactive = matches!(cli.command, None | Some(Commands::Preview { .. }));
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if interactive {
            "off".to_string()
        } else {
            config.general.log_level.clone()
        }
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Preview { layout }) => {
            commands::preview::run(config, layout).await
        }
        None => commands::preview::run(config, None).await,
        Some(Commands::Simulate {
            script,
            layout,
            realtime,
        }) => commands::simulate::run(config, layout, &script, realtime).await,
        Some(Commands::Inspect {
            layout,
            width,
            height,
        }) => commands::inspect::run(config, layout, width, height),
        Some(Commands::Config { path, init }) => commands::config::run(&config, path, init),
    }
}
