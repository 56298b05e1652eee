use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothscroll_core::{AppConfig, EasingType};

mod commands;

#[derive(Parser)]
#[command(name = "smoothscroll")]
#[command(author, version, about = "Eased viewport scrolling, driven by a small state machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a document with animated scrolling
    View {
        /// Text or markdown file (built-in sample when omitted)
        file: Option<PathBuf>,
    },
    /// Run a scroll against an in-memory viewport and print every frame
    Simulate(SimulateArgs),
    /// Print the named easing curves
    Easings,
    /// Show the configuration file path and effective settings
    Config {
        /// Write the default configuration if no file exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Starting vertical offset
    #[arg(long, default_value_t = 500.0)]
    pub from: f64,
    /// Destination vertical offset
    #[arg(long, default_value_t = 0.0)]
    pub to: f64,
    /// Scene height
    #[arg(long, default_value_t = 2000.0)]
    pub scene_height: f64,
    /// Scene width
    #[arg(long, default_value_t = 800.0)]
    pub scene_width: f64,
    /// Delay before the first frame (ms); defaults to the configured value
    #[arg(long)]
    pub delay: Option<f64>,
    /// Animation duration (ms); defaults to the configured value
    #[arg(long)]
    pub duration: Option<f64>,
    /// Easing curve; defaults to the configured value
    #[arg(long)]
    pub easing: Option<EasingType>,
    /// Frames per second; defaults to the configured value
    #[arg(long)]
    pub fps: Option<u32>,
    /// Scroll a named element instead of the window
    #[arg(long)]
    pub element: Option<String>,
    /// Request a scroll of an element that was never registered
    #[arg(long)]
    pub missing: bool,
    /// Emit JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // The terminal viewer owns the screen, so it only logs when RUST_LOG asks for it
    let default_level = match cli.command {
        Some(Commands::View { .. }) | None => "off".to_string(),
        _ => config.general.log_level.clone(),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(default_level),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::View { file }) => commands::view::run(&config, file.as_deref()),
        None => commands::view::run(&config, None),
        Some(Commands::Simulate(args)) => commands::simulate::run(&config, args).await,
        Some(Commands::Easings) => commands::easings::run(),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}
