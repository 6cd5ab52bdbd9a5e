//! Callouts CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "callouts")]
#[command(about = "Interactive flow diagrams of parliamentary interruptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Dataset with `nodes` and `interruptions`
    #[arg(short, long, default_value = "callouts_structure.json")]
    data: PathBuf,

    /// Layout and palette config (defaults to callouts.toml next to the dataset)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the visualization server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7890")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
    /// Print the dataset summary
    Summary,
    /// List sessions with their dates
    Sessions,
    /// Print the positioned diagram of a session as JSON
    Diagram {
        /// Session number
        session: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "callouts={0},callouts_core={0},callouts_server={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Callouts v{}", env!("CARGO_PKG_VERSION"));

    let config_path = commands::config_path(&cli.data, cli.config);
    match cli.command {
        Commands::Serve { port, host, open } => {
            commands::serve(&cli.data, &config_path, host, port, open).await
        }
        Commands::Summary => commands::summary(&cli.data),
        Commands::Sessions => commands::sessions(&cli.data),
        Commands::Diagram { session } => commands::diagram(&cli.data, &config_path, &session),
        Commands::Version => {
            println!("Callouts v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
