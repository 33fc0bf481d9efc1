use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod models;
mod server;

use config::Config;

#[derive(Parser)]
#[command(name = "macrolog")]
#[command(version)]
#[command(about = "A food nutrition tracking API", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macrolog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }

            tracing::info!("Database: {}", config.database_path.display());

            let pool = db::init_db(&config.database_path).await?;
            server::serve(config, pool).await?;
        }
        Some(Commands::Config) => {
            println!("port: {}", config.port);
            println!("database_path: {}", config.database_path.display());
            println!("api_keys: {} configured", config.api_keys.len());
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
