//! Media Catalog server
//!
//! A REST API for cataloging movies and TV series with nested seasons and
//! episodes.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use media_catalog::api::{self, AppState};
use media_catalog::models::config::{self, Config};
use media_catalog::store::Store;

/// Media Catalog - serve your movie and serie collection over HTTP
#[derive(Parser, Debug)]
#[command(name = "media-catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Path to the config.toml file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve { config } => {
            let config = config::load_config(config.as_deref());
            serve(config).await?;
        }
        Commands::InitConfig { force } => {
            init_config(force)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_catalog=debug")
    } else {
        EnvFilter::new("media_catalog=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Open the store and run the HTTP server.
async fn serve(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(Store::open(&config.storage.data_file)?);
    tracing::info!("Catalog data at {}", config.storage.data_file.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(store, &config);
    api::serve(addr, state).await
}

/// Write a default config file to the standard location.
fn init_config(force: bool) -> anyhow::Result<()> {
    let path = config::default_config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(&path, content)?;

    println!("{} {}", "Config written to".green(), path.display());
    Ok(())
}
