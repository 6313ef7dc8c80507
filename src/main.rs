//! tplink-exporter main entry point
//!
//! Command-line interface for the TP-Link router exporter.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tplink_exporter::config::{load_config_with_hash, validate, CollectionMode, Config};
use tplink_exporter::output::{render, serve, AppState};
use tplink_exporter::{Collector, NamingTable};
use tracing_subscriber::EnvFilter;

/// tplink-exporter: Prometheus metrics for TP-Link web-admin routers
///
/// Logs into the router's web interface, scrapes WAN traffic and the
/// connected clients, and serves them on /metrics.
#[derive(Parser, Debug)]
#[command(name = "tplink-exporter")]
#[command(version)]
#[command(about = "Prometheus exporter for TP-Link routers", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Router's address
    #[arg(short, long)]
    address: Option<String>,

    /// Router's username
    #[arg(short, long)]
    username: Option<String>,

    /// Router's password
    #[arg(short = 'w', long)]
    password: Option<String>,

    /// Address the metrics endpoint listens on
    #[arg(short, long)]
    listen: Option<String>,

    /// MAC naming database
    #[arg(short = 'f', long)]
    mac_database: Option<String>,

    /// Collection mode: scrape per request (pull) or on an interval (timer)
    #[arg(long, value_enum)]
    mode: Option<CollectionMode>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single scrape cycle, print the metrics and exit
    #[arg(long, conflicts_with = "reboot")]
    once: bool,

    /// Reboot the router and exit
    #[arg(long, conflicts_with = "once")]
    reboot: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;
    let naming = NamingTable::load_or_empty(&config.naming.database_path);
    let collector = Arc::new(Collector::new(&config, naming)?);

    if cli.reboot {
        handle_reboot(&collector).await?;
        return Ok(());
    }

    if cli.once {
        handle_once(&collector).await?;
        return Ok(());
    }

    run_server(&config, collector)
        .await
        .with_context(|| format!("serving on {}", config.exporter.listen_address))?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tplink_exporter=info,warn"),
            1 => EnvFilter::new("tplink_exporter=debug,info"),
            2 => EnvFilter::new("tplink_exporter=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_configuration(cli: &Cli) -> tplink_exporter::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(address) = &cli.address {
        config.router.address = address.clone();
    }
    if let Some(username) = &cli.username {
        config.router.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.router.password = password.clone();
    }
    if let Some(listen) = &cli.listen {
        config.exporter.listen_address = listen.clone();
    }
    if let Some(path) = &cli.mac_database {
        config.naming.database_path = path.clone();
    }
    if let Some(mode) = cli.mode {
        config.exporter.collection_mode = mode;
    }

    validate(&config)?;
    Ok(config)
}

/// Handles --once: one cycle (with the pull-mode retry), printed to stdout
async fn handle_once(collector: &Collector) -> tplink_exporter::Result<()> {
    let snapshot = collector.scrape().await?;
    print!("{}", render(&snapshot));
    Ok(())
}

/// Handles --reboot
async fn handle_reboot(collector: &Collector) -> tplink_exporter::Result<()> {
    collector.reboot().await?;
    println!("Reboot requested");
    Ok(())
}

/// Binds the metrics listener and serves until the server stops
async fn run_server(config: &Config, collector: Arc<Collector>) -> tplink_exporter::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.exporter.listen_address.as_str()).await?;
    let state = AppState::new(collector, &config.exporter);
    serve(listener, state).await?;
    Ok(())
}
