//! Provtrack - Post-Deployment Provisioning Tracker
//!
//! Command line access to the provisioned flag of cluster nodes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use provtrack::config::TrackerConfig;
use provtrack::error::Result;
use provtrack::factory::build_tracker;
use provtrack::tracker::{AnyTracker, Tracker};

/// Provtrack - Post-Deployment Provisioning Tracker
#[derive(Parser)]
#[command(name = "provtrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to container-link environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print whether a node has been provisioned
    Get {
        /// Node key
        key: String,
    },

    /// Mark a node as provisioned
    Set {
        /// Node key
        key: String,
    },

    /// Clear the provisioned flag of a node
    Clear {
        /// Node key
        key: String,
    },

    /// Validate configuration
    Validate,

    /// Initialize a new configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "provtrack.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { output } = &cli.command {
        return run_init(output);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            return Err(e);
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(config.logging.level.as_str());
    init_logging(level);

    match cli.command {
        Commands::Get { key } => run_get(&config, &key).await,
        Commands::Set { key } => run_set(&config, &key).await,
        Commands::Clear { key } => run_clear(&config, &key).await,
        Commands::Validate => run_validate(&config),
        Commands::Init { .. } => Ok(()),
    }
}

/// Initialize logging
fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<TrackerConfig> {
    match path {
        Some(path) => TrackerConfig::from_file(path),
        None => TrackerConfig::from_env(),
    }
}

async fn run_get(config: &TrackerConfig, key: &str) -> Result<()> {
    let tracker = build_tracker(&config.store).await?;
    let provisioned = tracker.get(key).await?;
    println!("{}", provisioned);
    Ok(())
}

async fn run_set(config: &TrackerConfig, key: &str) -> Result<()> {
    let tracker = build_tracker(&config.store).await?;
    warn_if_transient(&tracker);
    tracker.set(key).await?;
    tracing::info!(key, "Node marked provisioned");
    Ok(())
}

async fn run_clear(config: &TrackerConfig, key: &str) -> Result<()> {
    let tracker = build_tracker(&config.store).await?;
    warn_if_transient(&tracker);
    tracker.clear(key).await?;
    tracing::info!(key, "Node provisioned flag cleared");
    Ok(())
}

fn warn_if_transient(tracker: &AnyTracker) {
    if !tracker.backend().is_durable() {
        tracing::warn!(
            backend = %tracker.backend(),
            "Change will be lost when this process exits; configure a redis backend to persist it"
        );
    }
}

fn run_validate(config: &TrackerConfig) -> Result<()> {
    config.validate()?;
    println!("✓ Configuration is valid");
    println!("  Backend: {}", config.store.backend);
    if let Some(url) = &config.store.redis_url {
        println!("  Redis URL: {}", url);
    }
    println!("  Log Level: {}", config.logging.level);
    Ok(())
}

fn run_init(output: &std::path::Path) -> Result<()> {
    let config_content = r#"# Provtrack Configuration
# Generated configuration file

[store]
# "memory" keeps flags in process memory only; "redis" persists them
backend = "memory"
# redis_url = "redis://127.0.0.1:6379"

[logging]
level = "info"
"#;

    std::fs::write(output, config_content)?;
    println!("Configuration file created: {}", output.display());
    println!("Then run: provtrack --config {} get <node>", output.display());

    Ok(())
}
