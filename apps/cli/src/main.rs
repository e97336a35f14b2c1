//! Tollgate CLI: inspect and drive a send-and-wait approval node.
//!
//! ```text
//! tollgate outputs node.json
//! tollgate run node.json --input items.json --callback decision.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::{CliConfig, Overrides};

/// Tollgate command-line driver
#[derive(Parser)]
#[command(name = "tollgate")]
#[command(about = "Send an approval request, wait for the decision, route on it", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "TOLLGATE_CONFIG", default_value = "tollgate.toml")]
    config: PathBuf,

    /// Base URL callback addresses are rooted at
    #[arg(long)]
    public_url: Option<String>,

    /// Sending account id
    #[arg(long)]
    account_id: Option<String>,

    /// Log filter directive (e.g. `info,tollgate_runtime=debug`)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Print the output lanes a node configuration produces
    Outputs {
        /// Node parameters (JSON object)
        params: PathBuf,
    },

    /// Start the node, deliver one callback, print the routed outputs
    Run {
        /// Node parameters (JSON object)
        params: PathBuf,

        /// Input records (JSON array of objects)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Callback body (JSON)
        #[arg(long)]
        callback: PathBuf,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            public_url: self.public_url.clone(),
            account_id: self.account_id.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(&cli.config, &cli.overrides())?;
    let _log = tollgate_log::init_with(config.log_config()?)?;
    tracing::debug!(public_url = %config.public_url, "configuration loaded");

    match cli.command {
        Commands::Outputs { params } => commands::outputs(&params),
        Commands::Run {
            params,
            input,
            callback,
        } => commands::run(&config, &params, input.as_deref(), &callback).await,
    }
}
