// GreenRoute - Carbon-aware model routing proxy
// Main entry point

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use greenroute::backends::{CapableBackend, FastBackend};
use greenroute::config::load_config;
use greenroute::orchestrator::Orchestrator;
use greenroute::router::RoutingMode;
use greenroute::server::RouterServer;

#[derive(Parser, Debug)]
#[command(name = "greenroute")]
#[command(about = "Carbon-aware query router between a fast local model and a capable hosted model", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Process a single query and print the record as JSON
    Query {
        /// Query text
        text: String,

        /// Routing mode
        #[arg(long, value_enum, default_value = "auto")]
        mode: ModeArg,

        /// Write the metrics export to this path afterwards
        #[arg(long)]
        export_metrics: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Auto,
    ForceFast,
    ForceCapable,
}

impl From<ModeArg> for RoutingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => RoutingMode::Auto,
            ModeArg::ForceFast => RoutingMode::ForceFast,
            ModeArg::ForceCapable => RoutingMode::ForceCapable,
        }
    }
}

fn build_orchestrator() -> Result<Orchestrator> {
    let config = load_config()?;
    let fast = Arc::new(FastBackend::new(&config.fast)?);
    let capable = Arc::new(CapableBackend::new(&config.capable)?);
    Ok(Orchestrator::new(&config, fast, capable))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("greenroute=info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve { bind } => {
            let config = load_config()?;
            let bind_address = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let fast = Arc::new(FastBackend::new(&config.fast)?);
            let capable = Arc::new(CapableBackend::new(&config.capable)?);
            let orchestrator = Orchestrator::new(&config, fast, capable);

            RouterServer::new(orchestrator, bind_address).serve().await
        }
        Command::Query {
            text,
            mode,
            export_metrics,
        } => {
            let orchestrator = build_orchestrator()?;
            let record = orchestrator.process(&text, mode.into()).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);

            if let Some(path) = export_metrics {
                orchestrator.metrics().export(&path)?;
                tracing::info!("Metrics exported to {}", path.display());
            }

            Ok(())
        }
    }
}
