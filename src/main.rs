//! Security lab services.
//!
//! ```text
//!                ┌──────────────────────────────────────────────┐
//!   request ────▶│ request id → trace → headers → limits → timeout │
//!                └───────────────────────┬──────────────────────┘
//!                                        ▼
//!          ┌──────────────┬──────────────┴─────────┬──────────────────┐
//!          │ files        │ auth                   │ orders           │
//!          │ resolver     │ accounts + sessions    │ X-User-Id guard  │
//!          │ (confined)   │ (argon2id, uuid v4)    │ + ownership check│
//!          └──────────────┴────────────────────────┴──────────────────┘
//! ```
//!
//! One service runs per process; pick it on the command line.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use vuln_labs::config::loader::load_config;
use vuln_labs::config::LabConfig;
use vuln_labs::lifecycle::{signals, startup};
use vuln_labs::observability::{logging, metrics};
use vuln_labs::{LabServer, Service, Shutdown};

#[derive(Parser)]
#[command(name = "vuln-labs", version)]
#[command(about = "Path traversal, session auth and IDOR lab services", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "LAB_CONFIG")]
    config: Option<PathBuf>,

    /// Override the service's bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override only the port of the bind address.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Service to run.
    #[arg(value_enum)]
    service: Service,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LabConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(service = %cli.service, "vuln-labs v{} starting", env!("CARGO_PKG_VERSION"));

    startup::apply_overrides(&mut config, cli.service, cli.bind, cli.port)?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let bind_address = cli.service.bind_address(&config).to_string();
    let server = LabServer::new(cli.service, config)?;
    let listener = startup::bind_listener(&bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
