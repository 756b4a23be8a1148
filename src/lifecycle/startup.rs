//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply command-line overrides to the loaded configuration
//! - Bind the listener for the selected service
//! - Name every way startup can fail
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - State is built before the listener is bound (traffic only when ready)

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::auth::PasswordError;
use crate::config::LabConfig;
use crate::http::Service;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base directory: {0}")]
    BaseDir(#[source] std::io::Error),

    #[error("failed to seed accounts: {0}")]
    Accounts(#[from] PasswordError),

    #[error("invalid address override '{0}'")]
    Override(String),
}

/// Apply `--bind` / `--port` to the selected service's bind address.
///
/// `bind` replaces the whole address; `port` then replaces just the port.
pub fn apply_overrides(
    config: &mut LabConfig,
    service: Service,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<(), StartupError> {
    if let Some(bind) = bind {
        service.set_bind_address(config, bind);
    }

    if let Some(port) = port {
        let current = service.bind_address(config).to_string();
        let mut addr: SocketAddr = current
            .parse()
            .map_err(|_| StartupError::Override(current.clone()))?;
        addr.set_port(port);
        service.set_bind_address(config, addr.to_string());
    }

    Ok(())
}

/// Bind a TCP listener on `address`.
pub async fn bind_listener(address: &str) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listening for connections");
    }

    Ok(listener)
}
