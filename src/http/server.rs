//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the state for the selected service
//! - Create the Axum Router with that service's handlers
//! - Wire up middleware (timeout, body limit, security headers, request ID, tracing)
//! - Serve on a bound listener until shutdown is signalled

use axum::Router;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::auth::{self, cookie::CookieSettings, handlers::AuthState, AccountStore, Authenticator, SessionStore};
use crate::config::LabConfig;
use crate::files::{self, handlers::FilesState, FileService};
use crate::http::request::with_request_tracing;
use crate::lifecycle::startup::StartupError;
use crate::orders::{self, Catalog};
use crate::security::headers::apply_security_headers;

/// The three independently deployable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Service {
    /// Path traversal demo: `/read`, `/read-no-validate`, `/setup-sample`.
    Files,
    /// Session authentication demo: `/api/login`, `/api/me`, `/api/logout`.
    Auth,
    /// IDOR demo: `/`, `/orders/{order_id}`.
    Orders,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Service::Files => "files",
            Service::Auth => "auth",
            Service::Orders => "orders",
        }
    }

    /// Configured bind address for this service.
    pub fn bind_address(self, config: &LabConfig) -> &str {
        match self {
            Service::Files => &config.files.bind_address,
            Service::Auth => &config.auth.bind_address,
            Service::Orders => &config.orders.bind_address,
        }
    }

    pub fn set_bind_address(self, config: &mut LabConfig, address: String) {
        match self {
            Service::Files => config.files.bind_address = address,
            Service::Auth => config.auth.bind_address = address,
            Service::Orders => config.orders.bind_address = address,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP server for one lab service.
pub struct LabServer {
    service: Service,
    router: Router,
    config: LabConfig,
}

impl LabServer {
    /// Build the service state and router.
    ///
    /// For the auth service this hashes the seed accounts, which is slow by design.
    pub fn new(service: Service, config: LabConfig) -> Result<Self, StartupError> {
        let routes = match service {
            Service::Files => {
                let file_service =
                    FileService::new(&config.files.base_dir).map_err(StartupError::BaseDir)?;
                tracing::info!(
                    base = %file_service.base().path().display(),
                    unvalidated_route = config.files.expose_unvalidated_route,
                    "File service initialized"
                );
                let state = FilesState {
                    service: Arc::new(file_service),
                };
                files::setup_files_router(state, config.files.expose_unvalidated_route)
            }
            Service::Auth => {
                let accounts = AccountStore::with_demo_accounts(&config.auth.password_hash)?;
                let authenticator = Authenticator::new(
                    accounts,
                    SessionStore::new(),
                    Duration::from_secs(config.auth.session_ttl_secs),
                );
                tracing::info!(
                    session_ttl_secs = config.auth.session_ttl_secs,
                    "Auth service initialized"
                );
                let state = AuthState {
                    authenticator: Arc::new(authenticator),
                    cookie: CookieSettings::from_config(&config.auth),
                };
                auth::setup_auth_router(state)
            }
            Service::Orders => orders::setup_orders_router(Arc::new(Catalog::demo())),
        };

        let router = Self::build_router(&config, service, routes);
        Ok(Self {
            service,
            router,
            config,
        })
    }

    /// Wrap service routes with the shared middleware stack.
    #[allow(deprecated)]
    fn build_router(config: &LabConfig, service: Service, routes: Router) -> Router {
        let mut router = routes
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.security.enable_headers {
            router = apply_security_headers(router, service);
        }

        with_request_tracing(router)
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = %self.service,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(service = %self.service, "HTTP server stopped");
        Ok(())
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &LabConfig {
        &self.config
    }
}
