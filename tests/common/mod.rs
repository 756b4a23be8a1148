//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use reqwest::header::HeaderValue;
use vuln_labs::config::{LabConfig, PasswordHashConfig};
use vuln_labs::{LabServer, Service, Shutdown};

/// A running service plus the handle that stops it.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Defaults with hashing cheap enough for debug builds.
pub fn test_config(base_dir: &Path) -> LabConfig {
    let mut config = LabConfig::default();
    config.files.base_dir = base_dir.to_string_lossy().into_owned();
    config.auth.password_hash = PasswordHashConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Start `service` on an ephemeral port.
pub async fn spawn_service(service: Service, config: LabConfig) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = LabServer::new(service, config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[allow(dead_code)]
pub fn header_str(value: Option<&HeaderValue>) -> &str {
    value.and_then(|v| v.to_str().ok()).unwrap_or_default()
}
