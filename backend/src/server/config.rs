//! Server settings loaded via OrthoConfig and the resolved server
//! configuration.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Listener settings. Every field may come from CLI flags, `USER_DIRECTORY_*`
/// environment variables or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct ServerSettings {
    /// Interface to bind. Defaults to all interfaces.
    #[ortho_config(default = String::from("0.0.0.0"))]
    pub host: String,
    /// TCP port to bind. `0` asks the OS for a free port.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Worker thread count. Defaults to the number of physical cores.
    pub workers: Option<usize>,
    /// Seconds granted to in-flight requests during a graceful stop.
    #[ortho_config(default = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    pub shutdown_timeout_secs: u64,
}

impl ServerSettings {
    /// Resolve the settings into a [`ServerConfig`].
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address.
    pub fn to_config(&self) -> io::Result<ServerConfig> {
        let ip: IpAddr = self.host.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {err}", self.host),
            )
        })?;
        let mut config = ServerConfig::new(SocketAddr::new(ip, self.port))
            .with_shutdown_timeout(Duration::from_secs(self.shutdown_timeout_secs));
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        Ok(config)
    }
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) workers: Option<usize>,
    pub(crate) shutdown_timeout: Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            workers: None,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
