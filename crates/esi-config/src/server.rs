//! HTTP server configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_site_root() -> PathBuf {
    PathBuf::from(".")
}

/// Default JSON body limit (1 MiB).
const fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind (IPv4 or IPv6 literal).
    #[serde(default = "default_bind")]
    pub bind: String,

    /// TCP port. Also reported by the health endpoint.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory the static site is served from.
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            site_root: default_site_root(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ServerConfig {
    /// Resolve `bind` + `port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `bind` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                field: "server.bind".into(),
                reason: format!("'{}' is not an IP address: {e}", self.bind),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
