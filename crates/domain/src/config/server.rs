use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// IP literal to listen on, IPv4 or IPv6 (`0.0.0.0`, `::`).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Seconds an idle TCP client connection is kept open between queries.
    #[serde(default = "default_tcp_idle_timeout_secs")]
    pub tcp_idle_timeout_secs: u64,

    /// UDP queries resolved at once; datagrams beyond this are dropped.
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            tcp_idle_timeout_secs: default_tcp_idle_timeout_secs(),
            max_concurrent_queries: default_max_concurrent_queries(),
        }
    }
}

impl ServerConfig {
    pub fn dns_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Bind address '{}' is not an IP address",
                self.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.dns_port))
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_tcp_idle_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_queries() -> usize {
    1024
}
