//! Startup configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INDEX: &str = "static/index.html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Landing page served at `/` and for unmatched paths.
    pub index_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            index_path: PathBuf::from(DEFAULT_INDEX),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `FIBSPIRAL_BIND` and `FIBSPIRAL_INDEX`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = ServerConfig::default();
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
        }
        if let Some(host) = lookup("FIBSPIRAL_BIND") {
            config.host = host
                .trim()
                .parse()
                .with_context(|| format!("FIBSPIRAL_BIND must be an IP address, got {host:?}"))?;
        }
        if let Some(index) = lookup("FIBSPIRAL_INDEX") {
            config.index_path = PathBuf::from(index);
        }
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
