use std::net::SocketAddr;

use anyhow::Context;

/// Environment-driven settings with development defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://todos.db".to_string());
        let listen_addr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address like 127.0.0.1:3000")?;
        Ok(Self { database_url, listen_addr })
    }
}
