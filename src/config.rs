//! Runtime configuration, read from the environment (and `.env` via `dotenv`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const HOST: &str = "FYYUR_HOST";
pub const PORT: &str = "FYYUR_PORT";
pub const MAX_CONNECTIONS: &str = "FYYUR_MAX_CONNECTIONS";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Postgres connection string
    pub database_url: String,
    /// The interface to listen on (default: 0.0.0.0)
    pub host: IpAddr,
    /// The port to listen on (default: 5000)
    pub port: u16,
    /// Upper bound on pooled database connections (default: 5)
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .context("No database URL provided")?;

        Ok(Self {
            database_url,
            host: parse_or(&lookup, HOST, IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, PORT, DEFAULT_PORT)?,
            max_connections: parse_or(&lookup, MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, value)),
        _ => Ok(default),
    }
}
