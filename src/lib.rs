//! # Fyyur
//!
//! A booking directory for venues, artists and the shows that pair them.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod forms;
pub mod graphql;
pub mod models;
pub mod routes;
pub mod templates;
pub mod util;
pub mod validation;


use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_FILTER: &str = "fyyur=info,tower_http=info";

/// Install the global `tracing` subscriber, honoring `RUST_LOG` when set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
