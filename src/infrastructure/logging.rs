//! Tracing subscriber setup, selected by the configured environment.
//!
//! | env   | format | default level |
//! |-------|--------|---------------|
//! | local | text   | debug         |
//! | dev   | json   | debug         |
//! | prod  | json   | info          |
//!
//! `RUST_LOG` replaces the default level when set.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::Environment;

pub fn default_level(env: Environment) -> Level {
    match env {
        Environment::Local | Environment::Dev => Level::DEBUG,
        Environment::Prod => Level::INFO,
    }
}

fn env_filter(env: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(env).as_str().to_lowercase()))
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(env: Environment) {
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter(env));

    match env {
        Environment::Local => builder.init(),
        Environment::Dev | Environment::Prod => builder.json().init(),
    }
}
