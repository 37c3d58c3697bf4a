//! Error types for the gesture engine.
//!
//! Gesture handling itself never fails: absent targets and invalid moves are
//! no-ops. Errors only arise while loading an [`EngineConfig`](crate::EngineConfig).

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: `{field}` must be at least {min}, got {value}")]
    Config {
        field: &'static str,
        min: i32,
        value: i32,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
