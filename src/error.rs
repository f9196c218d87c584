//! Error type shared by the builder and the configuration layer.
//!
//! Queries never fail: an input with no qualifying neighbours yields an empty
//! result, and over-long inputs degrade to a zero or unbounded score.

use thiserror::Error;

/// Errors raised while configuring or building an [`Index`](crate::Index).
#[derive(Debug, Error)]
pub enum Error {
    /// The vocabulary already holds as many terms as its identity space allows.
    #[error("vocabulary capacity exhausted: cannot add more than {capacity} terms")]
    CapacityExhausted { capacity: u32 },

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A TOML configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
