//! Error types for lobbyquery-core

use thiserror::Error;

/// Core error type for query operations
#[derive(Debug, Error)]
pub enum Error {
    /// Remote directory API failures (non-2xx, transport, malformed body)
    #[error("Directory API error: {0}")]
    Api(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured command pattern is not a valid regex
    #[error("Invalid command pattern '{name}': {source}")]
    Pattern {
        /// Which configured pattern was rejected
        name: &'static str,
        source: regex::Error,
    },

    /// Config file could not be read
    #[error("Config read error: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for lobbyquery-core operations
pub type Result<T> = std::result::Result<T, Error>;
