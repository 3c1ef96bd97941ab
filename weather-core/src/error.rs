//! Error types shared by the core crate.
//!
//! Every variant is terminal for the CLI: nothing here is retried or
//! recovered from, so the `Display` strings double as the user-facing
//! diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a [`crate::client::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while locating or reading the credential.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform config directory")]
    NoConfigDir,

    #[error("Config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read config file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only the position is kept: the TOML error text quotes the offending
    /// line, which may hold the key.
    #[error("Failed to parse config file {} at line {line}, column {column}", path.display())]
    Parse { path: PathBuf, line: usize, column: usize },

    #[error("Config file {} has no [openweather] section", path.display())]
    MissingSection { path: PathBuf },

    #[error("Config file {} has no api_key in its [openweather] section", path.display())]
    MissingKey { path: PathBuf },
}

/// Coarse classification of a [`NetworkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Transport,
    Unauthorized,
    NotFound,
    HttpOther,
    Decode,
}

/// Failures while fetching or decoding the current weather.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// DNS, connect, TLS or body-read failure below HTTP.
    #[error("Could not reach the weather service. Please check your internet connection.")]
    Transport {
        #[source]
        source: BoxError,
    },

    #[error("Access denied. Please check your API key.")]
    Unauthorized,

    /// The upstream answers 400 for unknown cities.
    #[error("Can not find weather data for this city.")]
    NotFound,

    #[error("Something went wrong... ({status})")]
    HttpOther { status: u16 },

    /// 2xx response whose body is not the expected JSON shape.
    #[error("Could not read the server response.")]
    Decode { detail: String },
}

impl NetworkError {
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport { source: source.into() }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode { detail: detail.into() }
    }

    pub fn kind(&self) -> NetworkErrorKind {
        match self {
            NetworkError::Transport { .. } => NetworkErrorKind::Transport,
            NetworkError::Unauthorized => NetworkErrorKind::Unauthorized,
            NetworkError::NotFound => NetworkErrorKind::NotFound,
            NetworkError::HttpOther { .. } => NetworkErrorKind::HttpOther,
            NetworkError::Decode { .. } => NetworkErrorKind::Decode,
        }
    }
}
