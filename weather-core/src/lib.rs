//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Query construction for the OpenWeather current-weather endpoint
//! - The HTTP client and its error classification
//! - Condition-code classification for display
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod query;

pub use client::{HttpTransport, RawResponse, Transport, WeatherClient};
pub use condition::{ColorToken, Condition, DisplayParams, classify};
pub use config::{ApiKey, Config, load_credential};
pub use error::{ConfigError, NetworkError, NetworkErrorKind};
pub use model::{Units, WeatherRecord, WeatherRequest};
pub use query::{BASE_WEATHER_API_URL, QueryUrl, build_query};
