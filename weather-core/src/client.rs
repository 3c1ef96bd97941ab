use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    error::{BoxError, NetworkError},
    model::WeatherRecord,
    query::QueryUrl,
};

/// Status and fully read body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Performs a single GET. Implementations must have released the
/// connection by the time they return.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &QueryUrl) -> Result<RawResponse, BoxError>;
}

/// `reqwest`-backed transport with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &QueryUrl) -> Result<RawResponse, BoxError> {
        // reqwest errors embed the URL, which carries the key.
        let res = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;

        Ok(RawResponse { status, body })
    }
}

#[derive(Debug)]
pub struct WeatherClient {
    transport: Box<dyn Transport>,
}

impl WeatherClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self { transport: Box::new(transport) }
    }

    pub fn http() -> Self {
        Self::new(HttpTransport::new())
    }

    /// One GET, no retry. Transport failures win over status handling,
    /// status handling wins over body decoding.
    pub async fn fetch_weather(&self, url: &QueryUrl) -> Result<WeatherRecord, NetworkError> {
        debug!(url = %url.redacted(), "requesting current weather");

        let res = self.transport.get(url).await.map_err(NetworkError::transport)?;

        debug!(status = res.status, "weather service responded");
        check_status(res.status)?;

        decode_record(&res.body)
    }
}

fn check_status(status: u16) -> Result<(), NetworkError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(NetworkError::Unauthorized),
        400 => Err(NetworkError::NotFound),
        other => {
            warn!(status = other, "unexpected status from weather service");
            Err(NetworkError::HttpOther { status: other })
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Decodes an OpenWeather current-weather body. Only the first entry of
/// `weather` is used; an empty list is a decode failure.
pub fn decode_record(body: &str) -> Result<WeatherRecord, NetworkError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| NetworkError::decode(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| NetworkError::decode("response contained no weather conditions"))?;

    Ok(WeatherRecord {
        city_name: parsed.name,
        condition_code: condition.id,
        condition_description: condition.description,
        temperature: parsed.main.temp,
    })
}
