use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;
use weather_core::{Config, Units, WeatherClient, WeatherRequest, build_query, classify};

use crate::display::Presenter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Getting weather and temperature information of a city"
)]
pub struct Cli {
    /// City name; several words are joined with spaces, e.g. `New York`.
    #[arg(required = true, num_args = 1.., value_name = "CITY")]
    pub city: Vec<String>,

    /// Display the temperature in imperial units.
    #[arg(short, long)]
    pub imperial: bool,

    /// Config file holding the `[openweather]` API key.
    #[arg(long, env = "WEATHER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn request(&self) -> WeatherRequest {
        WeatherRequest::new(&self.city, Units::from_imperial_flag(self.imperial))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let request = self.request();

        let config = Config::load(self.config.as_deref())?;
        let url = build_query(&request, config.credential()?, config.base_url());

        info!(city = %request.city, units = %request.units, "fetching current weather");
        let record = WeatherClient::http().fetch_weather(&url).await?;

        let display = classify(record.condition_code);
        let presenter = Presenter::new(config.padding());
        presenter
            .present(&mut std::io::stdout().lock(), &record, request.units, display)
            .context("Failed to write the weather report to stdout")?;

        Ok(())
    }
}
