use std::fmt;

/// Temperature convention requested from the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial { Units::Imperial } else { Units::Metric }
    }

    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature suffix letter, `C` or `F`.
    pub fn temperature_symbol(&self) -> char {
        match self {
            Units::Metric => 'C',
            Units::Imperial => 'F',
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
    pub units: Units,
}

impl WeatherRequest {
    /// Joins city word tokens with single spaces.
    pub fn new<S: AsRef<str>>(city_words: &[S], units: Units) -> Self {
        let city = city_words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        Self { city, units }
    }
}

/// Current conditions for one city, as decoded from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city_name: String,
    pub condition_code: i64,
    pub condition_description: String,
    pub temperature: f64,
}
