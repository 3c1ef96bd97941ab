use std::fmt;

use crate::{config::ApiKey, model::WeatherRequest};

/// OpenWeather current-weather-by-city-name endpoint.
pub const BASE_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Fully assembled request URL. Carries the credential, so `Debug` and
/// [`QueryUrl::redacted`] mask `appid`.
#[derive(Clone, PartialEq, Eq)]
pub struct QueryUrl(String);

impl QueryUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL with the `appid` value replaced by `***`, safe for logs.
    pub fn redacted(&self) -> String {
        let Some((base, query)) = self.0.split_once('?') else {
            return self.0.clone();
        };

        let query = query
            .split('&')
            .map(|pair| if pair.starts_with("appid=") { "appid=***" } else { pair })
            .collect::<Vec<_>>()
            .join("&");

        format!("{base}?{query}")
    }
}

impl fmt::Debug for QueryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryUrl").field(&self.redacted()).finish()
    }
}

/// Builds `<base>?q=<city>&units=<metric|imperial>&appid=<key>`.
///
/// City and key are percent-encoded (space becomes `%20`). A base that
/// already carries a query string is extended with `&`.
pub fn build_query(request: &WeatherRequest, api_key: &ApiKey, base: &str) -> QueryUrl {
    let separator = if base.contains('?') { '&' } else { '?' };

    QueryUrl(format!(
        "{base}{separator}q={}&units={}&appid={}",
        urlencoding::encode(&request.city),
        request.units.as_str(),
        urlencoding::encode(api_key.expose()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Units;
    use reqwest::Url;
    use std::collections::HashMap;

    fn query_map(url: &QueryUrl) -> HashMap<String, String> {
        Url::parse(url.as_str())
            .expect("built query must be a valid URL")
            .query_pairs()
            .into_owned()
            .collect()
    }

    #[test]
    fn new_york_metric_query() {
        let req = WeatherRequest::new(&["New", "York"], Units::Metric);
        let url = build_query(&req, &ApiKey::new("KEY123"), BASE_WEATHER_API_URL);

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?q=New%20York&units=metric&appid=KEY123"
        );
    }

    #[test]
    fn query_parameters_decode_back_to_inputs() {
        let cases = [
            ("São Paulo", Units::Imperial, "k&y=1"),
            ("Saint-Denis, RE", Units::Metric, "abc/def+ghi"),
            ("a%b?c#d", Units::Metric, "plain"),
            ("Zürich", Units::Imperial, "KEY123"),
        ];

        for (city, units, key) in cases {
            let req = WeatherRequest { city: city.to_string(), units };
            let url = build_query(&req, &ApiKey::new(key), BASE_WEATHER_API_URL);
            let params = query_map(&url);

            assert_eq!(params["q"], city);
            assert_eq!(params["units"], units.as_str());
            assert_eq!(params["appid"], key);
            assert_eq!(params.len(), 3);
        }
    }

    #[test]
    fn base_with_existing_query_is_extended() {
        let req = WeatherRequest::new(&["Oslo"], Units::Metric);
        let url = build_query(&req, &ApiKey::new("K"), "http://localhost:8080/weather?lang=en");

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/weather?lang=en&q=Oslo&units=metric&appid=K"
        );
    }

    #[test]
    fn redacted_form_hides_the_key() {
        let req = WeatherRequest::new(&["London"], Units::Metric);
        let url = build_query(&req, &ApiKey::new("TOPSECRET"), BASE_WEATHER_API_URL);

        assert!(!url.redacted().contains("TOPSECRET"));
        assert!(!format!("{url:?}").contains("TOPSECRET"));
        assert!(url.redacted().ends_with("q=London&units=metric&appid=***"));
    }
}
