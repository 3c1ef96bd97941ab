use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{error::ConfigError, query::BASE_WEATHER_API_URL};

/// File looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "secrets.toml";

/// Default column width used when centering output fields.
pub const DEFAULT_PADDING: usize = 20;

/// OpenWeather API key. `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// The `[openweather]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherConfig {
    pub api_key: Option<ApiKey>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_padding")]
    pub padding: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { padding: DEFAULT_PADDING }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [openweather]
/// api_key = "..."
///
/// [display]
/// padding = 20
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub openweather: Option<OpenWeatherConfig>,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(skip)]
    source: PathBuf,
}

fn default_base_url() -> String {
    BASE_WEATHER_API_URL.to_string()
}

fn default_padding() -> usize {
    DEFAULT_PADDING
}

impl Config {
    /// Load config from `explicit` if given, otherwise from the
    /// discovered location.
    ///
    /// A missing file is an error: the tool cannot run without a key.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::discover()?,
        };

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");

        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::Missing { path: path.to_path_buf() }
            } else {
                ConfigError::Read { path: path.to_path_buf(), source }
            }
        })?;

        Self::parse(&contents, path)
    }

    /// Parse TOML contents; `path` is only used for diagnostics.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut cfg: Config = toml::from_str(contents).map_err(|err: toml::de::Error| {
            let offset = err.span().map_or(0, |span| span.start);
            let (line, column) = line_column(contents, offset);
            ConfigError::Parse { path: path.to_path_buf(), line, column }
        })?;
        cfg.source = path.to_path_buf();

        Ok(cfg)
    }

    /// `./secrets.toml` if it exists, else the per-user config file
    /// (returned even when absent so the error names it).
    fn discover() -> Result<PathBuf, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok(local);
        }

        Self::config_file_path()
    }

    /// Path to the per-user config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn openweather_section(&self) -> Result<&OpenWeatherConfig, ConfigError> {
        self.openweather
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSection { path: self.source.clone() })
    }

    /// The stored API key. Empty keys count as missing.
    pub fn credential(&self) -> Result<&ApiKey, ConfigError> {
        self.openweather_section()?
            .api_key
            .as_ref()
            .filter(|key| !key.expose().trim().is_empty())
            .ok_or_else(|| ConfigError::MissingKey { path: self.source.clone() })
    }

    /// Endpoint to query; the public OpenWeather endpoint unless overridden.
    pub fn base_url(&self) -> &str {
        self.openweather
            .as_ref()
            .map_or(BASE_WEATHER_API_URL, |ow| ow.base_url.as_str())
    }

    pub fn padding(&self) -> usize {
        self.display.padding
    }
}

/// 1-based line and column of a byte offset.
fn line_column(contents: &str, offset: usize) -> (usize, usize) {
    let before = contents.get(..offset).unwrap_or(contents);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;

    (line, column)
}

/// Load the config and pull the credential out of it in one step.
pub fn load_credential(explicit: Option<&Path>) -> Result<ApiKey, ConfigError> {
    Config::load(explicit)?.credential().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(contents: &str) -> Result<Config, ConfigError> {
        Config::parse(contents, Path::new("secrets.toml"))
    }

    #[test]
    fn credential_is_read_from_openweather_section() {
        let cfg = parse("[openweather]\napi_key = \"KEY123\"\n").expect("valid config");

        assert_eq!(cfg.credential().expect("key present").expose(), "KEY123");
        assert_eq!(cfg.base_url(), BASE_WEATHER_API_URL);
        assert_eq!(cfg.padding(), DEFAULT_PADDING);
    }

    #[test]
    fn optional_settings_override_defaults() {
        let cfg = parse(
            "[openweather]\napi_key = \"K\"\nbase_url = \"http://127.0.0.1:9/weather\"\n\n[display]\npadding = 12\n",
        )
        .expect("valid config");

        assert_eq!(cfg.base_url(), "http://127.0.0.1:9/weather");
        assert_eq!(cfg.padding(), 12);
    }

    #[test]
    fn missing_section_is_reported() {
        let cfg = parse("[display]\npadding = 10\n").expect("valid toml");
        let err = cfg.credential().unwrap_err();

        assert!(matches!(err, ConfigError::MissingSection { .. }));
        assert!(err.to_string().contains("[openweather]"));
    }

    #[test]
    fn missing_or_blank_key_is_reported() {
        let cfg = parse("[openweather]\n").expect("valid toml");
        assert!(matches!(cfg.credential(), Err(ConfigError::MissingKey { .. })));

        let cfg = parse("[openweather]\napi_key = \"  \"\n").expect("valid toml");
        assert!(matches!(cfg.credential(), Err(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[openweather\napi_key = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn parse_error_points_at_the_line_without_quoting_it() {
        let err = parse("[openweather]\napi_key = \"SECRETKEY123\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(!msg.contains("SECRETKEY123"), "{msg}");
        assert!(!format!("{err:?}").contains("SECRETKEY123"));
    }

    #[test]
    fn line_column_counts_from_one() {
        assert_eq!(line_column("abc", 0), (1, 1));
        assert_eq!(line_column("ab\ncd", 4), (2, 2));
        assert_eq!(line_column("é\nx", 99), (2, 2));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Missing { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn load_credential_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[openweather]\napi_key = \"FROM_DISK\"").expect("write");

        let key = load_credential(Some(file.path())).expect("credential");

        assert_eq!(key.expose(), "FROM_DISK");
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("SECRET");
        assert!(!format!("{key:?}").contains("SECRET"));
    }
}
