//! Configuration management for the weather ETL pipelines
//!
//! Every setting has a built-in default, so both binaries run without any
//! configuration file. An optional `today_weather.toml` and `TODAY_WEATHER_*`
//! environment variables can override the defaults.

use crate::WeatherEtlError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "today_weather.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Input and output file locations
    pub files: FilesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

/// File locations used by both pipelines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// City coordinate list read by the collector
    pub coordinates: PathBuf,
    /// Weather document written by the collector and read by the converter
    pub weather_xml: PathBuf,
    /// JSON Lines file written by the converter
    pub weather_json: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("today-weather/{}", env!("CARGO_PKG_VERSION"))
}

fn default_coordinates_file() -> PathBuf {
    PathBuf::from("city_coordinates.xml")
}

fn default_weather_xml_file() -> PathBuf {
    PathBuf::from("tr_today_weather.xml")
}

fn default_weather_json_file() -> PathBuf {
    PathBuf::from("tr_today_weather.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            coordinates: default_coordinates_file(),
            weather_xml: default_weather_xml_file(),
            weather_json: default_weather_json_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl EtlConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. TODAY_WEATHER_FILES__WEATHER_XML=out.xml
        builder = builder.add_source(
            Environment::with_prefix("TODAY_WEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: EtlConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.user_agent.is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.files.coordinates.as_os_str().is_empty() {
            self.files.coordinates = default_coordinates_file();
        }
        if self.files.weather_xml.as_os_str().is_empty() {
            self.files.weather_xml = default_weather_xml_file();
        }
        if self.files.weather_json.as_os_str().is_empty() {
            self.files.weather_json = default_weather_json_file();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherEtlError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherEtlError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherEtlError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherEtlError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = EtlConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.files.coordinates, PathBuf::from("city_coordinates.xml"));
        assert_eq!(config.files.weather_xml, PathBuf::from("tr_today_weather.xml"));
        assert_eq!(config.files.weather_json, PathBuf::from("tr_today_weather.json"));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = EtlConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout() {
        let mut config = EtlConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = EtlConfig::default();
        config.weather.base_url = "ftp://api.open-meteo.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = EtlConfig::default();
        config.weather.base_url.clear();
        config.files.weather_json = PathBuf::new();
        config.logging.format.clear();

        config.apply_defaults();

        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.files.weather_json, PathBuf::from("tr_today_weather.json"));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[files]\nweather_xml = \"out/weather.xml\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = EtlConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.files.weather_xml, PathBuf::from("out/weather.xml"));
        assert_eq!(config.files.coordinates, PathBuf::from("city_coordinates.xml"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config =
            EtlConfig::load_from_path(Some(PathBuf::from("does/not/exist.toml"))).unwrap();
        assert_eq!(config.weather.timeout_seconds, 30);
    }
}
