//! Error types and handling for the weather ETL pipelines

use thiserror::Error;

/// Main error type for the `today_weather` pipelines
#[derive(Error, Debug)]
pub enum WeatherEtlError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Malformed input or response data
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// XML reading or writing errors
    #[error("XML error: {message}")]
    Xml { message: String },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherEtlError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new XML error
    pub fn xml<S: Into<String>>(message: S) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherEtlError::Config { .. } => {
                "Configuration error. Please check today_weather.toml and TODAY_WEATHER_* variables."
                    .to_string()
            }
            WeatherEtlError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            WeatherEtlError::Parse { message } => format!("Invalid data: {message}"),
            WeatherEtlError::Xml { message } => format!("Invalid XML document: {message}"),
            WeatherEtlError::Json { .. } => "Failed to encode weather records as JSON.".to_string(),
            WeatherEtlError::Io { .. } => {
                "File operation failed. Please check file paths and permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherEtlError::config("timeout too large");
        assert!(matches!(config_err, WeatherEtlError::Config { .. }));

        let api_err = WeatherEtlError::api("connection refused");
        assert!(matches!(api_err, WeatherEtlError::Api { .. }));

        let xml_err = WeatherEtlError::xml("unexpected end of file");
        assert!(matches!(xml_err, WeatherEtlError::Xml { .. }));
    }

    #[test]
    fn test_user_messages() {
        let api_err = WeatherEtlError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let parse_err = WeatherEtlError::parse("bad latitude");
        assert!(parse_err.user_message().contains("bad latitude"));

        let xml_err = WeatherEtlError::xml("mismatched tag");
        assert_eq!(xml_err.to_string(), "XML error: mismatched tag");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let etl_err: WeatherEtlError = io_err.into();
        assert!(matches!(etl_err, WeatherEtlError::Io { .. }));
    }
}
