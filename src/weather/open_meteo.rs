//! Open-Meteo forecast client
//!
//! One blocking request per call and no retries. Failures are logged and
//! reported as an empty observation so a single city never stops the batch.

use crate::config::WeatherConfig;
use crate::models::{CURRENT_FIELDS, WeatherObservation};
use crate::{Result, WeatherEtlError};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument, warn};

use super::WeatherSource;

/// Blocking client for the Open-Meteo forecast endpoint
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| WeatherEtlError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forecast URL requesting the current fields for one coordinate pair
    pub fn forecast_url(&self, latitude: &str, longitude: &str) -> Result<Url> {
        let current = CURRENT_FIELDS.join(",");
        Url::parse_with_params(
            &format!("{}/forecast", self.base_url),
            [
                ("latitude", latitude),
                ("longitude", longitude),
                ("current", current.as_str()),
                ("timezone", "auto"),
            ],
        )
        .map_err(|e| WeatherEtlError::config(format!("Invalid weather API URL: {e}")))
    }

    /// Fetch current weather, propagating any failure
    #[instrument(skip(self))]
    pub fn try_fetch_current(&self, latitude: &str, longitude: &str) -> Result<WeatherObservation> {
        let url = self.forecast_url(latitude, longitude)?;
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WeatherEtlError::api(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(WeatherEtlError::api(format!(
                "Open-Meteo returned {status}: {body}"
            )));
        }

        let observation: WeatherObservation = response.json().map_err(|e| {
            WeatherEtlError::parse(format!("Failed to parse Open-Meteo response: {e}"))
        })?;

        let elapsed = start_time.elapsed();
        debug!("Received current weather in {:.3}s", elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(observation)
    }
}

impl WeatherSource for WeatherClient {
    fn fetch_current(&self, latitude: &str, longitude: &str) -> WeatherObservation {
        self.try_fetch_current(latitude, longitude)
            .unwrap_or_else(|e| {
                error!("Weather request for ({latitude}, {longitude}) failed: {e}");
                WeatherObservation::default()
            })
    }
}
