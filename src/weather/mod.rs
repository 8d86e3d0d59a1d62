//! Current weather retrieval and code translation

pub mod codes;
pub mod open_meteo;

use crate::models::WeatherObservation;

pub use codes::{UNKNOWN_DESCRIPTION, weather_code_to_description};
pub use open_meteo::WeatherClient;

/// Source of current weather for one coordinate pair
///
/// Implementations never fail: an unavailable observation is returned as
/// `WeatherObservation::default()`.
pub trait WeatherSource {
    fn fetch_current(&self, latitude: &str, longitude: &str) -> WeatherObservation;
}
