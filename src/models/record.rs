//! Flattened JSON Lines record

use serde::{Deserialize, Serialize};

/// One city's current weather as written to the JSON Lines file
///
/// Field order is the key order of every output line.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Air temperature at 2 m
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    /// Relative humidity in percent
    pub humidity: Option<i64>,
    pub apparent_temperature: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<i64>,
    pub weather_description: Option<String>,
    /// 1 during daylight, 0 at night
    pub is_day: Option<i64>,
    pub precipitation: Option<f64>,
    pub rain: Option<f64>,
    pub snowfall: Option<f64>,
    /// Cloud cover in percent
    pub cloud_cover: Option<i64>,
    /// Mean sea level pressure in hPa
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction: Option<i64>,
    pub wind_gusts: Option<f64>,
    pub generated_at: Option<String>,
}
