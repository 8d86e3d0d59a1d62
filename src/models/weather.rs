//! Open-Meteo current weather response model

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Current fields requested from the forecast endpoint, in request order
pub const CURRENT_FIELDS: [&str; 15] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "is_day",
    "precipitation",
    "rain",
    "showers",
    "snowfall",
    "weather_code",
    "cloud_cover",
    "pressure_msl",
    "surface_pressure",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

/// Parsed forecast response; `Default` stands for a failed fetch
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    pub current: Option<CurrentWeather>,
    pub current_units: Option<CurrentUnits>,
}

/// Instantaneous readings from the `current` block
///
/// Values keep the upstream JSON number so their textual form is preserved
/// (integral fields stay integral).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentWeather {
    pub time: Option<String>,
    pub interval: Option<Number>,
    pub temperature_2m: Option<Number>,
    pub relative_humidity_2m: Option<Number>,
    pub apparent_temperature: Option<Number>,
    pub is_day: Option<Number>,
    pub precipitation: Option<Number>,
    pub rain: Option<Number>,
    pub showers: Option<Number>,
    pub snowfall: Option<Number>,
    pub weather_code: Option<Number>,
    pub cloud_cover: Option<Number>,
    pub pressure_msl: Option<Number>,
    pub surface_pressure: Option<Number>,
    pub wind_speed_10m: Option<Number>,
    pub wind_direction_10m: Option<Number>,
    pub wind_gusts_10m: Option<Number>,
}

/// Unit labels from the `current_units` block
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentUnits {
    pub temperature_2m: Option<String>,
}

impl WeatherObservation {
    /// True when the fetch produced nothing usable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.current_units.is_none()
    }

    /// The `current` block, if it carries any value
    #[must_use]
    pub fn current_readings(&self) -> Option<&CurrentWeather> {
        self.current.as_ref().filter(|current| !current.is_empty())
    }

    /// Temperature unit label, if the API reported one
    #[must_use]
    pub fn temperature_unit(&self) -> Option<&str> {
        self.current_units.as_ref()?.temperature_2m.as_deref()
    }
}

impl CurrentWeather {
    /// True when no field was returned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Weather code as an integer, if it is one
    #[must_use]
    pub fn weather_code(&self) -> Option<i64> {
        let code = self.weather_code.as_ref()?;
        code.as_i64().or_else(|| {
            code.as_f64()
                .filter(|value| value.fract() == 0.0)
                .map(|value| value as i64)
        })
    }
}

/// A city's identity paired with its observation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityWeather {
    pub id: Option<String>,
    pub name: Option<String>,
    pub weather: WeatherObservation,
}
