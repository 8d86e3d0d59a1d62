//! Data models for the weather ETL pipelines
//!
//! - City: an entry of the coordinate list
//! - Weather: the Open-Meteo current weather response
//! - Record: the typed JSON Lines row

pub mod city;
pub mod record;
pub mod weather;

// Re-export all public types for convenient access
pub use city::City;
pub use record::WeatherRecord;
pub use weather::{CURRENT_FIELDS, CityWeather, CurrentUnits, CurrentWeather, WeatherObservation};
