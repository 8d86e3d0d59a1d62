//! `today_weather` - current weather collection for a list of cities
//!
//! The library backs two batch binaries: `today_weather` reads city
//! coordinates, fetches current weather from Open-Meteo and writes an XML
//! document; `xml_to_json` turns that document into JSON Lines.

pub mod config;
pub mod converter;
pub mod coordinates;
pub mod document;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod weather;

// Re-export core types for public API
pub use config::EtlConfig;
pub use converter::{ConversionSummary, convert_xml_to_json};
pub use coordinates::{CityLoader, load_cities};
pub use document::{WeatherDocument, save_document};
pub use error::WeatherEtlError;
pub use models::{City, CityWeather, WeatherObservation, WeatherRecord};
pub use pipeline::{CollectionSummary, run_collection, run_conversion};
pub use weather::{WeatherClient, WeatherSource, weather_code_to_description};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherEtlError>;
