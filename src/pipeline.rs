//! Batch orchestration for both pipelines
//!
//! Collection: coordinate list, one sequential fetch per city, weather XML.
//! Conversion: weather XML to JSON Lines. Neither run aborts on a failure;
//! problems are logged and reflected in the returned summary.

use tracing::{info, warn};

use crate::config::FilesConfig;
use crate::converter::{ConversionSummary, convert_xml_to_json};
use crate::coordinates::load_cities;
use crate::document::{WeatherDocument, generated_at_now, save_document};
use crate::models::{City, CityWeather, WeatherObservation};
use crate::weather::WeatherSource;
use crate::Result;

/// Counts reported after a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    /// Cities read from the coordinate list
    pub cities_loaded: usize,
    /// Cities with current readings; equals `written`
    pub fetched: usize,
    /// Cities without current readings, including failed requests
    pub failed: usize,
    /// `<city>` elements in the written document
    pub written: usize,
    /// Whether the document reached disk
    pub saved: bool,
}

/// Fetch weather for each city in order, one request at a time
pub fn collect_weather<S: WeatherSource + ?Sized>(source: &S, cities: &[City]) -> Vec<CityWeather> {
    cities
        .iter()
        .map(|city| {
            info!("Fetching weather for {}", city.display_name());
            let weather = match city.coordinates() {
                Some((latitude, longitude)) => source.fetch_current(latitude, longitude),
                None => {
                    warn!("City {} has no coordinates, skipping request", city.display_name());
                    WeatherObservation::default()
                }
            };

            CityWeather {
                id: city.id.clone(),
                name: city.name.clone(),
                weather,
            }
        })
        .collect()
}

/// Run the collection pipeline against `source`
pub fn run_collection<S: WeatherSource + ?Sized>(source: &S, files: &FilesConfig) -> CollectionSummary {
    let cities = load_cities(&files.coordinates);
    info!("Loaded coordinates for {} cities", cities.len());

    let cities_weather = collect_weather(source, &cities);
    let fetched = cities_weather
        .iter()
        .filter(|city_weather| city_weather.weather.current_readings().is_some())
        .count();

    let document = WeatherDocument::build(&cities_weather, generated_at_now());
    let saved = save_document(&document, &files.weather_xml);

    let summary = CollectionSummary {
        cities_loaded: cities.len(),
        fetched,
        failed: cities.len() - fetched,
        written: document.cities.len(),
        saved,
    };

    if summary.failed > 0 {
        warn!(
            "Weather unavailable for {} of {} cities",
            summary.failed, summary.cities_loaded
        );
    }
    summary
}

/// Run the conversion pipeline
pub fn run_conversion(files: &FilesConfig) -> Result<ConversionSummary> {
    let summary = convert_xml_to_json(&files.weather_xml, &files.weather_json)?;

    if summary.coercion_failures > 0 {
        warn!(
            "{} readings could not be converted and were written as null",
            summary.coercion_failures
        );
    }
    Ok(summary)
}
