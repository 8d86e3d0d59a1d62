//! Weather document construction and XML serialization
//!
//! Layout:
//!
//! ```xml
//! <weather_data generated_at="2024-05-01T12:00:00.000000">
//!   <city id="34" name="İstanbul">
//!     <current_weather>
//!       <temperature>21.5</temperature>
//!       ...
//!     </current_weather>
//!   </city>
//! </weather_data>
//! ```
//!
//! A reading the API did not return is left out instead of being written as
//! a placeholder, so the converter sees it as a missing element.

use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Number;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::models::{CityWeather, CurrentWeather};
use crate::weather::{UNKNOWN_DESCRIPTION, weather_code_to_description};
use crate::{Result, WeatherEtlError};

/// Unit written when the API reports none
pub const DEFAULT_TEMPERATURE_UNIT: &str = "°C";

/// The in-memory weather document
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDocument {
    /// Local ISO-8601 creation time
    pub generated_at: String,
    pub cities: Vec<CityEntry>,
}

/// One `<city>` element
#[derive(Debug, Clone, PartialEq)]
pub struct CityEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    /// `<current_weather>` children in output order
    pub fields: Vec<(&'static str, String)>,
}

impl CityEntry {
    /// Value of a `<current_weather>` child, if written
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Current local time in the document's timestamp format
#[must_use]
pub fn generated_at_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

impl WeatherDocument {
    /// Build the document, skipping cities without current readings
    #[must_use]
    pub fn build(cities_weather: &[CityWeather], generated_at: String) -> Self {
        let cities = cities_weather
            .iter()
            .filter_map(|city_weather| {
                let current = city_weather.weather.current_readings();
                if current.is_none() {
                    debug!(
                        "Skipping city {:?}: no current weather",
                        city_weather.name.as_deref().or(city_weather.id.as_deref())
                    );
                }
                current.map(|current| CityEntry {
                    id: city_weather.id.clone(),
                    name: city_weather.name.clone(),
                    fields: current_weather_fields(
                        current,
                        city_weather.weather.temperature_unit(),
                    ),
                })
            })
            .collect();

        Self {
            generated_at,
            cities,
        }
    }

    /// Serialize with a UTF-8 declaration and two-space indentation
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let root = BytesStart::new("weather_data")
            .with_attributes([("generated_at", self.generated_at.as_str())]);

        if self.cities.is_empty() {
            write_event(&mut writer, Event::Empty(root))?;
        } else {
            write_event(&mut writer, Event::Start(root))?;
            for city in &self.cities {
                write_city(&mut writer, city)?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("weather_data")))?;
        }

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| WeatherEtlError::xml(format!("Serialized document is not UTF-8: {e}")))?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write the document to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(path.as_ref(), xml)?;
        Ok(())
    }
}

/// Save the document, logging instead of propagating failures
///
/// Returns whether the file was written.
pub fn save_document<P: AsRef<Path>>(document: &WeatherDocument, path: P) -> bool {
    let path = path.as_ref();
    match document.save(path) {
        Ok(()) => {
            info!(
                "Saved weather for {} cities to {:?}",
                document.cities.len(),
                path
            );
            true
        }
        Err(e) => {
            error!("Failed to save weather document to {:?}: {}", path, e);
            false
        }
    }
}

fn current_weather_fields(
    current: &CurrentWeather,
    temperature_unit: Option<&str>,
) -> Vec<(&'static str, String)> {
    let description = current
        .weather_code()
        .map_or(UNKNOWN_DESCRIPTION, weather_code_to_description);

    let readings: [(&'static str, Option<&Number>); 15] = [
        ("temperature", current.temperature_2m.as_ref()),
        ("temperature_unit", None),
        ("humidity", current.relative_humidity_2m.as_ref()),
        ("apparent_temperature", current.apparent_temperature.as_ref()),
        ("weather_code", current.weather_code.as_ref()),
        ("weather_description", None),
        ("is_day", current.is_day.as_ref()),
        ("precipitation", current.precipitation.as_ref()),
        ("rain", current.rain.as_ref()),
        ("snowfall", current.snowfall.as_ref()),
        ("cloud_cover", current.cloud_cover.as_ref()),
        ("pressure", current.pressure_msl.as_ref()),
        ("wind_speed", current.wind_speed_10m.as_ref()),
        ("wind_direction", current.wind_direction_10m.as_ref()),
        ("wind_gusts", current.wind_gusts_10m.as_ref()),
    ];

    readings
        .into_iter()
        .filter_map(|(field, value)| match field {
            "temperature_unit" => Some((
                field,
                temperature_unit
                    .unwrap_or(DEFAULT_TEMPERATURE_UNIT)
                    .to_string(),
            )),
            "weather_description" => Some((field, description.to_string())),
            _ => value.map(|number| (field, number.to_string())),
        })
        .collect()
}

fn write_city(writer: &mut Writer<Vec<u8>>, city: &CityEntry) -> Result<()> {
    let mut attributes = Vec::new();
    if let Some(id) = &city.id {
        attributes.push(("id", id.as_str()));
    }
    if let Some(name) = &city.name {
        attributes.push(("name", name.as_str()));
    }

    write_event(writer, Event::Start(BytesStart::new("city").with_attributes(attributes)))?;
    write_event(writer, Event::Start(BytesStart::new("current_weather")))?;
    for (field, value) in &city.fields {
        write_event(writer, Event::Start(BytesStart::new(*field)))?;
        write_event(writer, Event::Text(BytesText::new(value)))?;
        write_event(writer, Event::End(BytesEnd::new(*field)))?;
    }
    write_event(writer, Event::End(BytesEnd::new("current_weather")))?;
    write_event(writer, Event::End(BytesEnd::new("city")))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| WeatherEtlError::xml(format!("Failed to write weather XML: {e}")))
}
