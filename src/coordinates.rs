//! City coordinate loading
//!
//! Reads every `city` element, at any depth, from the coordinate list and
//! keeps its five attributes.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::models::City;
use crate::{Result, WeatherEtlError};

/// Parser for `city_coordinates.xml`
pub struct CityLoader;

impl CityLoader {
    /// Read and parse the coordinate file
    pub fn try_load<P: AsRef<Path>>(xml_path: P) -> Result<Vec<City>> {
        let xml_path = xml_path.as_ref();
        info!("Loading city coordinates from: {:?}", xml_path);

        let xml_content = fs::read_to_string(xml_path)?;
        Self::parse_xml(&xml_content)
    }

    /// Parse coordinate XML content, keeping document order
    pub fn parse_xml(xml_content: &str) -> Result<Vec<City>> {
        let mut reader = Reader::from_str(xml_content);
        let mut cities = Vec::new();
        let mut depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                WeatherEtlError::xml(format!(
                    "Malformed coordinate XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(element) => {
                    depth += 1;
                    if element.name().as_ref() == b"city" {
                        cities.push(Self::parse_city(&element)?);
                    }
                }
                Event::Empty(element) => {
                    if element.name().as_ref() == b"city" {
                        cities.push(Self::parse_city(&element)?);
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(WeatherEtlError::xml("Unexpected end of coordinate XML"));
        }

        Ok(cities)
    }

    fn parse_city(element: &BytesStart<'_>) -> Result<City> {
        let mut city = City::default();

        for attribute in element.attributes() {
            let attribute = attribute
                .map_err(|e| WeatherEtlError::xml(format!("Invalid city attribute: {e}")))?;

            let raw = std::str::from_utf8(&attribute.value)
                .map_err(|e| WeatherEtlError::parse(format!("City attribute is not UTF-8: {e}")))?;
            let value = unescape(raw)
                .map_err(|e| WeatherEtlError::xml(format!("Invalid escape in '{raw}': {e}")))?
                .into_owned();

            match attribute.key.as_ref() {
                b"id" => city.id = Some(value),
                b"country" => city.country = Some(value),
                b"name" => city.name = Some(value),
                b"latitude" => city.latitude = Some(value),
                b"longitude" => city.longitude = Some(value),
                _ => {}
            }
        }

        Ok(city)
    }
}

/// Load cities, logging any failure and returning an empty list instead
pub fn load_cities<P: AsRef<Path>>(xml_path: P) -> Vec<City> {
    let xml_path = xml_path.as_ref();
    match CityLoader::try_load(xml_path) {
        Ok(cities) => cities,
        Err(e) => {
            error!("Failed to read city coordinates from {:?}: {}", xml_path, e);
            Vec::new()
        }
    }
}
