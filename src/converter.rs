//! Weather document to JSON Lines conversion
//!
//! Each `<city>` with a `<current_weather>` child becomes one JSON object per
//! line. Numeric readings are coerced to `f64`/`i64`; a missing element, an
//! empty element or the legacy `N/A` placeholder becomes `null`. String
//! readings are copied as written and are `null` only when missing.
//!
//! `<city>` is read only as a direct child of `<weather_data>`, and
//! `<current_weather>` only as a direct child of `<city>`. Nested elements
//! are ignored.

use quick_xml::de::from_str;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::WeatherRecord;
use crate::{Result, WeatherEtlError};

/// Placeholder older documents used for missing readings
const LEGACY_PLACEHOLDER: &str = "N/A";

/// Counts reported after a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Lines written
    pub cities_converted: usize,
    /// `<city>` elements without `<current_weather>`
    pub cities_skipped: usize,
    /// Field values that were not numbers and were written as null
    pub coercion_failures: usize,
}

#[derive(Debug, Deserialize)]
struct WeatherDataXml {
    #[serde(rename = "@generated_at")]
    generated_at: Option<String>,
    #[serde(rename = "city", default)]
    cities: Vec<CityXml>,
}

#[derive(Debug, Deserialize)]
struct CityXml {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
    current_weather: Option<CurrentWeatherXml>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherXml {
    temperature: Option<String>,
    temperature_unit: Option<String>,
    humidity: Option<String>,
    apparent_temperature: Option<String>,
    weather_code: Option<String>,
    weather_description: Option<String>,
    is_day: Option<String>,
    precipitation: Option<String>,
    rain: Option<String>,
    snowfall: Option<String>,
    cloud_cover: Option<String>,
    pressure: Option<String>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    wind_gusts: Option<String>,
}

/// Per-city numeric coercion that counts unparseable values
struct FieldCoercer<'a> {
    city: &'a str,
    failures: usize,
}

impl FieldCoercer<'_> {
    fn float(&mut self, field: &str, text: &Option<String>) -> Option<f64> {
        let text = reading_text(text)?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => self.reject(field, text),
        }
    }

    fn integer(&mut self, field: &str, text: &Option<String>) -> Option<i64> {
        let text = reading_text(text)?;
        if let Ok(value) = text.parse::<i64>() {
            return Some(value);
        }
        // Upstream occasionally reports integral readings as floats ("220.0").
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i64),
            _ => self.reject(field, text),
        }
    }

    fn reject<T>(&mut self, field: &str, text: &str) -> Option<T> {
        warn!(
            "City {}: '{}' is not a valid {} value, writing null",
            self.city, text, field
        );
        self.failures += 1;
        None
    }
}

/// Trimmed element text, `None` for empty text and the legacy placeholder
fn reading_text(text: &Option<String>) -> Option<&str> {
    let text = text.as_deref()?.trim();
    (!text.is_empty() && text != LEGACY_PLACEHOLDER).then_some(text)
}

/// Parse a weather document into JSON records
///
/// Returns the records together with the summary counts.
pub fn parse_weather_document(xml_content: &str) -> Result<(Vec<WeatherRecord>, ConversionSummary)> {
    let document: WeatherDataXml = from_str(xml_content)
        .map_err(|e| WeatherEtlError::xml(format!("Failed to parse weather document: {e}")))?;

    let mut summary = ConversionSummary::default();
    let mut records = Vec::with_capacity(document.cities.len());

    for city in document.cities {
        let Some(weather) = city.current_weather else {
            debug!("Skipping city {:?}: no current_weather element", city.id);
            summary.cities_skipped += 1;
            continue;
        };

        let label = city.name.as_deref().or(city.id.as_deref()).unwrap_or("<unnamed>");
        let mut coercer = FieldCoercer {
            city: label,
            failures: 0,
        };

        let record = WeatherRecord {
            id: city.id.clone(),
            name: city.name.clone(),
            temperature: coercer.float("temperature", &weather.temperature),
            temperature_unit: weather.temperature_unit,
            humidity: coercer.integer("humidity", &weather.humidity),
            apparent_temperature: coercer.float("apparent_temperature", &weather.apparent_temperature),
            weather_code: coercer.integer("weather_code", &weather.weather_code),
            weather_description: weather.weather_description,
            is_day: coercer.integer("is_day", &weather.is_day),
            precipitation: coercer.float("precipitation", &weather.precipitation),
            rain: coercer.float("rain", &weather.rain),
            snowfall: coercer.float("snowfall", &weather.snowfall),
            cloud_cover: coercer.integer("cloud_cover", &weather.cloud_cover),
            pressure: coercer.float("pressure", &weather.pressure),
            wind_speed: coercer.float("wind_speed", &weather.wind_speed),
            wind_direction: coercer.integer("wind_direction", &weather.wind_direction),
            wind_gusts: coercer.float("wind_gusts", &weather.wind_gusts),
            generated_at: document.generated_at.clone(),
        };
        summary.coercion_failures += coercer.failures;
        records.push(record);
    }

    summary.cities_converted = records.len();
    Ok((records, summary))
}

/// Write records as JSON Lines, non-ASCII characters left as-is
pub fn write_json_lines<W: Write>(records: &[WeatherRecord], mut out: W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Convert the weather document at `xml_path` into JSON Lines at `json_path`
pub fn convert_xml_to_json<P: AsRef<Path>, Q: AsRef<Path>>(
    xml_path: P,
    json_path: Q,
) -> Result<ConversionSummary> {
    let xml_path = xml_path.as_ref();
    let json_path = json_path.as_ref();
    info!("Converting {:?} to {:?}", xml_path, json_path);

    let xml_content = fs::read_to_string(xml_path)?;
    let (records, summary) = parse_weather_document(&xml_content)?;

    let file = File::create(json_path)?;
    write_json_lines(&records, BufWriter::new(file))?;

    info!(
        "Saved {} city records in JSON Lines format to {:?}",
        summary.cities_converted, json_path
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<weather_data generated_at="2024-05-01T12:00:00.123456">
  <city id="34" name="İstanbul">
    <current_weather>
      <temperature>21.5</temperature>
      <temperature_unit>°C</temperature_unit>
      <humidity>60</humidity>
      <apparent_temperature>20.9</apparent_temperature>
      <weather_code>0</weather_code>
      <weather_description>Gömülü Açıklama</weather_description>
      <is_day>1</is_day>
      <precipitation>0.0</precipitation>
      <rain>0.0</rain>
      <snowfall>0.0</snowfall>
      <cloud_cover>40</cloud_cover>
      <pressure>1013.2</pressure>
      <wind_speed>12.3</wind_speed>
      <wind_direction>220</wind_direction>
      <wind_gusts>25.2</wind_gusts>
    </current_weather>
  </city>
  <city id="6" name="Ankara"/>
</weather_data>
"#;

    #[test]
    fn test_parse_full_document() {
        let (records, summary) = parse_weather_document(DOCUMENT).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(summary.cities_converted, 1);
        assert_eq!(summary.cities_skipped, 1);
        assert_eq!(summary.coercion_failures, 0);

        let record = &records[0];
        assert_eq!(record.id.as_deref(), Some("34"));
        assert_eq!(record.name.as_deref(), Some("İstanbul"));
        assert_eq!(record.temperature, Some(21.5));
        assert_eq!(record.humidity, Some(60));
        assert_eq!(record.weather_code, Some(0));
        // Embedded text is kept, not re-derived from the code
        assert_eq!(record.weather_description.as_deref(), Some("Gömülü Açıklama"));
        assert_eq!(record.wind_direction, Some(220));
        assert_eq!(record.pressure, Some(1013.2));
        assert_eq!(record.generated_at.as_deref(), Some("2024-05-01T12:00:00.123456"));
    }

    #[rstest]
    #[case("temperature")]
    #[case("temperature_unit")]
    #[case("humidity")]
    #[case("apparent_temperature")]
    #[case("weather_code")]
    #[case("weather_description")]
    #[case("is_day")]
    #[case("precipitation")]
    #[case("rain")]
    #[case("snowfall")]
    #[case("cloud_cover")]
    #[case("pressure")]
    #[case("wind_speed")]
    #[case("wind_direction")]
    #[case("wind_gusts")]
    fn test_missing_element_becomes_null(#[case] field: &str) {
        let stripped: String = DOCUMENT
            .lines()
            .filter(|line| !line.trim_start().starts_with(&format!("<{field}>")))
            .collect::<Vec<_>>()
            .join("\n");

        let (records, _) = parse_weather_document(&stripped).unwrap();
        let value = serde_json::to_value(&records[0]).unwrap();

        assert!(value[field].is_null(), "{field} should be null");
        // Every other field is still populated
        let populated = value
            .as_object()
            .unwrap()
            .iter()
            .filter(|(key, v)| key.as_str() != field && !v.is_null())
            .count();
        assert_eq!(populated, 17);
    }

    #[rstest]
    #[case("N/A", None)]
    #[case("", None)]
    #[case("  7 ", Some(7))]
    #[case("220.0", Some(220))]
    fn test_integer_coercion(#[case] text: &str, #[case] expected: Option<i64>) {
        let mut coercer = FieldCoercer { city: "test", failures: 0 };
        assert_eq!(coercer.integer("humidity", &Some(text.to_string())), expected);
        assert_eq!(coercer.failures, 0);
    }

    #[rstest]
    #[case("abc")]
    #[case("12.5")]
    fn test_invalid_integer_is_counted(#[case] text: &str) {
        let mut coercer = FieldCoercer { city: "test", failures: 0 };
        assert_eq!(coercer.integer("cloud_cover", &Some(text.to_string())), None);
        assert_eq!(coercer.failures, 1);
    }

    #[test]
    fn test_legacy_placeholder_document() {
        let legacy = DOCUMENT.replace("<rain>0.0</rain>", "<rain>N/A</rain>");
        let (records, summary) = parse_weather_document(&legacy).unwrap();

        assert_eq!(records[0].rain, None);
        assert_eq!(summary.coercion_failures, 0);
    }

    #[test]
    fn test_missing_unit_is_not_defaulted() {
        let (records, summary) = parse_weather_document(
            r#"<weather_data generated_at="2024-05-01T12:00:00">
  <city id="1" name="Adana">
    <current_weather><temperature>21.5</temperature><rain/><humidity></humidity></current_weather>
  </city>
</weather_data>"#,
        )
        .unwrap();

        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["temperature"], 21.5);
        assert!(value["temperature_unit"].is_null());
        assert!(value["rain"].is_null());
        assert!(value["humidity"].is_null());
        assert_eq!(summary.coercion_failures, 0);
    }

    #[test]
    fn test_nested_city_is_ignored() {
        let (records, summary) = parse_weather_document(
            r#"<weather_data generated_at="2024-05-01T12:00:00">
  <region>
    <city id="1" name="Adana"><current_weather><temperature>21.5</temperature></current_weather></city>
  </region>
  <city id="6" name="Ankara"><current_weather><temperature>18.0</temperature></current_weather></city>
</weather_data>"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("6"));
        assert_eq!(summary.cities_converted, 1);
    }

    #[test]
    fn test_document_without_cities() {
        let (records, summary) =
            parse_weather_document(r#"<weather_data generated_at="2024-05-01T12:00:00"/>"#).unwrap();
        assert!(records.is_empty());
        assert_eq!(summary, ConversionSummary::default());
    }

    #[test]
    fn test_json_lines_output() {
        let (records, _) = parse_weather_document(DOCUMENT).unwrap();
        let mut buffer = Vec::new();
        write_json_lines(&records, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(output.lines().count(), 1);
        assert!(output.ends_with('\n'));
        assert!(output.contains("İstanbul"));
        assert!(output.starts_with(r#"{"id":"34","name":"İstanbul","temperature":21.5,"temperature_unit":"°C","humidity":60,"#));
        assert!(output.contains(r#""weather_code":0,"#));
    }

    #[test]
    fn test_convert_files() {
        let dir = tempfile::tempdir().unwrap();
        let xml_path = dir.path().join("weather.xml");
        let json_path = dir.path().join("weather.json");
        fs::write(&xml_path, DOCUMENT).unwrap();

        let summary = convert_xml_to_json(&xml_path, &json_path).unwrap();
        assert_eq!(summary.cities_converted, 1);

        let content = fs::read_to_string(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(value["temperature"], 21.5);
        assert_eq!(value["generated_at"], "2024-05-01T12:00:00.123456");
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_xml_to_json(dir.path().join("missing.xml"), dir.path().join("out.json"));
        assert!(matches!(result, Err(WeatherEtlError::Io { .. })));
    }
}
