//! City model read from the coordinate list

use serde::{Deserialize, Serialize};

/// A city entry from `city_coordinates.xml`
///
/// Attributes are kept verbatim; coordinates stay textual because they are
/// passed straight through to the weather API query.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct City {
    /// City identifier (not checked for uniqueness)
    pub id: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<String>,
    /// Longitude in decimal degrees
    pub longitude: Option<String>,
}

impl City {
    /// Create a fully populated city
    #[must_use]
    pub fn new(id: &str, country: &str, name: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            country: Some(country.to_string()),
            name: Some(name.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
        }
    }

    /// Name for log output
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().or(self.id.as_deref()).unwrap_or("<unnamed>")
    }

    /// Coordinate pair, if both are present
    #[must_use]
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        Some((self.latitude.as_deref()?, self.longitude.as_deref()?))
    }
}
