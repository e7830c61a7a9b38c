use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Endpoint, SearchError},
    fields::{non_empty_text_at, number_at, round_half_up, text_at},
};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First match of a geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub country: Option<String>,
}

impl GeoResult {
    /// Pick the first element of a geocoding response body.
    ///
    /// Returns `Ok(None)` when the body is not an array or the array is empty.
    pub fn first_from(body: &Value) -> Result<Option<Self>, SearchError> {
        let Some(first) = body.as_array().and_then(|matches| matches.first()) else {
            return Ok(None);
        };

        let (Some(lat), Some(lon)) = (number_at(first, "/lat"), number_at(first, "/lon")) else {
            return Err(SearchError::malformed(
                Endpoint::Geocode,
                "first match has no finite lat/lon",
            ));
        };

        Ok(Some(Self {
            lat,
            lon,
            name: text_at(first, "/name"),
            country: non_empty_text_at(first, "/country"),
        }))
    }

    /// `"name, country"` when a country code is known, otherwise `name`.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Display-ready current weather for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSummary {
    pub city: String,
    /// Degrees Celsius.
    pub temp: Option<i64>,
    pub icon: String,
    pub description: String,
    /// Metres per second.
    pub wind: Option<i64>,
    /// Percent.
    pub humidity: Option<i64>,
}

impl WeatherSummary {
    /// Build from a current-weather body (`units=metric`).
    pub fn from_current(label: String, body: &Value) -> Self {
        Self {
            city: label,
            temp: number_at(body, "/main/temp").map(round_half_up),
            icon: text_at(body, "/weather/0/icon"),
            description: text_at(body, "/weather/0/description"),
            wind: number_at(body, "/wind/speed").map(round_half_up),
            // Integral in practice; a fractional value is rounded like the others.
            humidity: number_at(body, "/main/humidity").map(round_half_up),
        }
    }

    pub fn icon_url(&self) -> Option<String> {
        if self.icon.is_empty() {
            None
        } else {
            Some(format!("{ICON_BASE_URL}/{}@2x.png", self.icon))
        }
    }
}
