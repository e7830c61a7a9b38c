use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    Config, GeoResult, Query, SearchError, provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// The two upstream lookups a search is made of.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a city name to its best match, `Ok(None)` when nothing matched.
    async fn geocode(&self, query: &Query) -> Result<Option<GeoResult>, SearchError>;

    /// Raw current-weather body for a resolved location, in metric units.
    async fn current_weather(&self, location: &GeoResult) -> Result<Value, SearchError>;
}

/// Construct the OpenWeather provider from config.
///
/// Returns `Ok(None)` when no API key is configured; the orchestrator turns
/// that into a missing-credential failure at search time.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Option<Box<dyn WeatherProvider>>> {
    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };

    let provider = OpenWeatherProvider::with_base_url(api_key, &config.lang, &config.base_url)?;
    Ok(Some(Box::new(provider)))
}
