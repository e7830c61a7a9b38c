//! City name in, [`WeatherSummary`] out: geocode, then current weather.

use crate::{
    Config, SearchError,
    model::{Query, WeatherSummary},
    provider::{WeatherProvider, provider_from_config},
};

#[derive(Debug)]
pub struct Orchestrator {
    /// `None` when no API key is configured.
    provider: Option<Box<dyn WeatherProvider>>,
}

impl Orchestrator {
    pub fn new(provider: Option<Box<dyn WeatherProvider>>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    /// Run one search. No step is retried.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyQuery`] / [`SearchError::MissingCredential`]
    ///   before any request is sent.
    /// - [`SearchError::CityNotFound`] when geocoding succeeds with no match.
    /// - HTTP, network and malformed-body failures from either request.
    pub async fn search(&self, city: &str) -> Result<WeatherSummary, SearchError> {
        let query = Query::parse(city)?;
        let provider = self
            .provider
            .as_deref()
            .ok_or(SearchError::MissingCredential)?;

        let mut location = provider
            .geocode(&query)
            .await?
            .ok_or(SearchError::CityNotFound)?;

        if location.name.is_empty() {
            location.name = query.as_str().to_string();
        }
        tracing::info!(
            query = %query,
            lat = location.lat,
            lon = location.lon,
            "resolved location {}",
            location.label()
        );

        let body = provider.current_weather(&location).await?;

        Ok(WeatherSummary::from_current(location.label(), &body))
    }
}
