use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    error::{Endpoint, SearchError},
    model::{GeoResult, Query},
};

use super::WeatherProvider;

const GEOCODE_PATH: &str = "geo/1.0/direct";
const WEATHER_PATH: &str = "data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    lang: String,
    geocode_url: Url,
    weather_url: Url,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("lang", &self.lang)
            .field("geocode_url", &self.geocode_url.as_str())
            .field("weather_url", &self.weather_url.as_str())
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    /// `base_url` is scheme and host (plus optional path prefix) of the provider.
    pub fn with_base_url(api_key: &str, lang: &str, base_url: &str) -> Result<Self> {
        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .with_context(|| format!("Invalid provider base URL '{base_url}'"))?;

        Ok(Self {
            api_key: api_key.to_owned(),
            lang: lang.to_owned(),
            geocode_url: base.join(GEOCODE_PATH)?,
            weather_url: base.join(WEATHER_PATH)?,
            http: Client::new(),
        })
    }

    /// GET `url` and decode the body as JSON; non-2xx statuses become
    /// [`SearchError::Http`].
    async fn get_json(
        &self,
        endpoint: Endpoint,
        url: &Url,
        params: &[(&str, &str)],
    ) -> Result<Value, SearchError> {
        tracing::debug!(%endpoint, %url, "sending request");

        let res = self
            .http
            .get(url.clone())
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(endpoint, e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%endpoint, %status, "provider returned an error status");
            return Err(SearchError::Http {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(endpoint, e))?;

        serde_json::from_str(&body).map_err(|e| {
            SearchError::malformed(endpoint, format!("{e}; body: {}", truncate_body(&body)))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, query: &Query) -> Result<Option<GeoResult>, SearchError> {
        let body = self
            .get_json(
                Endpoint::Geocode,
                &self.geocode_url,
                &[("q", query.as_str()), ("limit", "1")],
            )
            .await?;

        GeoResult::first_from(&body)
    }

    async fn current_weather(&self, location: &GeoResult) -> Result<Value, SearchError> {
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        self.get_json(
            Endpoint::Weather,
            &self.weather_url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
