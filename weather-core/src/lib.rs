//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (geocoding + current weather)
//! - The search orchestrator and its error classification
//! - Shared domain models (query, location, summary)
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod fields;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{Endpoint, ErrorKind, SearchError};
pub use model::{GeoResult, Query, WeatherSummary};
pub use orchestrator::Orchestrator;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{SearchState, Session, SessionError};
