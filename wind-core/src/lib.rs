//! Core library for the `wind` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The geocoding and forecast clients behind the [`Geocoder`] and
//!   [`ForecastSource`] traits
//! - Shared domain models and payload decoding
//! - Pure text rendering of a report
//!
//! It is used by `wind-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod payload;
pub mod pipeline;
pub mod provider;
pub mod render;

pub use config::{Config, Endpoints};
pub use error::WindError;
pub use model::{CurrentConditions, DailyForecastEntry, FORECAST_DAYS, Location, WeatherReport};
pub use payload::ForecastPayload;
pub use pipeline::lookup;
pub use provider::{ForecastSource, Geocoder, open_meteo::OpenMeteoClient};
pub use render::{compass_direction, day_label, describe_weather_code, render_report};
