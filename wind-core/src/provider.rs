use crate::{
    Config, ForecastPayload, Location, WindError, provider::open_meteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Turns a free-text city query into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &str) -> Result<Location, WindError>;
}

/// Fetches current conditions and the daily series for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, location: &Location) -> Result<ForecastPayload, WindError>;
}

/// Construct the Open-Meteo client using the endpoints and timeout from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenMeteoClient> {
    OpenMeteoClient::new(
        &config.endpoints.geocoding_url,
        &config.endpoints.forecast_url,
        config.timeout(),
    )
}
