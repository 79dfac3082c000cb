use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WindError,
    model::{FORECAST_DAYS, Location},
    payload::ForecastPayload,
};

use super::{ForecastSource, Geocoder};

const USER_AGENT: &str = concat!("wind/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,\
wind_direction_10m,wind_gusts_10m,weather_code";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
precipitation_probability_max,wind_speed_10m_max,wind_direction_10m_dominant";

/// Client for the Open-Meteo geocoding and forecast APIs. Neither needs an API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: Url,
    forecast_url: Url,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: &str, forecast_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let geocoding_url = Url::parse(geocoding_url)
            .with_context(|| format!("Invalid geocoding URL '{geocoding_url}'"))?;
        let forecast_url = Url::parse(forecast_url)
            .with_context(|| format!("Invalid forecast URL '{forecast_url}'"))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self { http, geocoding_url, forecast_url })
    }

    async fn get_body(&self, what: &str, request: reqwest::RequestBuilder) -> Result<String, WindError> {
        let res = request
            .send()
            .await
            .map_err(|e| WindError::Transport(format!("{what} request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WindError::Transport(format!("Failed to read {what} response body: {e}")))?;

        if !status.is_success() {
            return Err(WindError::Transport(format!(
                "{what} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn resolve(&self, query: &str) -> Result<Location, WindError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WindError::NotFound { query: query.to_string() });
        }

        tracing::debug!(query, url = %self.geocoding_url, "geocoding city");

        let request = self
            .http
            .get(self.geocoding_url.clone())
            .query(&[("name", query), ("count", "1")]);
        let body = self.get_body("Geocoding", request).await?;

        let parsed: GeocodingResponse = serde_json::from_str(&body)?;

        let first = parsed
            .results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| WindError::NotFound { query: query.to_string() })?;

        tracing::info!(
            name = %first.name,
            latitude = first.latitude,
            longitude = first.longitude,
            "resolved city"
        );

        Ok(Location {
            latitude: first.latitude,
            longitude: first.longitude,
            name: first.name,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch(&self, location: &Location) -> Result<ForecastPayload, WindError> {
        tracing::debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            url = %self.forecast_url,
            "fetching forecast"
        );

        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let days = FORECAST_DAYS.to_string();

        let request = self.http.get(self.forecast_url.clone()).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("daily", DAILY_FIELDS),
            ("temperature_unit", "fahrenheit"),
            ("wind_speed_unit", "mph"),
            ("timezone", "auto"),
            ("forecast_days", days.as_str()),
        ]);
        let body = self.get_body("Forecast", request).await?;

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(
            &format!("{}/v1/search", server.uri()),
            &format!("{}/v1/forecast", server.uri()),
            Duration::from_secs(5),
        )
        .expect("client should build")
    }

    fn denver() -> Location {
        Location { latitude: 39.74, longitude: -104.98, name: "Denver".into() }
    }

    fn forecast_body() -> serde_json::Value {
        json!({
            "current": {
                "temperature_2m": 55.0,
                "relative_humidity_2m": 30,
                "wind_speed_10m": 4.2,
                "wind_direction_10m": 90,
                "wind_gusts_10m": 8.0,
                "weather_code": 0
            },
            "daily": {
                "time": ["2025-04-08", "2025-04-09", "2025-04-10", "2025-04-11",
                         "2025-04-12", "2025-04-13", "2025-04-14"],
                "weather_code": [0, 1, 2, 3, 45, 61, 95],
                "temperature_2m_max": [60.1, 61.2, 62.3, 63.4, 64.5, 65.6, 66.7],
                "temperature_2m_min": [40.1, 41.2, 42.3, 43.4, 44.5, 45.6, 46.7],
                "precipitation_probability_max": [0, 5, 10, 15, 20, 25, 30],
                "wind_speed_10m_max": [5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0],
                "wind_direction_10m_dominant": [0, 45, 90, 135, 180, 225, 270]
            }
        })
    }

    #[tokio::test]
    async fn resolve_returns_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Boulder, CO"))
            .and(query_param("count", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"name": "Boulder", "latitude": 40.01499, "longitude": -105.27055, "country": "United States"}
                ],
                "generationtime_ms": 0.7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let location = client(&server).resolve("Boulder, CO").await.unwrap();

        assert_eq!(location.name, "Boulder");
        assert_eq!(location.latitude, 40.01499);
        assert_eq!(location.longitude, -105.27055);
    }

    #[tokio::test]
    async fn resolve_empty_results_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let err = client(&server).resolve("Xyzzyville").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("Xyzzyville"));
    }

    #[tokio::test]
    async fn resolve_missing_results_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.3 })),
            )
            .mount(&server)
            .await;

        let err = client(&server).resolve("Nowhere").await.unwrap_err();
        assert!(matches!(err, WindError::NotFound { ref query } if query == "Nowhere"));
    }

    #[tokio::test]
    async fn resolve_blank_query_skips_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).resolve("   ").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn resolve_malformed_json_is_transport() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).resolve("Paris").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn fetch_sends_fixed_units_and_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "39.74"))
            .and(query_param("longitude", "-104.98"))
            .and(query_param("current", CURRENT_FIELDS))
            .and(query_param("daily", DAILY_FIELDS))
            .and(query_param("temperature_unit", "fahrenheit"))
            .and(query_param("wind_speed_unit", "mph"))
            .and(query_param("timezone", "auto"))
            .and(query_param("forecast_days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client(&server).fetch(&denver()).await.unwrap();

        assert_eq!(payload.current.weather_code, 0);
        assert_eq!(payload.daily.time.len(), 7);

        let report = payload.into_report(denver()).unwrap();
        assert_eq!(report.daily[6].weather_code, 95);
    }

    #[tokio::test]
    async fn fetch_server_error_is_transport() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = client(&server).fetch(&denver()).await.unwrap_err();

        assert!(err.is_transport());
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn fetch_missing_current_is_transport() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "daily": {} })))
            .mount(&server)
            .await;

        let err = client(&server).fetch(&denver()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
