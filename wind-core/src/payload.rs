//! Raw forecast payload as returned by the forecast service, and its
//! validated conversion into a [`WeatherReport`].

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::WindError,
    model::{CurrentConditions, DailyForecastEntry, FORECAST_DAYS, Location, WeatherReport},
};

/// Forecast response body: one `current` record plus `daily` parallel arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub current: RawCurrent,
    pub daily: RawDaily,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    #[serde(default)]
    pub wind_direction_10m: Option<f64>,
    #[serde(default)]
    pub wind_gusts_10m: Option<f64>,
    pub weather_code: i32,
}

/// Daily series. Arrays are indexed in lockstep; index 0 is today.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m_dominant: Vec<Option<f64>>,
}

impl ForecastPayload {
    /// Validate the daily series and assemble the report for `location`.
    pub fn into_report(self, location: Location) -> Result<WeatherReport, WindError> {
        let daily = self.daily.into_entries()?;

        Ok(WeatherReport {
            location,
            current: self.current.into(),
            daily,
        })
    }
}

impl From<RawCurrent> for CurrentConditions {
    fn from(raw: RawCurrent) -> Self {
        Self {
            temperature_f: raw.temperature_2m,
            humidity_pct: raw.relative_humidity_2m,
            wind_speed_mph: raw.wind_speed_10m,
            wind_direction_deg: raw.wind_direction_10m,
            wind_gust_mph: raw.wind_gusts_10m,
            weather_code: raw.weather_code,
        }
    }
}

impl RawDaily {
    /// First [`FORECAST_DAYS`] entries. Extra days are ignored.
    pub fn into_entries(self) -> Result<Vec<DailyForecastEntry>, WindError> {
        ensure_len("time", self.time.len())?;
        ensure_len("weather_code", self.weather_code.len())?;
        ensure_len("temperature_2m_max", self.temperature_2m_max.len())?;
        ensure_len("temperature_2m_min", self.temperature_2m_min.len())?;
        ensure_len(
            "precipitation_probability_max",
            self.precipitation_probability_max.len(),
        )?;
        let wind_speed = optional_series("wind_speed_10m_max", &self.wind_speed_10m_max)?;
        let wind_dir =
            optional_series("wind_direction_10m_dominant", &self.wind_direction_10m_dominant)?;

        (0..FORECAST_DAYS)
            .map(|i| {
                Ok(DailyForecastEntry {
                    date: self.time[i],
                    weather_code: required(&self.weather_code, i, "weather_code")?,
                    high_f: required(&self.temperature_2m_max, i, "temperature_2m_max")?,
                    low_f: required(&self.temperature_2m_min, i, "temperature_2m_min")?,
                    precip_probability_pct: required(
                        &self.precipitation_probability_max,
                        i,
                        "precipitation_probability_max",
                    )?,
                    wind_speed_max_mph: wind_speed.and_then(|s| s[i]),
                    wind_direction_dominant_deg: wind_dir.and_then(|s| s[i]),
                })
            })
            .collect()
    }
}

fn ensure_len(field: &str, len: usize) -> Result<(), WindError> {
    if len < FORECAST_DAYS {
        tracing::warn!(field, len, "daily series shorter than forecast window");
        return Err(WindError::MalformedPayload(format!(
            "daily.{field} has {len} entries, expected at least {FORECAST_DAYS}"
        )));
    }
    Ok(())
}

/// An omitted optional series decodes as all-`None`; a present one must be full length.
fn optional_series<'a>(
    field: &str,
    series: &'a [Option<f64>],
) -> Result<Option<&'a [Option<f64>]>, WindError> {
    if series.is_empty() {
        return Ok(None);
    }
    ensure_len(field, series.len())?;
    Ok(Some(series))
}

fn required<T: Copy>(series: &[Option<T>], index: usize, field: &str) -> Result<T, WindError> {
    series[index].ok_or_else(|| {
        WindError::MalformedPayload(format!("daily.{field}[{index}] is null"))
    })
}
