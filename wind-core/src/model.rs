use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of daily entries requested from the forecast service and rendered.
pub const FORECAST_DAYS: usize = 7;

/// A geocoded place: the first match returned for a city query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    pub wind_direction_deg: Option<f64>,
    pub wind_gust_mph: Option<f64>,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub high_f: f64,
    pub low_f: f64,
    pub precip_probability_pct: f64,
    pub wind_speed_max_mph: Option<f64>,
    pub wind_direction_dominant_deg: Option<f64>,
}

/// Everything needed to render one lookup. `daily` holds exactly
/// [`FORECAST_DAYS`] entries, today first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}
