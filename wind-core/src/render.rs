//! Pure text rendering of a [`WeatherReport`].
//!
//! Nothing here touches the network or the clock: "today" is always passed in,
//! so identical inputs render byte-identical output.

use chrono::NaiveDate;

use crate::model::{CurrentConditions, DailyForecastEntry, WeatherReport};

const RULE_WIDTH: usize = 40;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Short description of a WMO weather code. Unlisted codes are "Unknown".
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// 16-point compass label for a bearing, using 22.5° sectors centred on each point.
pub fn compass_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }
    let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize;
    COMPASS_POINTS[sector % COMPASS_POINTS.len()]
}

/// "Today" for `today`, otherwise e.g. "Tue 04/08".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else {
        date.format("%a %m/%d").to_string()
    }
}

/// Full text block: header, current conditions, then one row per daily entry.
pub fn render_report(report: &WeatherReport, today: NaiveDate) -> String {
    let rule = format!("  {}", "─".repeat(RULE_WIDTH));

    let mut lines = vec![String::new(), format!("  Weather for {}", report.location.name)];
    lines.push(rule.clone());
    lines.extend(current_lines(&report.current));

    lines.push(String::new());
    lines.push(format!("  {}-Day Forecast", report.daily.len()));
    lines.push(rule);
    lines.extend(report.daily.iter().map(|entry| format!("  {}", forecast_row(entry, today))));
    lines.push(String::new());

    lines.join("\n") + "\n"
}

fn current_lines(current: &CurrentConditions) -> Vec<String> {
    let wind = match current.wind_direction_deg {
        Some(deg) => format!("  Wind: {:.1} mph {}", current.wind_speed_mph, compass_direction(deg)),
        None => format!("  Wind: {:.1} mph", current.wind_speed_mph),
    };

    let mut lines = vec![
        format!("  Now: {}", describe_weather_code(current.weather_code)),
        format!("  Temperature: {:.1}°F", current.temperature_f),
        format!("  Humidity: {:.0}%", current.humidity_pct),
        wind,
    ];
    if let Some(gust) = current.wind_gust_mph {
        lines.push(format!("  Gusts: {gust:.1} mph"));
    }
    lines
}

fn forecast_row(entry: &DailyForecastEntry, today: NaiveDate) -> String {
    let day = day_label(entry.date, today);
    let high = entry.high_f.round() as i64;
    let low = entry.low_f.round() as i64;
    let precip = entry.precip_probability_pct.round() as i64;

    format!(
        "{day:<10} {high:>3}°/{low:<3}°  {precip:>3}% rain  {wind:<11}  {desc}",
        wind = wind_column(entry.wind_speed_max_mph, entry.wind_direction_dominant_deg),
        desc = describe_weather_code(entry.weather_code),
    )
}

fn wind_column(speed: Option<f64>, direction: Option<f64>) -> String {
    let speed = match speed {
        Some(s) => format!("{:>3}", s.round() as i64),
        None => " --".to_string(),
    };
    let direction = direction.map(compass_direction).unwrap_or("");
    format!("{speed} mph {direction:<3}")
}
