use crate::{
    error::WindError,
    model::WeatherReport,
    provider::{ForecastSource, Geocoder},
};

/// Resolve `query`, fetch its forecast and decode it into a report.
///
/// Steps run one after another; the first failure is returned as-is.
pub async fn lookup(
    geocoder: &dyn Geocoder,
    source: &dyn ForecastSource,
    query: &str,
) -> Result<WeatherReport, WindError> {
    let location = geocoder.resolve(query).await?;
    let payload = source.fetch(&location).await?;

    payload.into_report(location).inspect_err(|e| {
        tracing::warn!(query, error = %e, "forecast payload rejected");
    })
}
