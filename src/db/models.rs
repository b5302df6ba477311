use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One forecast hour, as stored in `open_meteo_weather.hourly_weather`.
///
/// `ts` is naive local time (the forecast source reports local wall-clock
/// time without a UTC offset) and is the table's primary key: refetching the
/// same hour replaces the row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct HourlyWeatherRecord {
    pub ts: NaiveDateTime,
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub precipitation_mm: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub wind_gust_kmh: f64,
    pub cloud_cover_pct: f64,
    pub visibility_m: f64,
}
