use crate::db::HourlyWeatherRecord;

/// Precipitation above this (mm in any hour) counts as rain.
pub const RAIN_THRESHOLD_MM: f64 = 0.2;
/// Precipitation above this (mm in any hour) counts as heavy rain.
pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 5.0;
/// Max wind speed above this (km/h) counts as strong wind.
pub const STRONG_WIND_THRESHOLD_KMH: f64 = 30.0;

/// Scalar aggregates over one period's (or the whole day's) records.
/// Ephemeral, recomputed on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWeatherSummary {
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
    pub min_apparent_temp: f64,
    pub max_apparent_temp: f64,
    pub will_rain: bool,
    pub heavy_rain: bool,
    pub max_wind: f64,
    pub strong_wind: bool,
}

impl DayWeatherSummary {
    /// Returns `None` for an empty record set; the rule engine is never
    /// invoked on an empty bucket.
    pub fn from_records(records: &[HourlyWeatherRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut min_temp = f64::INFINITY;
        let mut max_temp = f64::NEG_INFINITY;
        let mut temp_sum = 0.0;
        let mut min_apparent_temp = f64::INFINITY;
        let mut max_apparent_temp = f64::NEG_INFINITY;
        let mut will_rain = false;
        let mut heavy_rain = false;
        let mut max_wind: f64 = 0.0;

        for record in records {
            min_temp = min_temp.min(record.temperature_c);
            max_temp = max_temp.max(record.temperature_c);
            temp_sum += record.temperature_c;
            min_apparent_temp = min_apparent_temp.min(record.apparent_temperature_c);
            max_apparent_temp = max_apparent_temp.max(record.apparent_temperature_c);
            will_rain |= record.precipitation_mm > RAIN_THRESHOLD_MM;
            heavy_rain |= record.precipitation_mm > HEAVY_RAIN_THRESHOLD_MM;
            max_wind = max_wind.max(record.wind_speed_kmh);
        }

        Some(DayWeatherSummary {
            min_temp,
            max_temp,
            avg_temp: temp_sum / records.len() as f64,
            min_apparent_temp,
            max_apparent_temp,
            will_rain,
            heavy_rain,
            max_wind,
            strong_wind: max_wind > STRONG_WIND_THRESHOLD_KMH,
        })
    }
}
