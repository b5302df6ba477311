//! Turns the raw parallel-array forecast payload into flat per-timestamp
//! records, then into typed [`HourlyWeatherRecord`]s.
//!
//! Field naming follows the `"{variable}_{unit}"` rule with a
//! whitespace-trimmed unit, so `temperature_2m` with unit `°C` becomes
//! `temperature_2m_°C` and an empty unit yields a trailing underscore.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::db::HourlyWeatherRecord;
use crate::fetch_error::FetchError;
use crate::fetcher::{ForecastPayload, HourlySeries};

/// One flat record per forecast hour: the raw timestamp string plus every
/// weather variable keyed by its `"{variable}_{unit}"` field name.
/// Null values in the source arrays are simply absent from `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub time: String,
    pub fields: BTreeMap<String, f64>,
}

/// Lazy, restartable iterator over the payload's time indexes. Pure view
/// over the payload; calling [`normalize`] again restarts from index zero.
pub struct FlatRecords<'a> {
    series: &'a HourlySeries,
    units: &'a BTreeMap<String, String>,
    index: usize,
}

impl Iterator for FlatRecords<'_> {
    type Item = FlatRecord;

    fn next(&mut self) -> Option<FlatRecord> {
        let time = self.series.time.get(self.index)?.clone();
        let mut fields = BTreeMap::new();
        for (variable, values) in &self.series.variables {
            if let Some(Some(value)) = values.get(self.index) {
                fields.insert(unit_key(variable, self.units), *value);
            }
        }
        self.index += 1;
        Some(FlatRecord { time, fields })
    }
}

fn unit_key(variable: &str, units: &BTreeMap<String, String>) -> String {
    let unit = units.get(variable).map(|u| u.trim()).unwrap_or("");
    format!("{}_{}", variable, unit)
}

/// Validates the payload shape and returns the flat-record sequence.
///
/// Fails with [`FetchError::MalformedPayload`] when either section is
/// missing, the time array is empty, a variable has no unit entry, or any
/// variable array's length differs from the time array's.
pub fn normalize(payload: &ForecastPayload) -> Result<FlatRecords<'_>, FetchError> {
    let series = payload
        .hourly
        .as_ref()
        .ok_or_else(|| FetchError::MalformedPayload("missing 'hourly' section".to_string()))?;
    let units = payload
        .hourly_units
        .as_ref()
        .ok_or_else(|| FetchError::MalformedPayload("missing 'hourly_units' section".to_string()))?;

    if series.time.is_empty() {
        return Err(FetchError::MalformedPayload(
            "no timestamp data in payload".to_string(),
        ));
    }
    for (variable, values) in &series.variables {
        if values.len() != series.time.len() {
            return Err(FetchError::MalformedPayload(format!(
                "variable '{}' has {} values for {} timestamps",
                variable,
                values.len(),
                series.time.len()
            )));
        }
        if !units.contains_key(variable) {
            return Err(FetchError::MalformedPayload(format!(
                "variable '{}' has no unit entry",
                variable
            )));
        }
    }

    Ok(FlatRecords {
        series,
        units,
        index: 0,
    })
}

/// Maps one flat record into the typed row, resolving each expected variable
/// through the same `"{variable}_{unit}"` key construction.
pub fn to_hourly_record(
    flat: &FlatRecord,
    units: &BTreeMap<String, String>,
) -> Result<HourlyWeatherRecord, FetchError> {
    // Forecast timestamps are naive local time, minute precision.
    let ts = NaiveDateTime::parse_from_str(&flat.time, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&flat.time, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| {
            FetchError::MalformedPayload(format!("unparseable timestamp '{}': {}", flat.time, e))
        })?;

    let field = |variable: &str| -> Result<f64, FetchError> {
        flat.fields
            .get(&unit_key(variable, units))
            .copied()
            .ok_or_else(|| {
                FetchError::MalformedPayload(format!(
                    "missing value for '{}' at {}",
                    variable, flat.time
                ))
            })
    };

    Ok(HourlyWeatherRecord {
        ts,
        temperature_c: field("temperature_2m")?,
        apparent_temperature_c: field("apparent_temperature")?,
        precipitation_mm: field("precipitation")?,
        relative_humidity_pct: field("relative_humidity_2m")?,
        wind_speed_kmh: field("wind_speed_10m")?,
        wind_gust_kmh: field("wind_gusts_10m")?,
        cloud_cover_pct: field("cloud_cover")?,
        visibility_m: field("visibility")?,
    })
}

/// Convenience for the pipeline: normalize and type every record in one pass.
pub fn typed_records(payload: &ForecastPayload) -> Result<Vec<HourlyWeatherRecord>, FetchError> {
    let units = payload
        .hourly_units
        .as_ref()
        .ok_or_else(|| FetchError::MalformedPayload("missing 'hourly_units' section".to_string()))?;
    normalize(payload)?
        .map(|flat| to_hourly_record(&flat, units))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::HOURLY_VARIABLES;
    use chrono::{NaiveDate, Timelike};

    fn sample_payload() -> ForecastPayload {
        serde_json::from_str(
            r#"{
                "hourly": {
                    "time": ["2025-04-26T12:00", "2025-04-26T13:00"],
                    "temperature_2m": [20.0, 21.0],
                    "apparent_temperature": [19.0, 20.0],
                    "precipitation": [0.0, 0.0],
                    "relative_humidity_2m": [60.0, 65.0],
                    "wind_speed_10m": [5.0, 6.0],
                    "wind_gusts_10m": [10.0, 12.0],
                    "cloud_cover": [50.0, 60.0],
                    "visibility": [10000.0, 10000.0]
                },
                "hourly_units": {
                    "time": "",
                    "temperature_2m": "°C",
                    "apparent_temperature": "°C",
                    "precipitation": "mm",
                    "relative_humidity_2m": "%",
                    "wind_speed_10m": "km/h",
                    "wind_gusts_10m": "km/h",
                    "cloud_cover": "%",
                    "visibility": "m"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_one_record_per_timestamp_with_unit_keyed_fields() {
        let payload = sample_payload();
        let records: Vec<FlatRecord> = normalize(&payload).unwrap().collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time, "2025-04-26T12:00");

        let expected_keys = [
            "temperature_2m_°C",
            "apparent_temperature_°C",
            "precipitation_mm",
            "relative_humidity_2m_%",
            "wind_speed_10m_km/h",
            "wind_gusts_10m_km/h",
            "cloud_cover_%",
            "visibility_m",
        ];
        let keys: Vec<&str> = records[0].fields.keys().map(String::as_str).collect();
        for key in expected_keys {
            assert!(keys.contains(&key), "missing field key {}", key);
        }
        assert_eq!(keys.len(), expected_keys.len());

        assert_eq!(records[0].fields["temperature_2m_°C"], 20.0);
        assert_eq!(records[1].fields["cloud_cover_%"], 60.0);
    }

    #[test]
    fn test_normalize_is_restartable() {
        let payload = sample_payload();
        let first: Vec<FlatRecord> = normalize(&payload).unwrap().collect();
        let second: Vec<FlatRecord> = normalize(&payload).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_unit_yields_trailing_underscore() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{
                "hourly": {"time": ["2025-04-26T12:00"], "temperature_2m": [20.0]},
                "hourly_units": {"time": "", "temperature_2m": " "}
            }"#,
        )
        .unwrap();
        let records: Vec<FlatRecord> = normalize(&payload).unwrap().collect();
        assert!(records[0].fields.contains_key("temperature_2m_"));
    }

    #[test]
    fn test_missing_hourly_section() {
        let payload: ForecastPayload =
            serde_json::from_str(r#"{"hourly_units": {"time": ""}}"#).unwrap();
        assert!(matches!(
            normalize(&payload),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_missing_units_section() {
        let payload: ForecastPayload =
            serde_json::from_str(r#"{"hourly": {"time": ["2025-04-26T12:00"]}}"#).unwrap();
        assert!(matches!(
            normalize(&payload),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_empty_time_array() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{"hourly": {"time": []}, "hourly_units": {"time": ""}}"#,
        )
        .unwrap();
        assert!(matches!(
            normalize(&payload),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{
                "hourly": {"time": ["2025-04-26T12:00", "2025-04-26T13:00"], "temperature_2m": [20.0]},
                "hourly_units": {"time": "", "temperature_2m": "°C"}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            normalize(&payload),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_typed_records_covers_expected_variables() {
        let payload = sample_payload();
        let records = typed_records(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(HOURLY_VARIABLES.len(), 8);

        let first = &records[0];
        assert_eq!(
            first.ts.date(),
            NaiveDate::from_ymd_opt(2025, 4, 26).unwrap()
        );
        assert_eq!(first.ts.hour(), 12);
        assert_eq!(first.temperature_c, 20.0);
        assert_eq!(first.apparent_temperature_c, 19.0);
        assert_eq!(first.wind_speed_kmh, 5.0);
        assert_eq!(first.visibility_m, 10000.0);
    }

    #[test]
    fn test_typed_records_null_value_is_malformed() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{
                "hourly": {
                    "time": ["2025-04-26T12:00"],
                    "temperature_2m": [null],
                    "apparent_temperature": [19.0],
                    "precipitation": [0.0],
                    "relative_humidity_2m": [60.0],
                    "wind_speed_10m": [5.0],
                    "wind_gusts_10m": [10.0],
                    "cloud_cover": [50.0],
                    "visibility": [10000.0]
                },
                "hourly_units": {
                    "time": "",
                    "temperature_2m": "°C",
                    "apparent_temperature": "°C",
                    "precipitation": "mm",
                    "relative_humidity_2m": "%",
                    "wind_speed_10m": "km/h",
                    "wind_gusts_10m": "km/h",
                    "cloud_cover": "%",
                    "visibility": "m"
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(
            typed_records(&payload),
            Err(FetchError::MalformedPayload(_))
        ));
    }
}
