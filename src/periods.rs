use std::collections::BTreeMap;

use chrono::Timelike;

use crate::db::HourlyWeatherRecord;

/// Fixed hour-of-day buckets, half-open: Morning `[6,10)`, Daytime `[10,18)`,
/// Evening `[18,24) ∪ [0,6)`. A record exactly on a boundary hour belongs to
/// the later bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Morning,
    Daytime,
    Evening,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Daytime, Period::Evening];

    pub fn of_hour(hour: u32) -> Period {
        match hour {
            6..=9 => Period::Morning,
            10..=17 => Period::Daytime,
            _ => Period::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Daytime => "Daytime",
            Period::Evening => "Evening",
        }
    }
}

/// Partitions a day's records into the three period buckets by local hour.
/// Always returns all three keys, each possibly empty.
pub fn split(records: &[HourlyWeatherRecord]) -> BTreeMap<Period, Vec<HourlyWeatherRecord>> {
    let mut buckets: BTreeMap<Period, Vec<HourlyWeatherRecord>> =
        Period::ALL.iter().map(|p| (*p, Vec::new())).collect();
    for record in records {
        buckets
            .entry(Period::of_hour(record.ts.hour()))
            .or_default()
            .push(record.clone());
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_at(hour: u32) -> HourlyWeatherRecord {
        HourlyWeatherRecord {
            ts: NaiveDate::from_ymd_opt(2025, 4, 26)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature_c: 15.0,
            apparent_temperature_c: 14.0,
            precipitation_mm: 0.0,
            relative_humidity_pct: 60.0,
            wind_speed_kmh: 10.0,
            wind_gust_kmh: 15.0,
            cloud_cover_pct: 50.0,
            visibility_m: 10000.0,
        }
    }

    #[test]
    fn test_split_always_returns_three_buckets() {
        let buckets = split(&[]);
        assert_eq!(buckets.len(), 3);
        for period in Period::ALL {
            assert!(buckets[&period].is_empty());
        }
    }

    #[test]
    fn test_split_partitions_all_records() {
        let records: Vec<HourlyWeatherRecord> = (0..24).map(record_at).collect();
        let buckets = split(&records);

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 24);
        assert_eq!(buckets[&Period::Morning].len(), 4); // hours 6..=9
        assert_eq!(buckets[&Period::Daytime].len(), 8); // hours 10..=17
        assert_eq!(buckets[&Period::Evening].len(), 12); // hours 18..=23 and 0..=5
    }

    #[test]
    fn test_boundary_hours_fall_into_later_bucket() {
        assert_eq!(Period::of_hour(6), Period::Morning);
        assert_eq!(Period::of_hour(9), Period::Morning);
        assert_eq!(Period::of_hour(10), Period::Daytime);
        assert_eq!(Period::of_hour(17), Period::Daytime);
        assert_eq!(Period::of_hour(18), Period::Evening);
        assert_eq!(Period::of_hour(23), Period::Evening);
        assert_eq!(Period::of_hour(0), Period::Evening);
        assert_eq!(Period::of_hour(5), Period::Evening);
    }
}
