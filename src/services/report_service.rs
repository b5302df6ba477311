use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{error, info, instrument};

use crate::db::{HourlyWeatherRecord, WeatherRepository};
use crate::periods::{self, Period};
use crate::report::{self, DailyReport, PeriodReport, NO_DATA_MESSAGE};
use crate::rules;
use crate::summary::DayWeatherSummary;

/// Builds the daily outfit report from stored forecast rows.
#[derive(Clone)]
pub struct ReportService {
    weather_repo: WeatherRepository,
}

impl ReportService {
    pub fn new(weather_repo: WeatherRepository) -> Self {
        Self { weather_repo }
    }

    /// The report text for one local day. Never fails: a store outage and a
    /// legitimately empty day both render the fixed no-data sentence, logged
    /// at different levels so the two stay distinguishable.
    #[instrument(skip(self))]
    pub async fn daily_report(&self, date: NaiveDate) -> String {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);

        let records = match self.weather_repo.find_by_time_range(start, end).await {
            Ok(records) => records,
            Err(e) => {
                error!("Weather store unavailable, rendering no-data report: {}", e);
                return NO_DATA_MESSAGE.to_string();
            }
        };

        match Self::build(date, &records) {
            Some(report) => report::render(&report),
            None => {
                info!("No weather rows stored for {}, rendering no-data report", date);
                NO_DATA_MESSAGE.to_string()
            }
        }
    }

    /// Pure assembly step: split into periods, aggregate, run the rule
    /// engine per non-empty bucket. `None` when there are no records at all.
    pub fn build(date: NaiveDate, records: &[HourlyWeatherRecord]) -> Option<DailyReport> {
        let overall = DayWeatherSummary::from_records(records)?;

        let buckets = periods::split(records);
        let periods = Period::ALL
            .iter()
            .map(|period| {
                let report = DayWeatherSummary::from_records(&buckets[period]).map(|summary| {
                    PeriodReport {
                        outfit: rules::recommend(&summary),
                        summary,
                    }
                });
                (*period, report)
            })
            .collect();

        Some(DailyReport {
            date,
            overall,
            periods,
        })
    }
}
