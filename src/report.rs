//! Renders the daily summary and per-period recommendations as plain text.
//! Pure; the only inputs are the precomputed summaries and outfit picks.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::periods::Period;
use crate::rules::OutfitRecommendation;
use crate::summary::DayWeatherSummary;

/// Rendered when the store has no rows for the requested date, or when the
/// store itself is unavailable. Callers must distinguish the two in logs.
pub const NO_DATA_MESSAGE: &str = "No weather data available for the specified date.";

/// Rendered in place of a period paragraph when its bucket is empty.
pub const NO_PERIOD_DATA: &str = "No data available for this period.";

#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub summary: DayWeatherSummary,
    pub outfit: OutfitRecommendation,
}

/// Everything the formatter needs for one day. `periods` always holds all
/// three periods in Morning/Daytime/Evening order; `None` marks an empty
/// bucket.
#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub overall: DayWeatherSummary,
    pub periods: Vec<(Period, Option<PeriodReport>)>,
}

pub fn render(report: &DailyReport) -> String {
    let mut out = String::new();
    let overall = &report.overall;

    let _ = writeln!(out, "Weather Summary for {}:", report.date);
    let _ = writeln!(
        out,
        "- Temperature range: {:.1}°C to {:.1}°C",
        overall.min_temp, overall.max_temp
    );
    let _ = writeln!(
        out,
        "- Feels like: {:.1}°C to {:.1}°C",
        overall.min_apparent_temp, overall.max_apparent_temp
    );
    for (period, period_report) in &report.periods {
        match period_report {
            Some(r) => {
                let _ = writeln!(
                    out,
                    "- {}: {:.1}°C to {:.1}°C",
                    period.label(),
                    r.summary.min_temp,
                    r.summary.max_temp
                );
            }
            None => {
                let _ = writeln!(out, "- {}: no data", period.label());
            }
        }
    }
    let _ = writeln!(
        out,
        "- {}",
        if overall.will_rain {
            "Rain expected"
        } else {
            "No rain expected"
        }
    );
    let _ = writeln!(
        out,
        "- {}",
        if overall.strong_wind {
            "Strong winds"
        } else {
            "Mild winds"
        }
    );

    for (period, period_report) in &report.periods {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", period.label());
        match period_report {
            None => {
                let _ = writeln!(out, "{}", NO_PERIOD_DATA);
            }
            Some(r) => {
                let outfit = &r.outfit;
                let _ = writeln!(out, "- Base layer: {}", outfit.base_layer);
                if let Some(mid) = &outfit.mid_layer {
                    let _ = writeln!(out, "- Mid layer: {}", mid);
                }
                if let Some(outer) = &outfit.outer_layer {
                    let _ = writeln!(out, "- Outerwear: {}", outer);
                }
                let _ = writeln!(out, "- Lower body: {}", outfit.lower_body);
                if let Some(acc) = &outfit.accessories {
                    let _ = writeln!(out, "- Accessories: {}", acc);
                }
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    fn summary(min_temp: f64, max_temp: f64) -> DayWeatherSummary {
        DayWeatherSummary {
            min_temp,
            max_temp,
            avg_temp: (min_temp + max_temp) / 2.0,
            min_apparent_temp: min_temp - 1.0,
            max_apparent_temp: max_temp - 1.0,
            will_rain: false,
            heavy_rain: false,
            max_wind: 10.0,
            strong_wind: false,
        }
    }

    fn period_report(min_temp: f64, max_temp: f64) -> PeriodReport {
        let s = summary(min_temp, max_temp);
        PeriodReport {
            outfit: rules::recommend(&s),
            summary: s,
        }
    }

    #[test]
    fn test_render_full_day() {
        let report = DailyReport {
            date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
            overall: summary(15.0, 22.0),
            periods: vec![
                (Period::Morning, Some(period_report(15.0, 15.0))),
                (Period::Daytime, Some(period_report(18.0, 22.0))),
                (Period::Evening, Some(period_report(16.0, 18.0))),
            ],
        };
        let text = render(&report);

        assert!(text.starts_with("Weather Summary for 2025-04-26:"));
        assert!(text.contains("- Temperature range: 15.0°C to 22.0°C"));
        assert!(text.contains("- Feels like: 14.0°C to 21.0°C"));
        assert!(text.contains("- No rain expected"));
        assert!(text.contains("- Mild winds"));
        for label in ["Morning:", "Daytime:", "Evening:"] {
            assert!(text.contains(label));
        }
        assert!(!text.contains(NO_PERIOD_DATA));
        // Mild day: no rain, no strong wind, max_temp <= 25.
        assert!(!text.contains("- Accessories:"));
        assert!(!text.contains("- Mid layer:"));
    }

    #[test]
    fn test_render_empty_period_uses_placeholder() {
        let report = DailyReport {
            date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
            overall: summary(15.0, 22.0),
            periods: vec![
                (Period::Morning, None),
                (Period::Daytime, Some(period_report(18.0, 22.0))),
                (Period::Evening, None),
            ],
        };
        let text = render(&report);

        assert!(text.contains("- Morning: no data"));
        assert!(text.contains("- Daytime: 18.0°C to 22.0°C"));
        assert_eq!(text.matches(NO_PERIOD_DATA).count(), 2);
    }

    #[test]
    fn test_render_cold_wet_day_shows_all_lines() {
        let mut s = summary(-2.0, 4.0);
        s.will_rain = true;
        s.heavy_rain = true;
        s.max_wind = 35.0;
        s.strong_wind = true;
        let report = DailyReport {
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            overall: s.clone(),
            periods: vec![(
                Period::Morning,
                Some(PeriodReport {
                    outfit: rules::recommend(&s),
                    summary: s,
                }),
            )],
        };
        let text = render(&report);

        assert!(text.contains("- Rain expected"));
        assert!(text.contains("- Strong winds"));
        assert!(text.contains("- Mid layer: Warm sweater or fleece"));
        assert!(text.contains("(wind-resistant preferred)"));
        assert!(text.contains("- Accessories: Waterproof rain jacket and umbrella, Hat, Gloves, Scarf"));
    }
}
