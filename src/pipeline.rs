//! One-shot pipeline run: fetch -> normalize -> upsert -> report -> notify.
//! Strictly sequential; a failure in any stage aborts the rest of the run.

use std::time::Instant;

use chrono::Local;
use tracing::{info, instrument};

use crate::db::{DbError, WeatherRepository};
use crate::fetch_error::FetchError;
use crate::fetcher::ForecastFetcher;
use crate::normalizer;
use crate::notifier::{Notifier, NotifyError};
use crate::services::ReportService;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] DbError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

#[instrument(skip_all)]
pub async fn run<N: Notifier>(
    fetcher: &ForecastFetcher,
    weather_repo: &WeatherRepository,
    report_service: &ReportService,
    notifier: &N,
    recipient: &str,
) -> Result<(), PipelineError> {
    let started = Instant::now();

    info!("Step 1: fetching weather forecast");
    let payload = fetcher.fetch_forecast().await?;
    let records = normalizer::typed_records(&payload)?;
    info!("Fetched {} hourly records", records.len());

    let written = weather_repo.upsert(&records).await?;
    info!("Stored {} hourly weather rows", written);

    info!("Step 2: generating outfit recommendation");
    // A data-unavailable day still produces a (placeholder) report; only
    // fetch, store and notify failures abort the run.
    let today = Local::now().date_naive();
    let report = report_service.daily_report(today).await;

    info!("Step 3: sending notification to {}", recipient);
    notifier.send(&report, recipient)?;

    info!(
        "Pipeline completed successfully in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
