use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dress_weatherly::config::Config;
use dress_weatherly::db::WeatherRepository;
use dress_weatherly::fetcher::ForecastFetcher;
use dress_weatherly::notifier::EmailNotifier;
use dress_weatherly::pipeline;
use dress_weatherly::services::ReportService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dress_weatherly=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    info!("Starting Dress-Weatherly pipeline with config: {:?}", config);

    // Create database connection pool
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations completed");

    let weather_repo = WeatherRepository::new(pool);
    let report_service = ReportService::new(weather_repo.clone());
    let fetcher = ForecastFetcher::new(
        config.forecast_url.clone(),
        config.latitude,
        config.longitude,
        config.forecast_days,
        config.timezone.clone(),
    );
    let notifier = EmailNotifier::new(
        &config.smtp_host,
        config.sender_email.clone(),
        config.sender_app_password.clone(),
    )?;

    pipeline::run(
        &fetcher,
        &weather_repo,
        &report_service,
        &notifier,
        &config.recipient_email,
    )
    .await?;

    Ok(())
}
