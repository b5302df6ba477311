use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub forecast_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub forecast_days: u8,
    pub timezone: String,
    pub smtp_host: String,
    pub sender_email: String,
    pub sender_app_password: String,
    pub recipient_email: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let sender_email = env::var("SENDER_EMAIL")?;
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            forecast_url: env::var("FORECAST_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string()),
            latitude: env::var("LATITUDE")
                .unwrap_or_else(|_| "52.5244".to_string())
                .parse()
                .unwrap_or(52.5244),
            longitude: env::var("LONGITUDE")
                .unwrap_or_else(|_| "13.4105".to_string())
                .parse()
                .unwrap_or(13.4105),
            forecast_days: env::var("FORECAST_DAYS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            timezone: env::var("TIMEZONE").unwrap_or_else(|_| "Europe/Berlin".to_string()),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            recipient_email: env::var("RECIPIENT_EMAIL").unwrap_or_else(|_| sender_email.clone()),
            sender_email,
            sender_app_password: env::var("SENDER_APP_PASSWORD")?,
        })
    }
}

// Manual Debug so the SMTP app password never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("forecast_url", &self.forecast_url)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("forecast_days", &self.forecast_days)
            .field("timezone", &self.timezone)
            .field("smtp_host", &self.smtp_host)
            .field("sender_email", &self.sender_email)
            .field("sender_app_password", &"<redacted>")
            .field("recipient_email", &self.recipient_email)
            .finish()
    }
}
