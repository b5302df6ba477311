use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::fetch_error::FetchError;

/// The forecast variables requested from the weather API, in request order.
pub const HOURLY_VARIABLES: [&str; 8] = [
    "temperature_2m",
    "apparent_temperature",
    "precipitation",
    "relative_humidity_2m",
    "wind_speed_10m",
    "wind_gusts_10m",
    "cloud_cover",
    "visibility",
];

/// Raw response shape of the Open-Meteo forecast endpoint: parallel arrays
/// keyed by variable name under `hourly`, plus a variable -> unit map.
///
/// Both sections are optional here so that shape validation happens in the
/// normalizer with a proper error, not as an opaque decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub hourly: Option<HourlySeries>,
    pub hourly_units: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(flatten)]
    pub variables: BTreeMap<String, Vec<Option<f64>>>,
}

#[derive(Clone)]
pub struct ForecastFetcher {
    client: reqwest::Client,
    url: String,
    latitude: f64,
    longitude: f64,
    forecast_days: u8,
    timezone: String,
}

impl ForecastFetcher {
    pub fn new(
        url: String,
        latitude: f64,
        longitude: f64,
        forecast_days: u8,
        timezone: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            latitude,
            longitude,
            forecast_days,
            timezone,
        }
    }

    #[instrument(skip(self), fields(url = %self.url, lat = %self.latitude, lon = %self.longitude))]
    pub async fn fetch_forecast(&self) -> Result<ForecastPayload, FetchError> {
        debug!("Sending forecast request");
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.join(",")),
                ("models", "icon_seamless".to_string()),
                ("timezone", self.timezone.clone()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        debug!("Received forecast response, decoding JSON body");

        let payload = response.json::<ForecastPayload>().await?;
        Ok(payload)
    }
}
