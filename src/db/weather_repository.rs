use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::db::{DbError, HourlyWeatherRecord};

#[derive(Clone)]
pub struct WeatherRepository {
    pool: PgPool,
}

impl WeatherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Merge a forecast batch into the table in a single transaction.
    /// Conflict key is `ts`; a refetched hour overwrites the earlier row,
    /// so forecast revisions are last-write-wins.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn upsert(&self, records: &[HourlyWeatherRecord]) -> Result<usize, DbError> {
        debug!("Beginning transaction to upsert {} records", records.len());
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO open_meteo_weather.hourly_weather
                    (ts, temperature_c, apparent_temperature_c, precipitation_mm,
                     relative_humidity_pct, wind_speed_kmh, wind_gust_kmh,
                     cloud_cover_pct, visibility_m)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (ts) DO UPDATE SET
                    temperature_c = EXCLUDED.temperature_c,
                    apparent_temperature_c = EXCLUDED.apparent_temperature_c,
                    precipitation_mm = EXCLUDED.precipitation_mm,
                    relative_humidity_pct = EXCLUDED.relative_humidity_pct,
                    wind_speed_kmh = EXCLUDED.wind_speed_kmh,
                    wind_gust_kmh = EXCLUDED.wind_gust_kmh,
                    cloud_cover_pct = EXCLUDED.cloud_cover_pct,
                    visibility_m = EXCLUDED.visibility_m
                "#,
            )
            .bind(record.ts)
            .bind(record.temperature_c)
            .bind(record.apparent_temperature_c)
            .bind(record.precipitation_mm)
            .bind(record.relative_humidity_pct)
            .bind(record.wind_speed_kmh)
            .bind(record.wind_gust_kmh)
            .bind(record.cloud_cover_pct)
            .bind(record.visibility_m)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }

        tx.commit().await?;
        info!("Upserted {} hourly weather rows", written);
        Ok(written)
    }

    /// Records in `[start, end)`, ascending by timestamp. An empty Vec means
    /// the range genuinely has no rows; failures surface as `DbError`.
    #[instrument(skip(self))]
    pub async fn find_by_time_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HourlyWeatherRecord>, DbError> {
        debug!("Querying hourly weather from {} to {}", start, end);

        let records = sqlx::query_as::<_, HourlyWeatherRecord>(
            r#"
            SELECT ts, temperature_c, apparent_temperature_c, precipitation_mm,
                   relative_humidity_pct, wind_speed_kmh, wind_gust_kmh,
                   cloud_cover_pct, visibility_m
            FROM open_meteo_weather.hourly_weather
            WHERE ts >= $1 AND ts < $2
            ORDER BY ts
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} records", records.len());
        Ok(records)
    }
}
