// src/db/settings_repo.rs

use chrono::NaiveTime;
use sqlx::PgPool;

use crate::{common::error::AppError, models::settings::OperatingHours};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_operating_hours(&self) -> Result<Vec<OperatingHours>, AppError> {
        let hours = sqlx::query_as::<_, OperatingHours>(
            "SELECT id, day_of_week, is_open, open_time, close_time, updated_at
             FROM operating_hours
             ORDER BY day_of_week",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(hours)
    }

    // Só os dias em que a casa abre; é o que o gerador de escala consome.
    pub async fn list_open_days(&self) -> Result<Vec<OperatingHours>, AppError> {
        let hours = sqlx::query_as::<_, OperatingHours>(
            "SELECT id, day_of_week, is_open, open_time, close_time, updated_at
             FROM operating_hours
             WHERE is_open = TRUE
             ORDER BY day_of_week",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(hours)
    }

    // UPSERT (Insert or Update) por dia da semana
    pub async fn upsert_operating_hours(
        &self,
        day_of_week: i16,
        is_open: bool,
        open_time: NaiveTime,
        close_time: NaiveTime,
    ) -> Result<OperatingHours, AppError> {
        let hours = sqlx::query_as::<_, OperatingHours>(
            r#"
            INSERT INTO operating_hours (day_of_week, is_open, open_time, close_time)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (day_of_week)
            DO UPDATE SET
                is_open = EXCLUDED.is_open,
                open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time,
                updated_at = NOW()
            RETURNING id, day_of_week, is_open, open_time, close_time, updated_at
            "#,
        )
        .bind(day_of_week)
        .bind(is_open)
        .bind(open_time)
        .bind(close_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(hours)
    }
}
