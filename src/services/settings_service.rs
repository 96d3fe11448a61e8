// src/services/settings_service.rs

use chrono::NaiveTime;

use crate::{common::error::AppError, db::SettingsRepository, models::settings::OperatingHours};

#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn operating_hours(&self) -> Result<Vec<OperatingHours>, AppError> {
        self.repo.list_operating_hours().await
    }

    pub async fn set_operating_hours(
        &self,
        day_of_week: i16,
        is_open: bool,
        open_time: NaiveTime,
        close_time: NaiveTime,
    ) -> Result<OperatingHours, AppError> {
        self.repo
            .upsert_operating_hours(day_of_week, is_open, open_time, close_time)
            .await
    }
}
