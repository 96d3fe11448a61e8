// src/services/availability_service.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError, db::AvailabilityRepository, models::availability::Availability,
};

#[derive(Clone)]
pub struct AvailabilityService {
    pool: PgPool,
    repo: AvailabilityRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool, repo: AvailabilityRepository) -> Self {
        Self { pool, repo }
    }

    // Declarar disponibilidade substitui a janela aberta do mesmo dia:
    // encerra a antiga e insere a nova, tudo na mesma transação.
    pub async fn set_availability(
        &self,
        user_id: Uuid,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        valid_until: Option<NaiveDate>,
    ) -> Result<Availability, AppError> {
        let mut tx = self.pool.begin().await?;
        self.repo
            .expire_open_windows(&mut *tx, user_id, day_of_week)
            .await?;
        let window = self
            .repo
            .insert(&mut *tx, user_id, day_of_week, start_time, end_time, valid_until)
            .await?;
        tx.commit().await?;
        Ok(window)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Availability>, AppError> {
        self.repo.list_valid_for_user(user_id).await
    }
}
