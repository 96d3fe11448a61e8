// src/db/availability_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::availability::Availability};

#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Janelas ainda vigentes de um usuário, ordenadas por dia da semana.
    pub async fn list_valid_for_user(&self, user_id: Uuid) -> Result<Vec<Availability>, AppError> {
        let windows = sqlx::query_as::<_, Availability>(
            "SELECT id, user_id, day_of_week, start_time, end_time, valid_until, created_at
             FROM availability
             WHERE user_id = $1
               AND (valid_until IS NULL OR valid_until > CURRENT_DATE)
             ORDER BY day_of_week",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(windows)
    }

    // Todas as janelas vigentes de todos os usuários, numa só consulta.
    // O gerador agrupa por funcionário em memória.
    pub async fn list_all_valid(&self) -> Result<Vec<Availability>, AppError> {
        let windows = sqlx::query_as::<_, Availability>(
            "SELECT id, user_id, day_of_week, start_time, end_time, valid_until, created_at
             FROM availability
             WHERE valid_until IS NULL OR valid_until > CURRENT_DATE
             ORDER BY user_id, day_of_week",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(windows)
    }

    // Encerra a janela aberta (valid_until NULL) daquele dia da semana.
    // É chamada antes de inserir a substituta, na mesma transação.
    pub async fn expire_open_windows<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        day_of_week: i16,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE availability
             SET valid_until = CURRENT_DATE
             WHERE user_id = $1 AND day_of_week = $2 AND valid_until IS NULL",
        )
        .bind(user_id)
        .bind(day_of_week)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        valid_until: Option<NaiveDate>,
    ) -> Result<Availability, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let window = sqlx::query_as::<_, Availability>(
            r#"
            INSERT INTO availability (user_id, day_of_week, start_time, end_time, valid_until)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, day_of_week, start_time, end_time, valid_until, created_at
            "#,
        )
        .bind(user_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .bind(valid_until)
        .fetch_one(executor)
        .await?;
        Ok(window)
    }
}
