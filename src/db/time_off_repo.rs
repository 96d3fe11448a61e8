// src/db/time_off_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::time_off::{TimeOffRequest, TimeOffRequestDetail, TimeOffStatus},
};

#[derive(Clone)]
pub struct TimeOffRepository {
    pool: PgPool,
}

impl TimeOffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<TimeOffRequest, AppError> {
        let request = sqlx::query_as::<_, TimeOffRequest>(
            r#"
            INSERT INTO time_off_requests (user_id, start_date, end_date, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, start_date, end_date, reason, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    // Lista com nome/função do solicitante. `user_id = None` traz todos
    // (visão do gerente); `Some(id)` restringe aos pedidos do próprio.
    pub async fn list_detailed(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<TimeOffRequestDetail>, AppError> {
        let requests = sqlx::query_as::<_, TimeOffRequestDetail>(
            r#"
            SELECT t.id, t.user_id, t.start_date, t.end_date, t.reason, t.status, t.created_at,
                   u.name AS user_name, u.position AS user_position
            FROM time_off_requests t
            JOIN users u ON u.id = t.user_id
            WHERE $1::uuid IS NULL OR t.user_id = $1
            ORDER BY t.start_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TimeOffStatus,
    ) -> Result<Option<TimeOffRequestDetail>, AppError> {
        let updated = sqlx::query_as::<_, TimeOffRequestDetail>(
            r#"
            UPDATE time_off_requests t
            SET status = $2
            FROM users u
            WHERE t.id = $1 AND u.id = t.user_id
            RETURNING t.id, t.user_id, t.start_date, t.end_date, t.reason, t.status, t.created_at,
                      u.name AS user_name, u.position AS user_position
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    // Folgas aprovadas que tocam o intervalo [start_date, end_date].
    // As datas do pedido são inclusivas nas duas pontas.
    pub async fn list_approved_overlapping(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<TimeOffRequest>, AppError> {
        let requests = sqlx::query_as::<_, TimeOffRequest>(
            "SELECT id, user_id, start_date, end_date, reason, status, created_at
             FROM time_off_requests
             WHERE status = 'APPROVED'
               AND start_date <= $2
               AND end_date >= $1",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}
