// src/db/tips_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tips::{DailyTipTotal, TipEntry, TipEntryDetail, TopEarner},
};

#[derive(Clone)]
pub struct TipsRepository {
    pool: PgPool,
}

impl TipsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Uuid,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<TipEntry, AppError> {
        let entry = sqlx::query_as::<_, TipEntry>(
            r#"
            INSERT INTO tip_entries (user_id, amount, date, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, amount, date, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    // Página de lançamentos, mais recentes primeiro.
    // `user_id = None` é a visão do gerente (todos os funcionários).
    pub async fn list_page(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TipEntryDetail>, AppError> {
        let tips = sqlx::query_as::<_, TipEntryDetail>(
            r#"
            SELECT t.id, t.user_id, t.amount, t.date, t.notes, t.created_at,
                   u.name AS user_name, u.position AS user_position
            FROM tip_entries t
            JOIN users u ON u.id = t.user_id
            WHERE $1::uuid IS NULL OR t.user_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(tips)
    }

    pub async fn count(&self, user_id: Option<Uuid>) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tip_entries WHERE $1::uuid IS NULL OR user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    // Média simples por lançamento, não por dia.
    pub async fn average_amount(&self, user_id: Option<Uuid>) -> Result<Decimal, AppError> {
        let row: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(AVG(amount), 0)
             FROM tip_entries
             WHERE $1::uuid IS NULL OR user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn total_since(
        &self,
        user_id: Option<Uuid>,
        since: NaiveDate,
    ) -> Result<Decimal, AppError> {
        let row: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)
             FROM tip_entries
             WHERE date >= $2 AND ($1::uuid IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    // Totais por dia no intervalo [from, to], para o gráfico dos últimos 7 dias.
    pub async fn daily_totals(
        &self,
        user_id: Option<Uuid>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTipTotal>, AppError> {
        let totals = sqlx::query_as::<_, DailyTipTotal>(
            r#"
            SELECT date, SUM(amount) AS total
            FROM tip_entries
            WHERE date >= $2 AND date <= $3
              AND ($1::uuid IS NULL OR user_id = $1)
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(totals)
    }

    pub async fn top_earners(&self, limit: i64) -> Result<Vec<TopEarner>, AppError> {
        let earners = sqlx::query_as::<_, TopEarner>(
            r#"
            SELECT t.user_id, u.name AS user_name, SUM(t.amount) AS total
            FROM tip_entries t
            JOIN users u ON u.id = t.user_id
            GROUP BY t.user_id, u.name
            ORDER BY total DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(earners)
    }
}
