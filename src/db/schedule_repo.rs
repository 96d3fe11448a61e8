// src/db/schedule_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::schedule::{
        NewShift, Shift, ShiftStatus, ShiftTrade, ShiftTradeDetail, ShiftWithUser, TradableShift,
        TradeStatus,
    },
};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Grade semanal ---

    // Turnos no intervalo [start_date, end_date], com nome/função de quem
    // trabalha. `user_id = Some(..)` restringe à visão do funcionário.
    pub async fn list_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_id: Option<Uuid>,
    ) -> Result<Vec<ShiftWithUser>, AppError> {
        let shifts = sqlx::query_as::<_, ShiftWithUser>(
            r#"
            SELECT s.id, s.user_id, s.date, s.start_time, s.end_time, s.status,
                   u.name AS user_name, u.position AS user_position
            FROM shifts s
            JOIN users u ON u.id = s.user_id
            WHERE s.date >= $1 AND s.date <= $2
              AND ($3::uuid IS NULL OR s.user_id = $3)
            ORDER BY s.date, s.start_time
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shifts)
    }

    // --- CRUD manual de turnos (gerente) ---

    pub async fn create_shift(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Shift, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (user_id, date, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, start_time, end_time, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(shift)
    }

    pub async fn update_shift(
        &self,
        id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET user_id = $2, date = $3, start_time = $4, end_time = $5
            WHERE id = $1
            RETURNING id, user_id, date, start_time, end_time, status, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(shift)
    }

    pub async fn delete_shift(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // --- Geração de escala ---

    // Apaga os turnos da semana [week_start, week_start + 7 dias).
    // Roda dentro da transação de replace-week do service.
    pub async fn delete_week<'e, E>(
        &self,
        executor: E,
        week_start: NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM shifts WHERE date >= $1 AND date < $1 + INTERVAL '7 days'",
        )
        .bind(week_start)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    // Insert em lote via UNNEST: uma ida ao banco para a semana inteira.
    pub async fn insert_many<'e, E>(
        &self,
        executor: E,
        shifts: &[NewShift],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if shifts.is_empty() {
            return Ok(0);
        }

        let user_ids: Vec<Uuid> = shifts.iter().map(|s| s.user_id).collect();
        let dates: Vec<NaiveDate> = shifts.iter().map(|s| s.date).collect();
        let start_times: Vec<NaiveTime> = shifts.iter().map(|s| s.start_time).collect();
        let end_times: Vec<NaiveTime> = shifts.iter().map(|s| s.end_time).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO shifts (user_id, date, start_time, end_time)
            SELECT * FROM UNNEST($1::uuid[], $2::date[], $3::time[], $4::time[])
            "#,
        )
        .bind(&user_ids)
        .bind(&dates)
        .bind(&start_times)
        .bind(&end_times)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    // --- Visões do funcionário ---

    // Meus turnos nos próximos 14 dias.
    pub async fn list_upcoming_for_user(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT id, user_id, date, start_time, end_time, status, created_at
             FROM shifts
             WHERE user_id = $1 AND date >= $2 AND date <= $3
             ORDER BY date, start_time",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(shifts)
    }

    // Turnos em troca (status TRADING) que não são do próprio usuário,
    // cada um com a contagem de pedidos PENDING já abertos sobre ele.
    pub async fn list_trading_shifts(
        &self,
        excluding_user: Uuid,
    ) -> Result<Vec<TradableShift>, AppError> {
        let shifts = sqlx::query_as::<_, TradableShift>(
            r#"
            SELECT s.id, s.user_id, s.date, s.start_time, s.end_time, s.status,
                   u.name AS user_name, u.position AS user_position,
                   COUNT(t.id) FILTER (WHERE t.status = 'PENDING') AS pending_trades
            FROM shifts s
            JOIN users u ON u.id = s.user_id
            LEFT JOIN shift_trades t ON t.shift_id = s.id
            WHERE s.status = 'TRADING' AND s.user_id <> $1
            GROUP BY s.id, s.user_id, s.date, s.start_time, s.end_time, s.status,
                     u.name, u.position
            ORDER BY s.date
            "#,
        )
        .bind(excluding_user)
        .fetch_all(&self.pool)
        .await?;
        Ok(shifts)
    }

    // --- Trocas de turno ---

    pub async fn find_shift(&self, id: Uuid) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT id, user_id, date, start_time, end_time, status, created_at
             FROM shifts
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(shift)
    }

    pub async fn create_trade<'e, E>(
        &self,
        executor: E,
        shift_id: Uuid,
        requester_id: Uuid,
    ) -> Result<ShiftTrade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let trade = sqlx::query_as::<_, ShiftTrade>(
            r#"
            INSERT INTO shift_trades (shift_id, requester_id)
            VALUES ($1, $2)
            RETURNING id, shift_id, requester_id, status, created_at
            "#,
        )
        .bind(shift_id)
        .bind(requester_id)
        .fetch_one(executor)
        .await?;
        Ok(trade)
    }

    pub async fn find_trade(&self, id: Uuid) -> Result<Option<ShiftTrade>, AppError> {
        let trade = sqlx::query_as::<_, ShiftTrade>(
            "SELECT id, shift_id, requester_id, status, created_at
             FROM shift_trades
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(trade)
    }

    pub async fn update_trade_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TradeStatus,
    ) -> Result<ShiftTrade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let trade = sqlx::query_as::<_, ShiftTrade>(
            r#"
            UPDATE shift_trades
            SET status = $2
            WHERE id = $1
            RETURNING id, shift_id, requester_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(trade)
    }

    pub async fn set_shift_status<'e, E>(
        &self,
        executor: E,
        shift_id: Uuid,
        status: ShiftStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE shifts SET status = $2 WHERE id = $1")
            .bind(shift_id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // Troca aprovada: o turno passa para quem pediu e fica COVERED.
    pub async fn reassign_shift<'e, E>(
        &self,
        executor: E,
        shift_id: Uuid,
        new_user_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE shifts SET user_id = $2, status = 'COVERED' WHERE id = $1")
                .bind(shift_id)
                .bind(new_user_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    // Trocas visíveis para o usuário: as que ele pediu e as dos turnos dele.
    // Gerentes (viewer_id = None) enxergam tudo.
    pub async fn list_trades(
        &self,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<ShiftTradeDetail>, AppError> {
        let trades = sqlx::query_as::<_, ShiftTradeDetail>(
            r#"
            SELECT t.id, t.shift_id, t.requester_id, t.status, t.created_at,
                   s.date AS shift_date,
                   s.start_time AS shift_start_time,
                   s.end_time AS shift_end_time,
                   s.user_id AS owner_id,
                   owner.name AS owner_name,
                   req.name AS requester_name,
                   req.position AS requester_position
            FROM shift_trades t
            JOIN shifts s ON s.id = t.shift_id
            JOIN users owner ON owner.id = s.user_id
            JOIN users req ON req.id = t.requester_id
            WHERE $1::uuid IS NULL OR t.requester_id = $1 OR s.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(trades)
    }
}
