// src/services/schedule_service.rs

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        AvailabilityRepository, ScheduleRepository, SettingsRepository, TimeOffRepository,
        UserRepository,
    },
    models::{
        auth::{Role, User},
        schedule::{
            Shift, ShiftStatus, ShiftTrade, ShiftTradeDetail, ShiftWithUser, TradableShift,
            TradeStatus,
        },
    },
    services::generator::{
        self, DayWindow, LeaveInterval, OpenWindow, RosterEmployee, ShiftTemplate,
    },
};

#[derive(Clone)]
pub struct ScheduleService {
    pool: PgPool,
    schedule_repo: ScheduleRepository,
    user_repo: UserRepository,
    availability_repo: AvailabilityRepository,
    time_off_repo: TimeOffRepository,
    settings_repo: SettingsRepository,
    // Templates injetados na subida; o algoritmo não tem política embutida.
    templates: Arc<Vec<ShiftTemplate>>,
}

impl ScheduleService {
    pub fn new(
        pool: PgPool,
        schedule_repo: ScheduleRepository,
        user_repo: UserRepository,
        availability_repo: AvailabilityRepository,
        time_off_repo: TimeOffRepository,
        settings_repo: SettingsRepository,
        templates: Vec<ShiftTemplate>,
    ) -> Self {
        Self {
            pool,
            schedule_repo,
            user_repo,
            availability_repo,
            time_off_repo,
            settings_repo,
            templates: Arc::new(templates),
        }
    }

    // --- Geração da escala semanal ---
    //
    // Carrega tudo, planeja em memória e troca a semana inteira numa única
    // transação (apagar + inserir). Regerar é destrutivo por contrato: os
    // turnos anteriores da semana somem e entram os novos.
    pub async fn generate_week(&self, week_start: NaiveDate) -> Result<u64, AppError> {
        let week_start = generator::start_of_week(week_start);
        let week_end = week_start + Duration::days(6);

        // 1. Horário de funcionamento (só os dias abertos)
        let open_days: Vec<OpenWindow> = self
            .settings_repo
            .list_open_days()
            .await?
            .into_iter()
            .map(|h| OpenWindow {
                day_of_week: h.day_of_week,
                is_open: h.is_open,
                open_time: h.open_time,
                close_time: h.close_time,
            })
            .collect();

        // 2. Elenco: funcionários + janelas de disponibilidade vigentes
        let employees = self.user_repo.list_employees().await?;
        let windows = self.availability_repo.list_all_valid().await?;
        let mut windows_by_user: HashMap<Uuid, Vec<DayWindow>> = HashMap::new();
        for w in windows {
            windows_by_user.entry(w.user_id).or_default().push(DayWindow {
                day_of_week: w.day_of_week,
                start_time: w.start_time,
                end_time: w.end_time,
            });
        }
        let roster: Vec<RosterEmployee> = employees
            .into_iter()
            .map(|u| RosterEmployee {
                id: u.id,
                position: u.position,
                availability: windows_by_user.remove(&u.id).unwrap_or_default(),
            })
            .collect();

        // 3. Folgas aprovadas que tocam a semana
        let leaves: Vec<LeaveInterval> = self
            .time_off_repo
            .list_approved_overlapping(week_start, week_end)
            .await?
            .into_iter()
            .map(|t| LeaveInterval {
                user_id: t.user_id,
                start_date: t.start_date,
                end_date: t.end_date,
            })
            .collect();

        // 4. Planeja (sorteio com RNG de produção)
        let planned = generator::plan_week(
            week_start,
            &open_days,
            &roster,
            &leaves,
            &self.templates,
            &mut rand::thread_rng(),
        );

        // 5. Replace-week atômico
        let mut tx = self.pool.begin().await?;
        let removed = self.schedule_repo.delete_week(&mut *tx, week_start).await?;
        let created = self.schedule_repo.insert_many(&mut *tx, &planned).await?;
        tx.commit().await?;

        tracing::info!(
            "Escala da semana de {} gerada: {} turnos novos ({} antigos removidos)",
            week_start,
            created,
            removed
        );

        Ok(created)
    }

    // --- Grade semanal ---

    // Funcionário só enxerga os próprios turnos; gerente vê a grade inteira.
    pub async fn week_view(
        &self,
        week_start: NaiveDate,
        viewer: &User,
    ) -> Result<Vec<ShiftWithUser>, AppError> {
        let start = generator::start_of_week(week_start);
        let end = start + Duration::days(6);
        let filter = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };
        self.schedule_repo.list_range(start, end, filter).await
    }

    // --- CRUD manual (gerente) ---

    pub async fn create_shift(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Shift, AppError> {
        self.schedule_repo
            .create_shift(user_id, date, start_time, end_time)
            .await
    }

    pub async fn update_shift(
        &self,
        id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Shift, AppError> {
        self.schedule_repo
            .update_shift(id, user_id, date, start_time, end_time)
            .await?
            .ok_or(AppError::ShiftNotFound)
    }

    pub async fn delete_shift(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.schedule_repo.delete_shift(id).await?;
        if removed == 0 {
            return Err(AppError::ShiftNotFound);
        }
        Ok(())
    }

    // --- Visões do funcionário ---

    pub async fn my_shifts(&self, user_id: Uuid) -> Result<Vec<Shift>, AppError> {
        let today = Utc::now().date_naive();
        self.schedule_repo
            .list_upcoming_for_user(user_id, today, today + Duration::days(14))
            .await
    }

    pub async fn available_shifts(&self, viewer_id: Uuid) -> Result<Vec<TradableShift>, AppError> {
        self.schedule_repo.list_trading_shifts(viewer_id).await
    }

    // --- Trocas de turno ---

    // Abre um pedido de troca e marca o turno como TRADING, junto.
    pub async fn request_trade(
        &self,
        shift_id: Uuid,
        requester_id: Uuid,
    ) -> Result<ShiftTrade, AppError> {
        let _shift = self
            .schedule_repo
            .find_shift(shift_id)
            .await?
            .ok_or(AppError::ShiftNotFound)?;

        let mut tx = self.pool.begin().await?;
        let trade = self
            .schedule_repo
            .create_trade(&mut *tx, shift_id, requester_id)
            .await?;
        self.schedule_repo
            .set_shift_status(&mut *tx, shift_id, ShiftStatus::Trading)
            .await?;
        tx.commit().await?;

        Ok(trade)
    }

    // Decisão do gerente. Aprovada: o turno muda de dono e vira COVERED.
    // Rejeitada: o turno volta para SCHEDULED.
    pub async fn resolve_trade(
        &self,
        trade_id: Uuid,
        approved: bool,
    ) -> Result<ShiftTrade, AppError> {
        let trade = self
            .schedule_repo
            .find_trade(trade_id)
            .await?
            .ok_or(AppError::TradeNotFound)?;

        let mut tx = self.pool.begin().await?;
        let status = if approved {
            TradeStatus::Accepted
        } else {
            TradeStatus::Rejected
        };
        let updated = self
            .schedule_repo
            .update_trade_status(&mut *tx, trade_id, status)
            .await?;

        if approved {
            self.schedule_repo
                .reassign_shift(&mut *tx, trade.shift_id, trade.requester_id)
                .await?;
        } else {
            self.schedule_repo
                .set_shift_status(&mut *tx, trade.shift_id, ShiftStatus::Scheduled)
                .await?;
        }
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn list_trades(&self, viewer: &User) -> Result<Vec<ShiftTradeDetail>, AppError> {
        let filter = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };
        self.schedule_repo.list_trades(filter).await
    }
}
