// src/services/tips_service.rs

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TipsRepository,
    models::{
        auth::{Role, User},
        tips::{TipEntry, TipPage, TipStats},
    },
    services::generator::start_of_week,
};

const PAGE_SIZE: i64 = 10;
const TOP_EARNERS_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct TipsService {
    repo: TipsRepository,
}

impl TipsService {
    pub fn new(repo: TipsRepository) -> Self {
        Self { repo }
    }

    pub async fn add_entry(
        &self,
        user_id: Uuid,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<TipEntry, AppError> {
        self.repo.insert(user_id, amount, date, notes).await
    }

    // Paginação de 10 em 10; gerente vê todo mundo.
    pub async fn page(&self, viewer: &User, page: i64) -> Result<TipPage, AppError> {
        let page = page.max(1);
        let filter = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };

        let tips = self
            .repo
            .list_page(filter, PAGE_SIZE, (page - 1) * PAGE_SIZE)
            .await?;
        let total = self.repo.count(filter).await?;

        Ok(TipPage {
            tips,
            total_pages: (total + PAGE_SIZE - 1) / PAGE_SIZE,
        })
    }

    pub async fn stats(&self, viewer: &User) -> Result<TipStats, AppError> {
        let today = Utc::now().date_naive();
        let week_start = start_of_week(today);
        let month_start = today.with_day(1).unwrap_or(today);
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

        let filter = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };

        let daily_average = self.repo.average_amount(filter).await?;
        let weekly_total = self.repo.total_since(filter, week_start).await?;
        let monthly_total = self.repo.total_since(filter, month_start).await?;
        let yearly_total = self.repo.total_since(filter, year_start).await?;
        let last_seven_days = self
            .repo
            .daily_totals(filter, today - Duration::days(6), today)
            .await?;

        // Ranking só faz sentido (e só aparece) para o gerente.
        let top_earners = match viewer.role {
            Role::Manager => self.repo.top_earners(TOP_EARNERS_LIMIT).await?,
            Role::Employee => Vec::new(),
        };

        Ok(TipStats {
            daily_average,
            weekly_total,
            monthly_total,
            yearly_total,
            last_seven_days,
            top_earners,
        })
    }
}
