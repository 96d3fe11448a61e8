// src/models/tips.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "35.50")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipEntryDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_position: String,
}

// Listagem paginada: GET /api/tips?page=N
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipPage {
    pub tips: Vec<TipEntryDetail>,
    pub total_pages: i64,
}

// Um ponto da série dos últimos 7 dias.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTipTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopEarner {
    pub user_id: Uuid,
    pub user_name: String,
    pub total: Decimal,
}

// Painel de estatísticas: GET /api/tips/stats
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipStats {
    #[schema(example = "28.75")]
    pub daily_average: Decimal,
    pub weekly_total: Decimal,
    pub monthly_total: Decimal,
    pub yearly_total: Decimal,
    pub last_seven_days: Vec<DailyTipTotal>,
    // Preenchido apenas para gerentes.
    pub top_earners: Vec<TopEarner>,
}
