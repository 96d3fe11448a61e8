// src/models/availability.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Janela de disponibilidade de um funcionário em um dia da semana.
// valid_until = NULL significa "vale até segunda ordem"; o gerador só
// considera janelas ainda vigentes.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = 1, minimum = 0, maximum = 6)]
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
