// src/models/settings.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Horário de funcionamento de um dia da semana (0 = domingo ... 6 = sábado).
// A ausência de linha para um dia é tratada como casa fechada.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    pub id: Uuid,
    #[schema(example = 1, minimum = 0, maximum = 6)]
    pub day_of_week: i16,
    pub is_open: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub updated_at: DateTime<Utc>,
}
