// src/models/schedule.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "shift_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Scheduled,
    // O dono do turno colocou ele para troca.
    Trading,
    // A troca foi aprovada e outro funcionário assumiu.
    Covered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "trade_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Pending,
    Accepted,
    Rejected,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
    pub created_at: DateTime<Utc>,
}

// Turno acompanhado do nome/função de quem trabalha nele.
// É o formato que a grade semanal do front consome.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
    #[schema(example = "Maria Souza")]
    pub user_name: String,
    #[schema(example = "Server")]
    pub user_position: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTrade {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub requester_id: Uuid,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
}

// Troca com o contexto que as listagens precisam mostrar:
// de quem é o turno e quem pediu para cobrir.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTradeDetail {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub requester_id: Uuid,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
    pub shift_date: NaiveDate,
    pub shift_start_time: NaiveTime,
    pub shift_end_time: NaiveTime,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub requester_name: String,
    pub requester_position: String,
}

// Turno em troca, do jeito que a lista de turnos disponíveis mostra:
// quem é o dono e quantos pedidos PENDING já existem sobre ele, para o
// interessado saber se o turno já tem fila.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradableShift {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
    #[schema(example = "Maria Souza")]
    pub user_name: String,
    #[schema(example = "Server")]
    pub user_position: String,
    #[schema(example = 1)]
    pub pending_trades: i64,
}

// Turno ainda sem ID, produzido pelo gerador antes do insert em lote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// Resposta da geração de escala: POST /api/schedule/generate
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScheduleResponse {
    pub success: bool,
    #[schema(example = 42)]
    pub shifts_created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tradable_shift_serializes_the_pending_trade_count() {
        let shift = TradableShift {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            status: ShiftStatus::Trading,
            user_name: "Maria Souza".into(),
            user_position: "Server".into(),
            pending_trades: 2,
        };

        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["pendingTrades"], 2);
        assert_eq!(json["status"], "TRADING");
        assert_eq!(json["userName"], "Maria Souza");
    }
}
