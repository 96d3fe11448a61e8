// src/handlers/schedule.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::ValidationError;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManagerOnly, RequireRole},
    },
    models::schedule::GenerateScheduleResponse,
};

// ---
// Payload: geração de escala
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSchedulePayload {
    // Qualquer data da semana serve; normalizamos para o domingo dela.
    #[schema(example = "2025-06-01")]
    pub week_start: NaiveDate,
}

// ---
// Handler: POST /api/schedule/generate (só gerente)
// ---
#[utoipa::path(
    post,
    path = "/api/schedule/generate",
    tag = "Schedule",
    request_body = GenerateSchedulePayload,
    responses(
        (status = 200, body = GenerateScheduleResponse),
        (status = 403, description = "Apenas gerentes podem gerar a escala"),
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_schedule(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<GenerateSchedulePayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state
        .schedule_service
        .generate_week(payload.week_start)
        .await?;

    Ok((
        StatusCode::OK,
        Json(GenerateScheduleResponse {
            success: true,
            shifts_created: created,
        }),
    ))
}

// ---
// Handler: GET /api/schedule?weekStart=...
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    // Sem parâmetro, mostra a semana corrente.
    pub week_start: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/schedule",
    tag = "Schedule",
    params(WeekQuery),
    responses((status = 200)),
    security(("api_jwt" = []))
)]
pub async fn get_schedule(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let week_start = query.week_start.unwrap_or_else(|| Utc::now().date_naive());

    let shifts = app_state
        .schedule_service
        .week_view(week_start, &user.0)
        .await?;

    Ok((StatusCode::OK, Json(shifts)))
}

// ---
// CRUD manual de turnos (gerente)
// ---

// Turno de duração zero ou invertido não entra.
fn validate_shift_window(
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(), ValidationError> {
    if end_time <= start_time {
        let mut err = ValidationError::new("window");
        err.message = Some("O fim do turno deve ser depois do início.".into());
        return Err(err);
    }
    Ok(())
}

fn window_error(e: ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add("endTime", e);
    AppError::ValidationError(errors)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftPayload {
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[schema(example = "11:00:00")]
    pub start_time: NaiveTime,
    #[schema(example = "19:00:00")]
    pub end_time: NaiveTime,
}

#[utoipa::path(
    post,
    path = "/api/schedule/shift",
    tag = "Schedule",
    request_body = CreateShiftPayload,
    responses((status = 201)),
    security(("api_jwt" = []))
)]
pub async fn create_shift(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<CreateShiftPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_shift_window(payload.start_time, payload.end_time).map_err(window_error)?;

    let shift = app_state
        .schedule_service
        .create_shift(
            payload.user_id,
            payload.date,
            payload.start_time,
            payload.end_time,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftPayload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[utoipa::path(
    put,
    path = "/api/schedule/shift",
    tag = "Schedule",
    request_body = UpdateShiftPayload,
    responses((status = 200), (status = 404, description = "Turno não encontrado")),
    security(("api_jwt" = []))
)]
pub async fn update_shift(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<UpdateShiftPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_shift_window(payload.start_time, payload.end_time).map_err(window_error)?;

    let shift = app_state
        .schedule_service
        .update_shift(
            payload.id,
            payload.user_id,
            payload.date,
            payload.start_time,
            payload.end_time,
        )
        .await?;

    Ok((StatusCode::OK, Json(shift)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteShiftQuery {
    pub id: Uuid,
}

#[utoipa::path(
    delete,
    path = "/api/schedule/shift",
    tag = "Schedule",
    params(DeleteShiftQuery),
    responses((status = 200), (status = 404, description = "Turno não encontrado")),
    security(("api_jwt" = []))
)]
pub async fn delete_shift(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Query(query): Query<DeleteShiftQuery>,
) -> Result<impl IntoResponse, AppError> {
    app_state.schedule_service.delete_shift(query.id).await?;
    Ok((StatusCode::OK, Json(serde_json::json!({ "success": true }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn shift_window_must_end_after_it_starts() {
        assert!(validate_shift_window(hm(11, 0), hm(19, 0)).is_ok());
        assert!(validate_shift_window(hm(19, 0), hm(11, 0)).is_err());
        // Duração zero também é inválida.
        assert!(validate_shift_window(hm(11, 0), hm(11, 0)).is_err());
    }
}
