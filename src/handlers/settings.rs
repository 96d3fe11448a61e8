// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveTime;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ManagerOnly, RequireRole},
};

// ---
// Handler: GET /api/operating-hours (público, a vitrine do restaurante)
// ---
#[utoipa::path(
    get,
    path = "/api/operating-hours",
    tag = "Settings",
    responses((status = 200))
)]
pub async fn get_operating_hours(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let hours = app_state.settings_service.operating_hours().await?;
    Ok((StatusCode::OK, Json(hours)))
}

// ---
// Payload: horário de funcionamento de um dia
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetOperatingHoursPayload {
    #[validate(range(min = 0, max = 6, message = "dayOfWeek deve estar entre 0 e 6."))]
    #[schema(example = 2, minimum = 0, maximum = 6)]
    pub day_of_week: i16,
    pub is_open: bool,
    #[schema(example = "07:00:00")]
    pub open_time: NaiveTime,
    #[schema(example = "23:00:00")]
    pub close_time: NaiveTime,
}

// ---
// Handler: POST /api/operating-hours (só gerente; upsert por dia)
// ---
#[utoipa::path(
    post,
    path = "/api/operating-hours",
    tag = "Settings",
    request_body = SetOperatingHoursPayload,
    responses((status = 200), (status = 403, description = "Apenas gerentes")),
    security(("api_jwt" = []))
)]
pub async fn set_operating_hours(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<SetOperatingHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let hours = app_state
        .settings_service
        .set_operating_hours(
            payload.day_of_week,
            payload.is_open,
            payload.open_time,
            payload.close_time,
        )
        .await?;

    Ok((StatusCode::OK, Json(hours)))
}
