// src/handlers/availability.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::Role,
};

// ---
// Payload: declarar disponibilidade
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityPayload {
    #[validate(range(min = 0, max = 6, message = "dayOfWeek deve estar entre 0 e 6."))]
    #[schema(example = 1, minimum = 0, maximum = 6)]
    pub day_of_week: i16,
    #[schema(example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(example = "20:00:00")]
    pub end_time: NaiveTime,
    pub valid_until: Option<NaiveDate>,
}

impl SetAvailabilityPayload {
    fn validate_window(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            let mut err = ValidationError::new("window");
            err.message = Some("O fim da janela deve ser depois do início.".into());
            return Err(err);
        }
        Ok(())
    }
}

// ---
// Handler: POST /api/availability
// ---
#[utoipa::path(
    post,
    path = "/api/availability",
    tag = "Availability",
    request_body = SetAvailabilityPayload,
    responses((status = 201)),
    security(("api_jwt" = []))
)]
pub async fn set_availability(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<SetAvailabilityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Validação de consistência manual, no mesmo formato de resposta.
    payload.validate_window().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("endTime", e);
        AppError::ValidationError(errors)
    })?;

    let window = app_state
        .availability_service
        .set_availability(
            user.0.id,
            payload.day_of_week,
            payload.start_time,
            payload.end_time,
            payload.valid_until,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(window)))
}

// ---
// Handler: GET /api/availability?userId=...
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub user_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/availability",
    tag = "Availability",
    params(AvailabilityQuery),
    responses((status = 200), (status = 403, description = "Só gerente vê a agenda alheia")),
    security(("api_jwt" = []))
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let target = query.user_id.unwrap_or(user.0.id);

    // Funcionário só consulta a própria disponibilidade.
    if target != user.0.id && user.0.role != Role::Manager {
        return Err(AppError::Forbidden);
    }

    let windows = app_state.availability_service.list_for_user(target).await?;
    Ok((StatusCode::OK, Json(windows)))
}
