// src/handlers/time_off.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManagerOnly, RequireRole},
    },
    models::time_off::TimeOffStatus,
};

// ---
// Payload: pedido de folga
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestTimeOffPayload {
    #[schema(example = "2025-06-10")]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-12")]
    pub end_date: NaiveDate,
    #[validate(length(max = 500, message = "O motivo deve ter no máximo 500 caracteres."))]
    pub reason: Option<String>,
}

impl RequestTimeOffPayload {
    fn validate_range(&self) -> Result<(), ValidationError> {
        if self.end_date < self.start_date {
            let mut err = ValidationError::new("range");
            err.message = Some("A data final não pode ser antes da inicial.".into());
            return Err(err);
        }
        Ok(())
    }
}

// ---
// Handler: POST /api/time-off (entra sempre como PENDING)
// ---
#[utoipa::path(
    post,
    path = "/api/time-off",
    tag = "TimeOff",
    request_body = RequestTimeOffPayload,
    responses((status = 201)),
    security(("api_jwt" = []))
)]
pub async fn request_time_off(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RequestTimeOffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_range().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("endDate", e);
        AppError::ValidationError(errors)
    })?;

    let request = app_state
        .time_off_service
        .request(
            user.0.id,
            payload.start_date,
            payload.end_date,
            payload.reason.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

// ---
// Handler: GET /api/time-off (gerente vê todos, funcionário só os seus)
// ---
#[utoipa::path(
    get,
    path = "/api/time-off",
    tag = "TimeOff",
    responses((status = 200)),
    security(("api_jwt" = []))
)]
pub async fn list_time_off(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state.time_off_service.list(&user.0).await?;
    Ok((StatusCode::OK, Json(requests)))
}

// ---
// Handler: PUT /api/time-off/{id} (decisão do gerente)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTimeOffPayload {
    pub status: TimeOffStatus,
}

#[utoipa::path(
    put,
    path = "/api/time-off/{id}",
    tag = "TimeOff",
    params(("id" = Uuid, Path, description = "Id do pedido de folga")),
    request_body = ReviewTimeOffPayload,
    responses((status = 200), (status = 404, description = "Pedido não encontrado")),
    security(("api_jwt" = []))
)]
pub async fn review_time_off(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewTimeOffPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state
        .time_off_service
        .set_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(request)))
}
