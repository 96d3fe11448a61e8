// src/handlers/shifts.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManagerOnly, RequireRole},
    },
};

// ---
// Handler: GET /api/shifts/my (próximos 14 dias)
// ---
#[utoipa::path(
    get,
    path = "/api/shifts/my",
    tag = "Shifts",
    responses((status = 200)),
    security(("api_jwt" = []))
)]
pub async fn my_shifts(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let shifts = app_state.schedule_service.my_shifts(user.0.id).await?;
    Ok((StatusCode::OK, Json(shifts)))
}

// ---
// Handler: GET /api/shifts/available (turnos de outros em troca)
// ---
#[utoipa::path(
    get,
    path = "/api/shifts/available",
    tag = "Shifts",
    responses((status = 200)),
    security(("api_jwt" = []))
)]
pub async fn available_shifts(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let shifts = app_state
        .schedule_service
        .available_shifts(user.0.id)
        .await?;
    Ok((StatusCode::OK, Json(shifts)))
}

// ---
// Trocas de turno
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestTradePayload {
    pub shift_id: Uuid,
}

// Qualquer funcionário pode abrir a troca; a aprovação é do gerente.
#[utoipa::path(
    post,
    path = "/api/shifts/trade",
    tag = "Shifts",
    request_body = RequestTradePayload,
    responses((status = 201), (status = 404, description = "Turno não encontrado")),
    security(("api_jwt" = []))
)]
pub async fn request_trade(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RequestTradePayload>,
) -> Result<impl IntoResponse, AppError> {
    let trade = app_state
        .schedule_service
        .request_trade(payload.shift_id, user.0.id)
        .await?;
    Ok((StatusCode::CREATED, Json(trade)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTradePayload {
    pub trade_id: Uuid,
    pub approved: bool,
}

#[utoipa::path(
    put,
    path = "/api/shifts/trade",
    tag = "Shifts",
    request_body = ResolveTradePayload,
    responses((status = 200), (status = 404, description = "Troca não encontrada")),
    security(("api_jwt" = []))
)]
pub async fn resolve_trade(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<ResolveTradePayload>,
) -> Result<impl IntoResponse, AppError> {
    let trade = app_state
        .schedule_service
        .resolve_trade(payload.trade_id, payload.approved)
        .await?;
    Ok((StatusCode::OK, Json(trade)))
}

#[utoipa::path(
    get,
    path = "/api/shifts/trade",
    tag = "Shifts",
    responses((status = 200)),
    security(("api_jwt" = []))
)]
pub async fn list_trades(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let trades = app_state.schedule_service.list_trades(&user.0).await?;
    Ok((StatusCode::OK, Json(trades)))
}
